//! Failure domain declarations on a ControlPlaneMachineSet template
//!
//! These types follow the `machine.openshift.io/v1` schema generation, where
//! resource references carry an explicit `type` discriminator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::PlatformType;

/// Failure domains the control plane machines should be spread across
///
/// `platform` is the explicit platform hint; only the list matching it is
/// read.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomains {
    /// Platform the failure domains are declared for (e.g. "AWS")
    #[serde(default)]
    pub platform: String,

    /// AWS failure domains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<Vec<AwsFailureDomain>>,

    /// Azure failure domains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<Vec<AzureFailureDomain>>,

    /// GCP failure domains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<Vec<GcpFailureDomain>>,
}

impl FailureDomains {
    /// Parse the platform hint
    pub fn platform_type(&self) -> PlatformType {
        PlatformType::from(self.platform.as_str())
    }

    /// Returns true if no failure domain is declared for the hinted platform
    pub fn is_empty(&self) -> bool {
        match self.platform_type() {
            PlatformType::Aws => self.aws.as_ref().map_or(true, Vec::is_empty),
            PlatformType::Azure => self.azure.as_ref().map_or(true, Vec::is_empty),
            PlatformType::Gcp => self.gcp.as_ref().map_or(true, Vec::is_empty),
            _ => true,
        }
    }

    /// Returns true if any platform list holds a failure domain, whatever the hint
    pub fn declares_any(&self) -> bool {
        self.aws.as_ref().is_some_and(|l| !l.is_empty())
            || self.azure.as_ref().is_some_and(|l| !l.is_empty())
            || self.gcp.as_ref().is_some_and(|l| !l.is_empty())
    }
}

/// Placement of an AWS failure domain
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub struct AwsFailureDomainPlacement {
    /// Availability zone, e.g. "us-east-1a"
    #[serde(default)]
    pub availability_zone: String,
}

/// An AWS availability zone plus the subnet machines in it should use
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub struct AwsFailureDomain {
    /// Zone placement; ordering sorts by zone first
    #[serde(default)]
    pub placement: AwsFailureDomainPlacement,

    /// Subnet reference; absent means no subnet is pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<AwsResourceReference>,
}

/// Reference to an AWS resource with an explicit discriminator
///
/// The empty reference is expressed as `Option::<AwsResourceReference>::None`
/// by the fields that hold one.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "type")]
pub enum AwsResourceReference {
    /// Reference by resource ID
    #[serde(rename = "ID")]
    Id {
        /// Resource ID, e.g. "subnet-0123456789abcdef0"
        id: String,
    },
    /// Reference by ARN
    #[serde(rename = "ARN")]
    Arn {
        /// Amazon Resource Name
        arn: String,
    },
    /// Reference by a set of filters
    #[serde(rename = "Filters")]
    Filters {
        /// Filters, all of which must match
        #[serde(default)]
        filters: Vec<AwsResourceFilter>,
    },
}

/// A single AWS describe filter
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub struct AwsResourceFilter {
    /// Filter name, e.g. "tag:Name"
    pub name: String,

    /// Accepted values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// An Azure availability zone
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub struct AzureFailureDomain {
    /// Zone number, e.g. "1"
    pub zone: String,
}

/// A GCP zone
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub struct GcpFailureDomain {
    /// Zone name, e.g. "us-central1-a"
    pub zone: String,
}
