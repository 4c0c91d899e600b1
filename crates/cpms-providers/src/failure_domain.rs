//! Provider-polymorphic failure domain

use std::fmt;

use cpms_common::crd::failure_domains::AwsResourceReference;
use cpms_common::crd::{
    AwsFailureDomain, AwsFailureDomainPlacement, AzureFailureDomain, FailureDomains,
    GcpFailureDomain, PlatformType,
};
use cpms_common::{Error, Result};

/// A placement unit a control plane machine can occupy
///
/// Equality is structural within a variant; values of different variants are
/// never equal. The AWS subnet takes part in equality, so the same zone with a
/// differently resolved subnet is a different failure domain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureDomain {
    /// AWS availability zone and optional subnet
    Aws(AwsFailureDomain),
    /// Azure availability zone
    Azure(AzureFailureDomain),
    /// GCP zone
    Gcp(GcpFailureDomain),
}

impl FailureDomain {
    /// AWS failure domain for a zone and optional subnet
    pub fn aws(availability_zone: impl Into<String>, subnet: Option<AwsResourceReference>) -> Self {
        Self::Aws(AwsFailureDomain {
            subnet,
            placement: AwsFailureDomainPlacement {
                availability_zone: availability_zone.into(),
            },
        })
    }

    /// Azure failure domain for a zone
    pub fn azure(zone: impl Into<String>) -> Self {
        Self::Azure(AzureFailureDomain { zone: zone.into() })
    }

    /// GCP failure domain for a zone
    pub fn gcp(zone: impl Into<String>) -> Self {
        Self::Gcp(GcpFailureDomain { zone: zone.into() })
    }

    /// Platform this failure domain belongs to
    pub fn platform_type(&self) -> PlatformType {
        match self {
            Self::Aws(_) => PlatformType::Aws,
            Self::Azure(_) => PlatformType::Azure,
            Self::Gcp(_) => PlatformType::Gcp,
        }
    }

    /// Failure domains declared on a template, for its platform hint
    ///
    /// Fails with [`Error::UnsupportedPlatformType`] when the hint names a
    /// platform without failure domain support. An absent list for a supported
    /// platform yields an empty result.
    pub fn from_failure_domains(failure_domains: &FailureDomains) -> Result<Vec<Self>> {
        let domains = match failure_domains.platform_type() {
            PlatformType::Aws => failure_domains
                .aws
                .iter()
                .flatten()
                .cloned()
                .map(Self::Aws)
                .collect(),
            PlatformType::Azure => failure_domains
                .azure
                .iter()
                .flatten()
                .cloned()
                .map(Self::Azure)
                .collect(),
            PlatformType::Gcp => failure_domains
                .gcp
                .iter()
                .flatten()
                .cloned()
                .map(Self::Gcp)
                .collect(),
            _ => return Err(Error::unsupported_platform(&failure_domains.platform)),
        };
        Ok(domains)
    }
}

impl fmt::Display for FailureDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aws(fd) => {
                write!(
                    f,
                    "AWSFailureDomain{{AvailabilityZone:{}, Subnet:",
                    fd.placement.availability_zone
                )?;
                match &fd.subnet {
                    None => f.write_str("nil")?,
                    Some(AwsResourceReference::Id { id }) => {
                        write!(f, "{{Type:id, Value:{id}}}")?
                    }
                    Some(AwsResourceReference::Arn { arn }) => {
                        write!(f, "{{Type:arn, Value:{arn}}}")?
                    }
                    Some(AwsResourceReference::Filters { filters }) => {
                        let rendered: Vec<String> = filters
                            .iter()
                            .map(|filter| {
                                format!(
                                    "{{Name:{} Values:[{}]}}",
                                    filter.name,
                                    filter.values.join(" ")
                                )
                            })
                            .collect();
                        write!(f, "{{Type:filters, Value:&[{}]}}", rendered.join(" "))?
                    }
                }
                f.write_str("}")
            }
            Self::Azure(fd) => write!(f, "AzureFailureDomain{{Zone:{}}}", fd.zone),
            Self::Gcp(fd) => write!(f, "GCPFailureDomain{{Zone:{}}}", fd.zone),
        }
    }
}
