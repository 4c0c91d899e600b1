//! GCP machine provider spec (`GCPMachineProviderSpec`)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SecretReference;

/// `kind` discriminator of a GCP provider spec
pub const GCP_PROVIDER_SPEC_KIND: &str = "GCPMachineProviderSpec";

/// GCP provider spec for a single machine
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GcpMachineProviderSpec {
    /// Type discriminator (`GCPMachineProviderSpec`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// API version of the payload
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    /// Machine type, e.g. "n2-standard-4"
    #[serde(default)]
    pub machine_type: String,

    /// Region, e.g. "us-central1"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,

    /// Zone, e.g. "us-central1-a"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,

    /// Project the instance is created in
    #[serde(default, rename = "projectID", skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    /// Attached disks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<GcpDisk>,

    /// Network interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_interfaces: Vec<GcpNetworkInterface>,

    /// Service accounts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_accounts: Vec<GcpServiceAccount>,

    /// Network tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Whether the instance may forward IP packets
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub can_ip_forward: bool,

    /// Whether deletion protection is enabled
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deletion_protection: bool,

    /// Secret holding the ignition user data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data_secret: Option<SecretReference>,

    /// Secret holding the cloud credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_secret: Option<SecretReference>,

    /// Fields not modelled above, carried through re-encoding unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// GCP disk
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GcpDisk {
    /// Delete with the instance
    #[serde(default)]
    pub auto_delete: bool,
    /// Boot disk
    #[serde(default)]
    pub boot: bool,
    /// Size in GB
    #[serde(default, rename = "sizeGb")]
    pub size_gb: i64,
    /// Disk type, e.g. "pd-ssd"
    #[serde(default, rename = "type")]
    pub type_: String,
    /// Source image
    #[serde(default)]
    pub image: String,
    /// Any other fields, kept as decoded
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// GCP network interface
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GcpNetworkInterface {
    /// Network name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network: String,
    /// Subnetwork name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnetwork: String,
    /// Project hosting the network
    #[serde(default, rename = "projectID", skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    /// Whether to assign a public IP
    #[serde(default, rename = "publicIP", skip_serializing_if = "std::ops::Not::not")]
    pub public_ip: bool,
    /// Any other fields, kept as decoded
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// GCP service account
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GcpServiceAccount {
    /// Service account email
    pub email: String,
    /// OAuth scopes
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Any other fields, kept as decoded
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
