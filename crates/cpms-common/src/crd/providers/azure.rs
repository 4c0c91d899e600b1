//! Azure machine provider spec (`AzureMachineProviderSpec`)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SecretReference;

/// `kind` discriminator of an Azure provider spec
pub const AZURE_PROVIDER_SPEC_KIND: &str = "AzureMachineProviderSpec";

/// Azure provider spec for a single machine
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzureMachineProviderSpec {
    /// Type discriminator (`AzureMachineProviderSpec`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// API version of the payload
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    /// VM size, e.g. "Standard_D8s_v3"
    #[serde(default)]
    pub vm_size: String,

    /// Region, e.g. "centralus"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// Availability zone, e.g. "1"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,

    /// Boot image
    #[serde(default)]
    pub image: Image,

    /// OS disk parameters
    #[serde(default)]
    pub os_disk: OsDisk,

    /// Virtual network name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vnet: String,

    /// Subnet name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet: String,

    /// Resource group of the virtual network
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network_resource_group: String,

    /// Resource group of the machine
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_group: String,

    /// Whether to assign a public IP
    #[serde(default, rename = "publicIP", skip_serializing_if = "std::ops::Not::not")]
    pub public_ip: bool,

    /// Managed identity assigned to the VM
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub managed_identity: String,

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

/// Azure image reference
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Marketplace publisher
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publisher: String,
    /// Marketplace offer
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub offer: String,
    /// Marketplace SKU
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sku: String,
    /// Image version
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Resource ID of a custom image
    #[serde(default, rename = "resourceID", skip_serializing_if = "String::is_empty")]
    pub resource_id: String,
    /// Any other fields, kept as decoded
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Azure OS disk
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OsDisk {
    /// "Linux" or "Windows"
    #[serde(default)]
    pub os_type: String,
    /// Disk size in GB
    #[serde(default, rename = "diskSizeGB")]
    pub disk_size_gb: i32,
    /// Managed disk parameters
    #[serde(default)]
    pub managed_disk: ManagedDiskParameters,
    /// Any other fields, kept as decoded
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Azure managed disk parameters
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManagedDiskParameters {
    /// Storage account type, e.g. "Premium_LRS"
    #[serde(default)]
    pub storage_account_type: String,
    /// Any other fields, kept as decoded
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
