//! Provider-specific machine configuration payloads.
//!
//! Each module holds the `providerSpec.value` schema for one cloud:
//! - AWS (`AWSMachineProviderConfig`)
//! - Azure (`AzureMachineProviderSpec`)
//! - GCP (`GCPMachineProviderSpec`)

pub mod aws;
pub mod azure;
pub mod gcp;

pub use aws::{AwsMachineProviderConfig, AWS_PROVIDER_CONFIG_KIND};
pub use azure::{AzureMachineProviderSpec, AZURE_PROVIDER_SPEC_KIND};
pub use gcp::{GcpMachineProviderSpec, GCP_PROVIDER_SPEC_KIND};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reference to a secret by name, resolved in the machine's namespace
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretReference {
    /// Secret name
    pub name: String,

    /// Secret namespace, when it differs from the machine's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Fields not modelled above, carried through re-encoding unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
