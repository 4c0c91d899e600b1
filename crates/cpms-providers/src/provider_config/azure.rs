//! Azure provider config

use serde::Deserialize;

use cpms_common::crd::{AzureFailureDomain, AzureMachineProviderSpec, AZURE_PROVIDER_SPEC_KIND};
use cpms_common::{Error, Result};

/// Decoded `AzureMachineProviderSpec`; its failure domain is the zone
#[derive(Clone, Debug, PartialEq)]
pub struct AzureProviderConfig {
    config: AzureMachineProviderSpec,
}

impl AzureProviderConfig {
    pub(super) fn from_value(value: &serde_json::Value) -> Result<Self> {
        let config = AzureMachineProviderSpec::deserialize(value)
            .map_err(|e| Error::serialization_for_kind(AZURE_PROVIDER_SPEC_KIND, e.to_string()))?;
        Ok(Self { config })
    }

    /// The typed payload
    pub fn config(&self) -> &AzureMachineProviderSpec {
        &self.config
    }

    pub(super) fn inject_failure_domain(&self, failure_domain: &AzureFailureDomain) -> Self {
        let mut config = self.config.clone();
        config.zone.clone_from(&failure_domain.zone);
        Self { config }
    }

    pub(super) fn extract_failure_domain(&self) -> AzureFailureDomain {
        AzureFailureDomain {
            zone: self.config.zone.clone(),
        }
    }
}

impl From<AzureMachineProviderSpec> for AzureProviderConfig {
    fn from(config: AzureMachineProviderSpec) -> Self {
        Self { config }
    }
}
