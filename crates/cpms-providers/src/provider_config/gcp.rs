//! GCP provider config

use serde::Deserialize;

use cpms_common::crd::{GcpFailureDomain, GcpMachineProviderSpec, GCP_PROVIDER_SPEC_KIND};
use cpms_common::{Error, Result};

/// Decoded `GCPMachineProviderSpec`; its failure domain is the zone
#[derive(Clone, Debug, PartialEq)]
pub struct GcpProviderConfig {
    config: GcpMachineProviderSpec,
}

impl GcpProviderConfig {
    pub(super) fn from_value(value: &serde_json::Value) -> Result<Self> {
        let config = GcpMachineProviderSpec::deserialize(value)
            .map_err(|e| Error::serialization_for_kind(GCP_PROVIDER_SPEC_KIND, e.to_string()))?;
        Ok(Self { config })
    }

    /// The typed payload
    pub fn config(&self) -> &GcpMachineProviderSpec {
        &self.config
    }

    pub(super) fn inject_failure_domain(&self, failure_domain: &GcpFailureDomain) -> Self {
        let mut config = self.config.clone();
        config.zone.clone_from(&failure_domain.zone);
        Self { config }
    }

    pub(super) fn extract_failure_domain(&self) -> GcpFailureDomain {
        GcpFailureDomain {
            zone: self.config.zone.clone(),
        }
    }
}

impl From<GcpMachineProviderSpec> for GcpProviderConfig {
    fn from(config: GcpMachineProviderSpec) -> Self {
        Self { config }
    }
}
