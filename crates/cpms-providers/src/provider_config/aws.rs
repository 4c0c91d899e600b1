//! AWS provider config

use serde::Deserialize;

use cpms_common::crd::{
    AwsFailureDomain, AwsFailureDomainPlacement, AwsMachineProviderConfig,
    AWS_PROVIDER_CONFIG_KIND,
};
use cpms_common::{Error, Result};

use crate::convert;

/// Decoded `AWSMachineProviderConfig`
///
/// The failure domain of an AWS machine is its availability zone plus its
/// subnet reference.
#[derive(Clone, Debug, PartialEq)]
pub struct AwsProviderConfig {
    config: AwsMachineProviderConfig,
}

impl AwsProviderConfig {
    pub(super) fn from_value(value: &serde_json::Value) -> Result<Self> {
        let config = AwsMachineProviderConfig::deserialize(value)
            .map_err(|e| Error::serialization_for_kind(AWS_PROVIDER_CONFIG_KIND, e.to_string()))?;
        Ok(Self { config })
    }

    /// The typed payload
    pub fn config(&self) -> &AwsMachineProviderConfig {
        &self.config
    }

    pub(super) fn inject_failure_domain(&self, failure_domain: &AwsFailureDomain) -> Self {
        let mut config = self.config.clone();
        config
            .placement
            .availability_zone
            .clone_from(&failure_domain.placement.availability_zone);
        // The subnet is always replaced, including by an empty reference
        config.subnet = convert::to_legacy(failure_domain.subnet.as_ref());
        Self { config }
    }

    pub(super) fn extract_failure_domain(&self) -> AwsFailureDomain {
        AwsFailureDomain {
            subnet: convert::to_current(&self.config.subnet),
            placement: AwsFailureDomainPlacement {
                availability_zone: self.config.placement.availability_zone.clone(),
            },
        }
    }
}

impl From<AwsMachineProviderConfig> for AwsProviderConfig {
    fn from(config: AwsMachineProviderConfig) -> Self {
        Self { config }
    }
}
