//! Provider config abstraction
//!
//! A [`ProviderConfig`] is the fully decoded provider spec of a Machine or of
//! a ControlPlaneMachineSet template. It is built by one of the two factory
//! paths:
//!
//! - [`ProviderConfig::from_machine_template`] trusts the explicit platform
//!   hint on the template's failure domains
//! - [`ProviderConfig::from_machine`] reads the `kind` discriminator of the
//!   embedded payload
//!
//! Values are immutable; injecting a failure domain returns a new value.

mod aws;
mod azure;
mod gcp;

pub use aws::AwsProviderConfig;
pub use azure::AzureProviderConfig;
pub use gcp::GcpProviderConfig;

use serde::Deserialize;
use tracing::debug;

use cpms_common::crd::{
    Machine, OpenShiftMachineV1Beta1MachineTemplate, PlatformType, ProviderSpec,
    AWS_PROVIDER_CONFIG_KIND, AZURE_PROVIDER_SPEC_KIND, GCP_PROVIDER_SPEC_KIND,
};
use cpms_common::{Error, Result};

use crate::FailureDomain;

/// Decoded provider spec for one of the supported platforms
#[derive(Clone, Debug, PartialEq)]
pub enum ProviderConfig {
    /// `AWSMachineProviderConfig`
    Aws(AwsProviderConfig),
    /// `AzureMachineProviderSpec`
    Azure(AzureProviderConfig),
    /// `GCPMachineProviderSpec`
    Gcp(GcpProviderConfig),
}

/// Only the discriminator of a provider spec payload
#[derive(Deserialize)]
struct KindHeader {
    #[serde(default)]
    kind: String,
}

impl ProviderConfig {
    /// Build a provider config from a ControlPlaneMachineSet machine template
    ///
    /// The platform comes from `failureDomains.platform`. A hint naming a
    /// platform without provider config support fails with
    /// [`Error::UnsupportedPlatformType`].
    pub fn from_machine_template(
        template: &OpenShiftMachineV1Beta1MachineTemplate,
    ) -> Result<Self> {
        let platform = template.failure_domains.platform_type();
        debug!(platform = %platform, hint = %template.failure_domains.platform, "building provider config from template");

        match platform {
            PlatformType::Aws | PlatformType::Azure | PlatformType::Gcp => {
                Self::decode(platform, &template.spec.provider_spec)
            }
            _ => Err(Error::unsupported_platform(
                &template.failure_domains.platform,
            )),
        }
    }

    /// Build a provider config from a Machine
    ///
    /// The platform is detected from the `kind` of the embedded payload.
    pub fn from_machine(machine: &Machine) -> Result<Self> {
        let platform = detect_platform(&machine.spec.provider_spec)
            .map_err(|e| e.with_context("could not determine platform type"))?;
        debug!(machine = %machine.display_name(), platform = %platform, "building provider config from machine");

        Self::decode(platform, &machine.spec.provider_spec)
    }

    fn decode(platform: PlatformType, provider_spec: &ProviderSpec) -> Result<Self> {
        let context = format!("failed to parse {platform} provider config");
        let value = provider_spec
            .value
            .as_ref()
            .ok_or_else(|| Error::serialization("provider spec value is missing"))
            .map_err(|e| e.with_context(&context))?;

        let config = match platform {
            PlatformType::Aws => AwsProviderConfig::from_value(value).map(Self::Aws),
            PlatformType::Azure => AzureProviderConfig::from_value(value).map(Self::Azure),
            PlatformType::Gcp => GcpProviderConfig::from_value(value).map(Self::Gcp),
            other => Err(Error::unsupported_platform(other.as_str())),
        };
        config.map_err(|e| e.with_context(context))
    }

    /// Platform of this provider config
    pub fn platform_type(&self) -> PlatformType {
        match self {
            Self::Aws(_) => PlatformType::Aws,
            Self::Azure(_) => PlatformType::Azure,
            Self::Gcp(_) => PlatformType::Gcp,
        }
    }

    /// The AWS payload, or `None` for any other platform
    pub fn as_aws(&self) -> Option<&AwsProviderConfig> {
        match self {
            Self::Aws(config) => Some(config),
            _ => None,
        }
    }

    /// The Azure payload, or `None` for any other platform
    pub fn as_azure(&self) -> Option<&AzureProviderConfig> {
        match self {
            Self::Azure(config) => Some(config),
            _ => None,
        }
    }

    /// The GCP payload, or `None` for any other platform
    pub fn as_gcp(&self) -> Option<&GcpProviderConfig> {
        match self {
            Self::Gcp(config) => Some(config),
            _ => None,
        }
    }

    /// Return a copy with the placement fields taken from `failure_domain`
    ///
    /// Fails with [`Error::MismatchedPlatformTypes`] when the failure domain
    /// belongs to a different platform.
    pub fn inject_failure_domain(&self, failure_domain: &FailureDomain) -> Result<Self> {
        match (self, failure_domain) {
            (Self::Aws(config), FailureDomain::Aws(fd)) => {
                Ok(Self::Aws(config.inject_failure_domain(fd)))
            }
            (Self::Azure(config), FailureDomain::Azure(fd)) => {
                Ok(Self::Azure(config.inject_failure_domain(fd)))
            }
            (Self::Gcp(config), FailureDomain::Gcp(fd)) => {
                Ok(Self::Gcp(config.inject_failure_domain(fd)))
            }
            _ => Err(Error::mismatched_platform_types(
                self.platform_type(),
                failure_domain.platform_type(),
            )),
        }
    }

    /// The failure domain this provider config places a machine in
    pub fn extract_failure_domain(&self) -> FailureDomain {
        match self {
            Self::Aws(config) => FailureDomain::Aws(config.extract_failure_domain()),
            Self::Azure(config) => FailureDomain::Azure(config.extract_failure_domain()),
            Self::Gcp(config) => FailureDomain::Gcp(config.extract_failure_domain()),
        }
    }

    /// Deep comparison with another provider config
    ///
    /// Comparing configs of different platforms is an error rather than
    /// `false`.
    pub fn equal(&self, other: &ProviderConfig) -> Result<bool> {
        match (self, other) {
            (Self::Aws(a), Self::Aws(b)) => Ok(a == b),
            (Self::Azure(a), Self::Azure(b)) => Ok(a == b),
            (Self::Gcp(a), Self::Gcp(b)) => Ok(a == b),
            _ => Err(Error::mismatched_platform_types(
                self.platform_type(),
                other.platform_type(),
            )),
        }
    }

    /// Serialized JSON of the typed payload
    pub fn raw_config(&self) -> Result<Vec<u8>> {
        let raw = match self {
            Self::Aws(config) => serde_json::to_vec(config.config()),
            Self::Azure(config) => serde_json::to_vec(config.config()),
            Self::Gcp(config) => serde_json::to_vec(config.config()),
        };
        raw.map_err(|e| Error::serialization_for_kind(self.kind(), e.to_string()))
    }

    /// The typed payload as a `providerSpec.value` document
    pub fn to_provider_spec_value(&self) -> Result<serde_json::Value> {
        let value = match self {
            Self::Aws(config) => serde_json::to_value(config.config()),
            Self::Azure(config) => serde_json::to_value(config.config()),
            Self::Gcp(config) => serde_json::to_value(config.config()),
        };
        value.map_err(|e| Error::serialization_for_kind(self.kind(), e.to_string()))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Aws(_) => AWS_PROVIDER_CONFIG_KIND,
            Self::Azure(_) => AZURE_PROVIDER_SPEC_KIND,
            Self::Gcp(_) => GCP_PROVIDER_SPEC_KIND,
        }
    }
}

/// Platform named by the `kind` of a provider spec payload
fn detect_platform(provider_spec: &ProviderSpec) -> Result<PlatformType> {
    let value = provider_spec
        .value
        .as_ref()
        .ok_or_else(|| Error::serialization("provider spec value is missing"))?;
    let header = KindHeader::deserialize(value)
        .map_err(|e| Error::serialization(format!("failed to read provider spec kind: {e}")))?;

    match header.kind.as_str() {
        AWS_PROVIDER_CONFIG_KIND => Ok(PlatformType::Aws),
        AZURE_PROVIDER_SPEC_KIND => Ok(PlatformType::Azure),
        GCP_PROVIDER_SPEC_KIND => Ok(PlatformType::Gcp),
        _ => Err(Error::unknown_provider_config_type(header.kind)),
    }
}

/// Failure domains of the given machines, in input order
///
/// Duplicates are kept. The first machine whose provider config cannot be
/// built aborts the extraction.
pub fn extract_failure_domains(machines: &[Machine]) -> Result<Vec<FailureDomain>> {
    machines
        .iter()
        .map(|machine| {
            ProviderConfig::from_machine(machine)
                .map(|config| config.extract_failure_domain())
                .map_err(|e| {
                    e.with_context(format!(
                        "failed to extract failure domain from machine {}",
                        machine.display_name()
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpms_common::crd::FailureDomains;
    use cpms_common::fixtures::{
        filter_subnet, id_subnet, legacy_filter_subnet, AwsFailureDomainBuilder,
        AwsProviderSpecBuilder, AzureProviderSpecBuilder, GcpProviderSpecBuilder,
        MachineBuilder, MachineTemplateBuilder,
    };
    use rstest::rstest;

    fn aws_config(zone: &str) -> ProviderConfig {
        ProviderConfig::Aws(AwsProviderConfig::from(
            AwsProviderSpecBuilder::new()
                .with_availability_zone(zone)
                .build(),
        ))
    }

    fn aws_config_with(field: &str, value: serde_json::Value) -> ProviderConfig {
        let mut spec = AwsProviderSpecBuilder::new().build_value();
        spec[field] = value;
        let machine = MachineBuilder::new()
            .as_master()
            .with_provider_spec(spec)
            .build();
        ProviderConfig::from_machine(&machine).expect("AWS spec should decode")
    }

    fn azure_config(zone: &str) -> ProviderConfig {
        ProviderConfig::Azure(AzureProviderConfig::from(
            AzureProviderSpecBuilder::new().with_zone(zone).build(),
        ))
    }

    fn gcp_config(zone: &str) -> ProviderConfig {
        ProviderConfig::Gcp(GcpProviderConfig::from(
            GcpProviderSpecBuilder::new().with_zone(zone).build(),
        ))
    }

    mod from_machine_template {
        use super::*;

        #[test]
        fn invalid_platform_is_unsupported() {
            let template = MachineTemplateBuilder::new()
                .with_platform("invalid")
                .build();

            let err = ProviderConfig::from_machine_template(&template)
                .expect_err("invalid platform should be rejected");
            assert_eq!(err.to_string(), "unsupported platform type: invalid");
            assert!(matches!(
                err,
                Error::UnsupportedPlatformType { ref platform } if platform == "invalid"
            ));
        }

        #[rstest]
        #[case::openstack("OpenStack")]
        #[case::vsphere("VSphere")]
        #[case::baremetal("BareMetal")]
        #[case::empty("")]
        fn recognised_but_unimplemented_platforms_are_unsupported(#[case] platform: &str) {
            let template = MachineTemplateBuilder::new().with_platform(platform).build();
            let err = ProviderConfig::from_machine_template(&template)
                .expect_err("platform should be rejected");
            assert!(matches!(err, Error::UnsupportedPlatformType { .. }));
        }

        #[test]
        fn aws_with_failure_domains() {
            let template = MachineTemplateBuilder::new()
                .with_aws_failure_domains(vec![
                    AwsFailureDomainBuilder::new()
                        .with_availability_zone("us-east-1a")
                        .build(),
                    AwsFailureDomainBuilder::new()
                        .with_availability_zone("us-east-1b")
                        .build(),
                ])
                .build();

            let config = ProviderConfig::from_machine_template(&template)
                .expect("AWS template should decode");
            assert_eq!(config.platform_type(), PlatformType::Aws);
            assert_eq!(
                config.as_aws().map(|c| c.config()),
                Some(&AwsProviderSpecBuilder::new().build())
            );
        }

        #[test]
        fn aws_without_failure_domains() {
            let template = MachineTemplateBuilder::new()
                .with_failure_domains(FailureDomains {
                    platform: "AWS".to_string(),
                    ..Default::default()
                })
                .build();

            let config = ProviderConfig::from_machine_template(&template)
                .expect("AWS template should decode");
            assert_eq!(config, aws_config("us-east-1a"));
        }

        #[test]
        fn gcp_template_decodes_gcp_payload() {
            let template = MachineTemplateBuilder::new()
                .with_platform("GCP")
                .with_provider_spec(GcpProviderSpecBuilder::new().build_value())
                .build();

            let config = ProviderConfig::from_machine_template(&template)
                .expect("GCP template should decode");
            assert_eq!(config.platform_type(), PlatformType::Gcp);
            assert!(config.as_aws().is_none());
        }

        #[test]
        fn undecodable_payload_is_wrapped() {
            let template = MachineTemplateBuilder::new()
                .with_provider_spec(serde_json::json!({ "placement": "not-an-object" }))
                .build();

            let err = ProviderConfig::from_machine_template(&template)
                .expect_err("malformed payload should be rejected");
            assert!(err
                .to_string()
                .starts_with("failed to parse AWS provider config: serialization error:"));
            assert_eq!(err.kind(), Some(AWS_PROVIDER_CONFIG_KIND));
        }
    }

    mod from_machine {
        use super::*;

        #[rstest]
        #[case::invalid_kind("InvalidKind")]
        #[case::invalid_provider_spec_kind("InvalidProviderSpecKind")]
        fn invalid_kind_is_unknown_provider_config_type(#[case] kind: &str) {
            let machine = MachineBuilder::new()
                .as_master()
                .with_provider_spec(serde_json::json!({ "kind": kind }))
                .build();

            let err =
                ProviderConfig::from_machine(&machine).expect_err("unknown kind should fail");
            assert_eq!(
                err.to_string(),
                format!("could not determine platform type: unknown provider config type: {kind}")
            );
            assert!(matches!(
                err.root_cause(),
                Error::UnknownProviderConfigType { kind: found } if found == kind
            ));
        }

        #[test]
        fn missing_provider_spec_is_a_decode_failure() {
            let machine = MachineBuilder::new().without_provider_spec().build();
            let err = ProviderConfig::from_machine(&machine)
                .expect_err("missing payload should fail");
            assert!(matches!(err.root_cause(), Error::Serialization { .. }));
        }

        #[rstest]
        #[case::aws(AwsProviderSpecBuilder::new().build_value(), PlatformType::Aws)]
        #[case::azure(AzureProviderSpecBuilder::new().build_value(), PlatformType::Azure)]
        #[case::gcp(GcpProviderSpecBuilder::new().build_value(), PlatformType::Gcp)]
        fn kind_selects_platform(#[case] value: serde_json::Value, #[case] expected: PlatformType) {
            let machine = MachineBuilder::new().with_provider_spec(value).build();
            let config = ProviderConfig::from_machine(&machine).expect("payload should decode");
            assert_eq!(config.platform_type(), expected);
        }

        #[test]
        fn machine_and_template_paths_agree() {
            let spec = AwsProviderSpecBuilder::new().with_availability_zone("us-east-1b");
            let machine = MachineBuilder::new()
                .with_provider_spec(spec.build_value())
                .build();
            let template = MachineTemplateBuilder::new()
                .with_provider_spec(spec.build_value())
                .build();

            let from_machine = ProviderConfig::from_machine(&machine).expect("machine decodes");
            let from_template =
                ProviderConfig::from_machine_template(&template).expect("template decodes");
            assert_eq!(from_machine.equal(&from_template).ok(), Some(true));
        }
    }

    mod inject_failure_domain {
        use super::*;

        #[rstest]
        #[case::same_zone("us-east-1a", "us-east-1a")]
        #[case::changed_zone("us-east-1a", "us-east-1b")]
        fn aws_zone_is_replaced(#[case] from: &str, #[case] to: &str) {
            let base = aws_config(from);
            let fd = FailureDomain::aws(to, Some(filter_subnet("aws-subnet-12345678")));

            let injected = base.inject_failure_domain(&fd).expect("AWS into AWS");
            assert_eq!(injected, aws_config(to));
            assert_eq!(base, aws_config(from), "receiver must be untouched");
        }

        #[test]
        fn aws_subnet_is_converted_to_presence_only() {
            let fd = FailureDomain::aws("us-east-1c", Some(id_subnet("subnet-us-east-1c")));
            let injected = aws_config("us-east-1a")
                .inject_failure_domain(&fd)
                .expect("AWS into AWS");

            let payload = injected.as_aws().map(|c| c.config()).expect("AWS payload");
            assert_eq!(payload.subnet.id.as_deref(), Some("subnet-us-east-1c"));
            assert!(payload.subnet.filters.is_none());
            assert_eq!(payload.placement.region, "us-east-1");
            assert_eq!(payload.instance_type, "m6i.xlarge");
        }

        #[rstest]
        #[case::aws_with_filter(
            aws_config("us-east-1a"),
            FailureDomain::aws("us-east-1c", Some(filter_subnet("other")))
        )]
        #[case::aws_with_id(
            aws_config("us-east-1a"),
            FailureDomain::aws("us-east-1b", Some(id_subnet("subnet-1")))
        )]
        #[case::aws_without_subnet(aws_config("us-east-1a"), FailureDomain::aws("us-east-1b", None))]
        #[case::azure(azure_config("1"), FailureDomain::azure("3"))]
        #[case::gcp(gcp_config("us-central1-a"), FailureDomain::gcp("us-central1-f"))]
        fn inject_then_extract_is_identity(
            #[case] base: ProviderConfig,
            #[case] fd: FailureDomain,
        ) {
            let injected = base.inject_failure_domain(&fd).expect("same platform");
            assert_eq!(injected.extract_failure_domain(), fd);
        }

        #[test]
        fn mismatched_platform_is_rejected() {
            let err = aws_config("us-east-1a")
                .inject_failure_domain(&FailureDomain::azure("1"))
                .expect_err("Azure into AWS should fail");
            assert_eq!(
                err.to_string(),
                "mismatched platform types: expected AWS, got Azure"
            );
        }
    }

    mod extract_failure_domain {
        use super::*;

        #[rstest]
        #[case::us_east_1a("us-east-1a")]
        #[case::us_east_1b("us-east-1b")]
        fn aws_zone_and_filter_subnet(#[case] zone: &str) {
            assert_eq!(
                aws_config(zone).extract_failure_domain(),
                FailureDomain::aws(zone, Some(filter_subnet("aws-subnet-12345678")))
            );
        }

        #[test]
        fn aws_empty_subnet_is_none() {
            let config = ProviderConfig::Aws(AwsProviderConfig::from(
                AwsProviderSpecBuilder::new()
                    .with_subnet(Default::default())
                    .build(),
            ));
            assert_eq!(
                config.extract_failure_domain(),
                FailureDomain::aws("us-east-1a", None)
            );
        }

        #[test]
        fn azure_and_gcp_zones() {
            assert_eq!(azure_config("2").extract_failure_domain(), FailureDomain::azure("2"));
            assert_eq!(
                gcp_config("us-central1-b").extract_failure_domain(),
                FailureDomain::gcp("us-central1-b")
            );
        }
    }

    mod equal {
        use super::*;

        #[test]
        fn different_platform_types_error() {
            let err = aws_config("us-east-1a")
                .equal(&gcp_config("us-central1-a"))
                .expect_err("AWS vs GCP should fail");
            assert!(matches!(
                err,
                Error::MismatchedPlatformTypes {
                    expected: PlatformType::Aws,
                    actual: PlatformType::Gcp
                }
            ));
        }

        #[test]
        fn matching_configs_are_equal_both_ways() {
            let a = aws_config("us-east-1a");
            let b = aws_config("us-east-1a");
            assert_eq!(a.equal(&a).ok(), Some(true));
            assert_eq!(a.equal(&b).ok(), Some(true));
            assert_eq!(b.equal(&a).ok(), Some(true));
        }

        #[test]
        fn mismatched_configs_are_not_equal_both_ways() {
            let a = aws_config("us-east-1a");
            let b = ProviderConfig::Aws(AwsProviderConfig::from(
                AwsProviderSpecBuilder::new()
                    .with_subnet(legacy_filter_subnet("aws-subnet-different"))
                    .build(),
            ));
            assert_eq!(a.equal(&b).ok(), Some(false));
            assert_eq!(b.equal(&a).ok(), Some(false));
        }

        #[test]
        fn configs_differing_only_in_unmodelled_field_are_not_equal() {
            let plain = aws_config("us-east-1a");
            let spot = aws_config_with(
                "spotMarketOptions",
                serde_json::json!({ "maxPrice": "0.5" }),
            );
            assert_eq!(spot.equal(&plain).ok(), Some(false));
            assert_eq!(plain.equal(&spot).ok(), Some(false));

            let same = aws_config_with(
                "spotMarketOptions",
                serde_json::json!({ "maxPrice": "0.5" }),
            );
            assert_eq!(spot.equal(&same).ok(), Some(true));
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn raw_config_is_payload_json() {
            let spec = AwsProviderSpecBuilder::new();
            let raw = aws_config("us-east-1a").raw_config().expect("should marshal");
            assert_eq!(raw, spec.build_raw());
        }

        #[test]
        fn unmodelled_fields_are_written_back() {
            let spot = aws_config_with(
                "spotMarketOptions",
                serde_json::json!({ "maxPrice": "0.5" }),
            );
            let raw = spot.raw_config().expect("should marshal");
            let value: serde_json::Value =
                serde_json::from_slice(&raw).expect("raw config should be JSON");
            assert_eq!(value["spotMarketOptions"]["maxPrice"], "0.5");

            let injected = spot
                .inject_failure_domain(&FailureDomain::aws("us-east-1b", None))
                .expect("AWS into AWS");
            let value = injected.to_provider_spec_value().expect("should marshal");
            assert_eq!(value["spotMarketOptions"]["maxPrice"], "0.5");
            assert_eq!(value["placement"]["availabilityZone"], "us-east-1b");
        }

        #[test]
        fn provider_spec_value_round_trips_through_machine() {
            let config = gcp_config("us-central1-c");
            let value = config.to_provider_spec_value().expect("should marshal");
            assert_eq!(value["kind"], GCP_PROVIDER_SPEC_KIND);

            let machine = MachineBuilder::new().with_provider_spec(value).build();
            let decoded = ProviderConfig::from_machine(&machine).expect("should decode");
            assert_eq!(decoded, config);
        }
    }

    mod extract_failure_domains {
        use super::*;

        #[test]
        fn no_machines() {
            assert_eq!(extract_failure_domains(&[]).ok(), Some(Vec::new()));
        }

        #[test]
        fn machines_in_order_with_duplicates() {
            let machine = |zone: &str| {
                MachineBuilder::new()
                    .as_master()
                    .with_provider_spec(
                        AwsProviderSpecBuilder::new()
                            .with_availability_zone(zone)
                            .build_value(),
                    )
                    .build()
            };
            let machines = vec![machine("us-east-1b"), machine("us-east-1a"), machine("us-east-1b")];

            let domains = extract_failure_domains(&machines).expect("should extract");
            let zones: Vec<String> = domains
                .iter()
                .map(|d| match d {
                    FailureDomain::Aws(fd) => fd.placement.availability_zone.clone(),
                    other => panic!("unexpected failure domain {other}"),
                })
                .collect();
            assert_eq!(zones, vec!["us-east-1b", "us-east-1a", "us-east-1b"]);
        }

        #[test]
        fn first_error_aborts() {
            let machines = vec![
                MachineBuilder::new().with_name("master-0").build(),
                MachineBuilder::new()
                    .with_name("master-1")
                    .with_provider_spec(serde_json::json!({ "kind": "Bogus" }))
                    .build(),
            ];

            let err = extract_failure_domains(&machines).expect_err("bogus kind should fail");
            assert!(err.to_string().contains("master-1"));
            assert_eq!(err.kind(), Some("Bogus"));
        }
    }
}
