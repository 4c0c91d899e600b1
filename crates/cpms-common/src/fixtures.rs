//! Builders for resources used in tests
//!
//! Every builder starts from a valid default (an AWS control plane in
//! `us-east-1a` with a `tag:Name` subnet filter) so tests only spell out what
//! they change.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};

use crate::crd::failure_domains::{self, AwsResourceFilter};
use crate::crd::providers::aws::{self, Filter, Placement};
use crate::crd::providers::{azure, gcp, SecretReference};
use crate::crd::{
    AwsFailureDomain, AwsFailureDomainPlacement, AwsMachineProviderConfig,
    AzureMachineProviderSpec, ControlPlaneMachineSet, ControlPlaneMachineSetSpec,
    ControlPlaneMachineSetState, ControlPlaneMachineSetStrategy, ControlPlaneMachineSetTemplate,
    ControlPlaneMachineSetTemplateObjectMeta, FailureDomains, GcpMachineProviderSpec, Machine,
    MachineSpec, OpenShiftMachineV1Beta1MachineTemplate, ProviderSpec,
    AWS_PROVIDER_CONFIG_KIND, AZURE_PROVIDER_SPEC_KIND, GCP_PROVIDER_SPEC_KIND,
};
use crate::{
    CONTROL_PLANE_MACHINE_SET_NAME, MACHINE_API_NAMESPACE, MACHINE_CLUSTER_ID_LABEL,
    MACHINE_ROLE_LABEL, MACHINE_TYPE_LABEL, MASTER_MACHINE_ROLE, WORKER_MACHINE_ROLE,
};

/// Cluster ID used on every fixture
pub const TEST_CLUSTER_ID: &str = "cpms-cluster-test-id";

/// Subnet filter value used by the default AWS fixtures
pub const TEST_SUBNET_NAME: &str = "aws-subnet-12345678";

/// The default subnet filter in the presence-only schema
pub fn legacy_filter_subnet(value: &str) -> aws::AwsResourceReference {
    aws::AwsResourceReference {
        filters: Some(vec![Filter {
            name: "tag:Name".to_string(),
            values: vec![value.to_string()],
            ..Default::default()
        }]),
        ..Default::default()
    }
}

/// The default subnet filter in the discriminated schema
pub fn filter_subnet(value: &str) -> failure_domains::AwsResourceReference {
    failure_domains::AwsResourceReference::Filters {
        filters: vec![AwsResourceFilter {
            name: "tag:Name".to_string(),
            values: vec![value.to_string()],
        }],
    }
}

/// A subnet reference by ID in the discriminated schema
pub fn id_subnet(id: &str) -> failure_domains::AwsResourceReference {
    failure_domains::AwsResourceReference::Id { id: id.to_string() }
}

/// Labels a control plane machine template must carry
pub fn control_plane_labels() -> BTreeMap<String, String> {
    BTreeMap::from([
        (MACHINE_CLUSTER_ID_LABEL.to_string(), TEST_CLUSTER_ID.to_string()),
        (MACHINE_ROLE_LABEL.to_string(), MASTER_MACHINE_ROLE.to_string()),
        (MACHINE_TYPE_LABEL.to_string(), MASTER_MACHINE_ROLE.to_string()),
    ])
}

/// Builds an `AWSMachineProviderConfig`
#[derive(Clone, Debug)]
pub struct AwsProviderSpecBuilder {
    availability_zone: String,
    subnet: aws::AwsResourceReference,
    instance_type: String,
}

impl Default for AwsProviderSpecBuilder {
    fn default() -> Self {
        Self {
            availability_zone: "us-east-1a".to_string(),
            subnet: legacy_filter_subnet(TEST_SUBNET_NAME),
            instance_type: "m6i.xlarge".to_string(),
        }
    }
}

impl AwsProviderSpecBuilder {
    /// Start from the default AWS provider spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the availability zone
    pub fn with_availability_zone(mut self, zone: impl Into<String>) -> Self {
        self.availability_zone = zone.into();
        self
    }

    /// Set the subnet reference
    pub fn with_subnet(mut self, subnet: aws::AwsResourceReference) -> Self {
        self.subnet = subnet;
        self
    }

    /// Set the instance type
    pub fn with_instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = instance_type.into();
        self
    }

    /// Build the typed provider config
    pub fn build(&self) -> AwsMachineProviderConfig {
        AwsMachineProviderConfig {
            kind: AWS_PROVIDER_CONFIG_KIND.to_string(),
            api_version: "machine.openshift.io/v1beta1".to_string(),
            ami: aws::AwsResourceReference {
                id: Some("ami-00000000000000000".to_string()),
                ..Default::default()
            },
            instance_type: self.instance_type.clone(),
            iam_instance_profile: Some(aws::AwsResourceReference {
                id: Some("cpms-test-master-profile".to_string()),
                ..Default::default()
            }),
            user_data_secret: Some(SecretReference {
                name: "master-user-data".to_string(),
                ..Default::default()
            }),
            credentials_secret: Some(SecretReference {
                name: "aws-cloud-credentials".to_string(),
                ..Default::default()
            }),
            security_groups: vec![aws::AwsResourceReference {
                filters: Some(vec![Filter {
                    name: "tag:Name".to_string(),
                    values: vec!["aws-security-group-12345678".to_string()],
                    ..Default::default()
                }]),
                ..Default::default()
            }],
            subnet: self.subnet.clone(),
            placement: Placement {
                region: "us-east-1".to_string(),
                availability_zone: self.availability_zone.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Build the provider config as an untyped provider spec value
    pub fn build_value(&self) -> serde_json::Value {
        serde_json::to_value(self.build()).unwrap_or_default()
    }

    /// Build the provider config as serialized bytes
    pub fn build_raw(&self) -> Vec<u8> {
        serde_json::to_vec(&self.build()).unwrap_or_default()
    }
}

/// Builds an `AzureMachineProviderSpec`
#[derive(Clone, Debug)]
pub struct AzureProviderSpecBuilder {
    zone: String,
}

impl Default for AzureProviderSpecBuilder {
    fn default() -> Self {
        Self {
            zone: "1".to_string(),
        }
    }
}

impl AzureProviderSpecBuilder {
    /// Start from the default Azure provider spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the availability zone
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    /// Build the typed provider spec
    pub fn build(&self) -> AzureMachineProviderSpec {
        AzureMachineProviderSpec {
            kind: AZURE_PROVIDER_SPEC_KIND.to_string(),
            api_version: "machine.openshift.io/v1beta1".to_string(),
            vm_size: "Standard_D8s_v3".to_string(),
            location: "centralus".to_string(),
            zone: self.zone.clone(),
            image: azure::Image {
                resource_id: "/resourceGroups/cpms-test-rg/providers/Microsoft.Compute/images/cpms-test".to_string(),
                ..Default::default()
            },
            os_disk: azure::OsDisk {
                os_type: "Linux".to_string(),
                disk_size_gb: 1024,
                managed_disk: azure::ManagedDiskParameters {
                    storage_account_type: "Premium_LRS".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            vnet: "cpms-test-vnet".to_string(),
            subnet: "cpms-test-master-subnet".to_string(),
            resource_group: "cpms-test-rg".to_string(),
            ..Default::default()
        }
    }

    /// Build the provider spec as an untyped provider spec value
    pub fn build_value(&self) -> serde_json::Value {
        serde_json::to_value(self.build()).unwrap_or_default()
    }
}

/// Builds a `GCPMachineProviderSpec`
#[derive(Clone, Debug)]
pub struct GcpProviderSpecBuilder {
    zone: String,
}

impl Default for GcpProviderSpecBuilder {
    fn default() -> Self {
        Self {
            zone: "us-central1-a".to_string(),
        }
    }
}

impl GcpProviderSpecBuilder {
    /// Start from the default GCP provider spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zone
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    /// Build the typed provider spec
    pub fn build(&self) -> GcpMachineProviderSpec {
        GcpMachineProviderSpec {
            kind: GCP_PROVIDER_SPEC_KIND.to_string(),
            api_version: "machine.openshift.io/v1beta1".to_string(),
            machine_type: "n2-standard-4".to_string(),
            region: "us-central1".to_string(),
            zone: self.zone.clone(),
            project_id: "cpms-test-project".to_string(),
            disks: vec![gcp::GcpDisk {
                auto_delete: true,
                boot: true,
                size_gb: 128,
                type_: "pd-ssd".to_string(),
                image: "projects/rhcos-cloud/global/images/rhcos".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Build the provider spec as an untyped provider spec value
    pub fn build_value(&self) -> serde_json::Value {
        serde_json::to_value(self.build()).unwrap_or_default()
    }
}

/// Builds an AWS failure domain in the discriminated schema
#[derive(Clone, Debug)]
pub struct AwsFailureDomainBuilder {
    availability_zone: String,
    subnet: Option<failure_domains::AwsResourceReference>,
}

impl Default for AwsFailureDomainBuilder {
    fn default() -> Self {
        Self {
            availability_zone: "us-east-1a".to_string(),
            subnet: Some(filter_subnet(TEST_SUBNET_NAME)),
        }
    }
}

impl AwsFailureDomainBuilder {
    /// Start from the default AWS failure domain
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the availability zone
    pub fn with_availability_zone(mut self, zone: impl Into<String>) -> Self {
        self.availability_zone = zone.into();
        self
    }

    /// Set (or clear) the subnet reference
    pub fn with_subnet(mut self, subnet: Option<failure_domains::AwsResourceReference>) -> Self {
        self.subnet = subnet;
        self
    }

    /// Build the failure domain
    pub fn build(&self) -> AwsFailureDomain {
        AwsFailureDomain {
            subnet: self.subnet.clone(),
            placement: AwsFailureDomainPlacement {
                availability_zone: self.availability_zone.clone(),
            },
        }
    }
}

/// Builds a Machine
#[derive(Clone, Debug)]
pub struct MachineBuilder {
    name: String,
    namespace: String,
    labels: BTreeMap<String, String>,
    provider_spec: Option<serde_json::Value>,
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self {
            name: "machine".to_string(),
            namespace: MACHINE_API_NAMESPACE.to_string(),
            labels: BTreeMap::from([(
                MACHINE_CLUSTER_ID_LABEL.to_string(),
                TEST_CLUSTER_ID.to_string(),
            )]),
            provider_spec: Some(AwsProviderSpecBuilder::new().build_value()),
        }
    }
}

impl MachineBuilder {
    /// Start from an unlabelled AWS machine
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the machine name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the machine namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Label the machine as a control plane machine
    pub fn as_master(self) -> Self {
        self.with_role(MASTER_MACHINE_ROLE)
    }

    /// Label the machine as a worker machine
    pub fn as_worker(self) -> Self {
        self.with_role(WORKER_MACHINE_ROLE)
    }

    fn with_role(mut self, role: &str) -> Self {
        self.labels
            .insert(MACHINE_ROLE_LABEL.to_string(), role.to_string());
        self.labels
            .insert(MACHINE_TYPE_LABEL.to_string(), role.to_string());
        self
    }

    /// Set the provider spec value
    pub fn with_provider_spec(mut self, value: serde_json::Value) -> Self {
        self.provider_spec = Some(value);
        self
    }

    /// Remove the provider spec value
    pub fn without_provider_spec(mut self) -> Self {
        self.provider_spec = None;
        self
    }

    /// Build the machine
    pub fn build(&self) -> Machine {
        let mut machine = Machine::new(
            &self.name,
            MachineSpec {
                provider_id: None,
                provider_spec: ProviderSpec {
                    value: self.provider_spec.clone(),
                },
            },
        );
        machine.metadata.namespace = Some(self.namespace.clone());
        machine.metadata.labels = Some(self.labels.clone());
        machine
    }
}

/// Builds the v1beta1 machine template of a ControlPlaneMachineSet
#[derive(Clone, Debug)]
pub struct MachineTemplateBuilder {
    failure_domains: FailureDomains,
    labels: BTreeMap<String, String>,
    provider_spec: Option<serde_json::Value>,
}

impl Default for MachineTemplateBuilder {
    fn default() -> Self {
        Self {
            failure_domains: FailureDomains {
                platform: "AWS".to_string(),
                ..Default::default()
            },
            labels: control_plane_labels(),
            provider_spec: Some(AwsProviderSpecBuilder::new().build_value()),
        }
    }
}

impl MachineTemplateBuilder {
    /// Start from an AWS template without failure domains
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the platform hint
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.failure_domains.platform = platform.into();
        self
    }

    /// Declare AWS failure domains (sets the platform hint to AWS)
    pub fn with_aws_failure_domains(mut self, domains: Vec<AwsFailureDomain>) -> Self {
        self.failure_domains.platform = "AWS".to_string();
        self.failure_domains.aws = Some(domains);
        self
    }

    /// Replace the whole failure domains section
    pub fn with_failure_domains(mut self, failure_domains: FailureDomains) -> Self {
        self.failure_domains = failure_domains;
        self
    }

    /// Replace the template labels
    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = labels;
        self
    }

    /// Set the provider spec value
    pub fn with_provider_spec(mut self, value: serde_json::Value) -> Self {
        self.provider_spec = Some(value);
        self
    }

    /// Build the template
    pub fn build(&self) -> OpenShiftMachineV1Beta1MachineTemplate {
        OpenShiftMachineV1Beta1MachineTemplate {
            failure_domains: self.failure_domains.clone(),
            metadata: ControlPlaneMachineSetTemplateObjectMeta {
                labels: self.labels.clone(),
                annotations: None,
            },
            spec: MachineSpec {
                provider_id: None,
                provider_spec: ProviderSpec {
                    value: self.provider_spec.clone(),
                },
            },
        }
    }
}

/// Builds a ControlPlaneMachineSet
#[derive(Clone, Debug)]
pub struct ControlPlaneMachineSetBuilder {
    name: String,
    namespace: String,
    replicas: i32,
    selector: LabelSelector,
    template: Option<MachineTemplateBuilder>,
}

impl Default for ControlPlaneMachineSetBuilder {
    fn default() -> Self {
        Self {
            name: CONTROL_PLANE_MACHINE_SET_NAME.to_string(),
            namespace: MACHINE_API_NAMESPACE.to_string(),
            replicas: 3,
            selector: LabelSelector {
                match_labels: Some(control_plane_labels()),
                match_expressions: None,
            },
            template: Some(MachineTemplateBuilder::new()),
        }
    }
}

impl ControlPlaneMachineSetBuilder {
    /// Start from a valid three replica AWS set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the replica count
    pub fn with_replicas(mut self, replicas: i32) -> Self {
        self.replicas = replicas;
        self
    }

    /// Set the selector
    pub fn with_selector(mut self, selector: LabelSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Set (or clear) the machine template
    pub fn with_template(mut self, template: Option<MachineTemplateBuilder>) -> Self {
        self.template = template;
        self
    }

    /// Build the ControlPlaneMachineSet
    pub fn build(&self) -> ControlPlaneMachineSet {
        ControlPlaneMachineSet {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                namespace: Some(self.namespace.clone()),
                ..Default::default()
            },
            spec: ControlPlaneMachineSetSpec {
                replicas: Some(self.replicas),
                state: ControlPlaneMachineSetState::Active,
                selector: self.selector.clone(),
                strategy: ControlPlaneMachineSetStrategy::default(),
                template: ControlPlaneMachineSetTemplate {
                    machine_type: Default::default(),
                    openshift_machine_v1beta1_machine: self
                        .template
                        .as_ref()
                        .map(MachineTemplateBuilder::build),
                },
            },
            status: None,
        }
    }
}
