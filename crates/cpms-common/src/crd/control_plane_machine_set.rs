//! ControlPlaneMachineSet Custom Resource Definition
//!
//! The ControlPlaneMachineSet is a cluster singleton (always named
//! `cluster`) declaring how many control plane machines exist, what they look
//! like, and which failure domains they are spread across.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::failure_domains::FailureDomains;
use super::machine::MachineSpec;

/// Field path of the OpenShift machine template, used in validation errors
pub const OPENSHIFT_MACHINE_V1BETA1_TEMPLATE_PATH: &str =
    "spec.template.machines_v1beta1_machine_openshift_io";

/// Specification for a ControlPlaneMachineSet
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "machine.openshift.io",
    version = "v1",
    kind = "ControlPlaneMachineSet",
    plural = "controlplanemachinesets",
    namespaced,
    status = "ControlPlaneMachineSetStatus",
    derive = "PartialEq",
    printcolumn = r#"{"name":"Desired","type":"integer","jsonPath":".spec.replicas"}"#,
    printcolumn = r#"{"name":"Ready","type":"integer","jsonPath":".status.readyReplicas"}"#,
    printcolumn = r#"{"name":"State","type":"string","jsonPath":".spec.state"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneMachineSetSpec {
    /// Desired number of control plane machines (3 or 5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Whether the set is actively managing machines
    #[serde(default)]
    pub state: ControlPlaneMachineSetState,

    /// Selects the control plane machines owned by this set
    pub selector: LabelSelector,

    /// How machines are replaced when the template changes
    #[serde(default)]
    pub strategy: ControlPlaneMachineSetStrategy,

    /// Template for new control plane machines
    pub template: ControlPlaneMachineSetTemplate,
}

/// Whether a ControlPlaneMachineSet manages its machines
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ControlPlaneMachineSetState {
    /// Machines are reconciled against the template
    Active,
    /// The set only observes
    #[default]
    Inactive,
}

/// Replacement strategy
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ControlPlaneMachineSetStrategy {
    /// Strategy type
    #[serde(rename = "type", default)]
    pub type_: ControlPlaneMachineSetStrategyType,
}

/// Replacement strategy type
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ControlPlaneMachineSetStrategyType {
    /// Replace one machine at a time, surging first
    #[default]
    RollingUpdate,
    /// Replace only when a machine is deleted
    OnDelete,
}

/// Union of supported machine templates, discriminated by `machineType`
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneMachineSetTemplate {
    /// Discriminator naming which template member is populated
    #[serde(default)]
    pub machine_type: ControlPlaneMachineSetMachineType,

    /// Template for `machine.openshift.io/v1beta1` Machines
    #[serde(
        rename = "machines_v1beta1_machine_openshift_io",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub openshift_machine_v1beta1_machine: Option<OpenShiftMachineV1Beta1MachineTemplate>,
}

/// Template member discriminator
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ControlPlaneMachineSetMachineType {
    /// `machine.openshift.io/v1beta1` Machines
    #[default]
    #[serde(rename = "machines_v1beta1_machine_openshift_io")]
    OpenShiftMachineV1Beta1Machine,
}

/// Template for `machine.openshift.io/v1beta1` control plane Machines
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftMachineV1Beta1MachineTemplate {
    /// Failure domains to spread machines across, with the platform hint
    #[serde(default)]
    pub failure_domains: FailureDomains,

    /// Labels and annotations copied to created machines
    #[serde(default)]
    pub metadata: ControlPlaneMachineSetTemplateObjectMeta,

    /// Machine spec, including the provider spec shared by all replicas
    #[serde(default)]
    pub spec: MachineSpec,
}

/// Subset of object metadata allowed on the template
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneMachineSetTemplateObjectMeta {
    /// Labels applied to created machines
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Annotations applied to created machines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

/// Status for a ControlPlaneMachineSet
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneMachineSetStatus {
    /// Generation last processed by the controller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Machines selected by this set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Machines backed by a ready node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_replicas: Option<i32>,

    /// Machines matching the current template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_replicas: Option<i32>,

    /// Machines that are not yet ready
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable_replicas: Option<i32>,
}

impl ControlPlaneMachineSetSpec {
    /// The v1beta1 machine template, if the union member is populated
    pub fn machine_template(&self) -> Option<&OpenShiftMachineV1Beta1MachineTemplate> {
        self.template.openshift_machine_v1beta1_machine.as_ref()
    }
}
