//! Resource definitions read by the control plane machine set core
//!
//! The core never creates or stores these; it decodes them from manifests or
//! from objects handed over by the admission and reconcile layers.

mod control_plane_machine_set;
pub mod failure_domains;
mod machine;
pub mod providers;
mod types;

pub use control_plane_machine_set::{
    ControlPlaneMachineSet, ControlPlaneMachineSetMachineType, ControlPlaneMachineSetSpec,
    ControlPlaneMachineSetState, ControlPlaneMachineSetStatus, ControlPlaneMachineSetStrategy,
    ControlPlaneMachineSetStrategyType, ControlPlaneMachineSetTemplate,
    ControlPlaneMachineSetTemplateObjectMeta, OpenShiftMachineV1Beta1MachineTemplate,
    OPENSHIFT_MACHINE_V1BETA1_TEMPLATE_PATH,
};
pub use failure_domains::{
    AwsFailureDomain, AwsFailureDomainPlacement, AwsResourceFilter, AzureFailureDomain,
    FailureDomains, GcpFailureDomain,
};
pub use machine::{Machine, MachineSpec, MachineStatus, ProviderSpec};
pub use providers::{
    AwsMachineProviderConfig, AzureMachineProviderSpec, GcpMachineProviderSpec,
    AWS_PROVIDER_CONFIG_KIND, AZURE_PROVIDER_SPEC_KIND, GCP_PROVIDER_SPEC_KIND,
};
pub use types::PlatformType;
