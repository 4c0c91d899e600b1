//! Common types for the control plane machine set core: resources, errors,
//! logging setup and label constants

#![deny(missing_docs)]

pub mod crd;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;
pub mod telemetry;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The only name a ControlPlaneMachineSet may have; it is a cluster singleton
pub const CONTROL_PLANE_MACHINE_SET_NAME: &str = "cluster";

/// Namespace the machine API resources live in
pub const MACHINE_API_NAMESPACE: &str = "openshift-machine-api";

/// Label identifying the cluster a machine belongs to
pub const MACHINE_CLUSTER_ID_LABEL: &str = "machine.openshift.io/cluster-api-cluster";

/// Label carrying the machine role
pub const MACHINE_ROLE_LABEL: &str = "machine.openshift.io/cluster-api-machine-role";

/// Label carrying the machine type
pub const MACHINE_TYPE_LABEL: &str = "machine.openshift.io/cluster-api-machine-type";

/// Role (and type) label value for control plane machines
pub const MASTER_MACHINE_ROLE: &str = "master";

/// Role (and type) label value for worker machines
pub const WORKER_MACHINE_ROLE: &str = "worker";
