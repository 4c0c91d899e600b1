//! ControlPlaneMachineSet admission validation
//!
//! Create and update requests are validated against the rules below. Every
//! failure is collected, so a single response lists all problems at once.
//!
//! - the set is named `cluster`
//! - replicas is 3 or 5, and never changes on update
//! - the v1beta1 machine template is present and carries the cluster ID,
//!   role and type labels
//! - the selector matches the template labels, and never changes on update
//! - declared failure domains are exactly those the control plane machines
//!   occupy

use tracing::{debug, info};

use cpms_common::crd::{
    ControlPlaneMachineSet, Machine, OpenShiftMachineV1Beta1MachineTemplate,
    OPENSHIFT_MACHINE_V1BETA1_TEMPLATE_PATH,
};
use cpms_common::{
    CONTROL_PLANE_MACHINE_SET_NAME, MACHINE_CLUSTER_ID_LABEL, MACHINE_ROLE_LABEL,
    MACHINE_TYPE_LABEL,
};
use cpms_providers::{extract_failure_domains, FailureDomain};

use crate::balance::check_balance;
use crate::field::{FieldError, ValidationErrors};
use crate::selector;

/// Replica counts a control plane may have
const SUPPORTED_REPLICAS: &[&str] = &["3", "5"];

/// Validates ControlPlaneMachineSet create and update requests
///
/// Stateless; the caller supplies the Machines in the set's namespace.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPlaneMachineSetValidator;

impl ControlPlaneMachineSetValidator {
    /// Create a validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a ControlPlaneMachineSet being created
    pub fn validate_create(
        &self,
        cpms: &ControlPlaneMachineSet,
        machines: &[Machine],
    ) -> Result<(), ValidationErrors> {
        let errors = self.validate_spec(cpms, machines);
        log_outcome("create", cpms, &errors);
        errors.into_result()
    }

    /// Validate an update from `old` to `new`
    pub fn validate_update(
        &self,
        old: &ControlPlaneMachineSet,
        new: &ControlPlaneMachineSet,
        machines: &[Machine],
    ) -> Result<(), ValidationErrors> {
        let mut errors = self.validate_spec(new, machines);

        if old.spec.replicas != new.spec.replicas {
            errors.push(FieldError::forbidden(
                "spec.replicas",
                "control plane machine set replicas cannot be changed",
            ));
        }
        if old.spec.selector != new.spec.selector {
            errors.push(FieldError::forbidden(
                "spec.selector",
                "control plane machine set selector is immutable",
            ));
        }

        log_outcome("update", new, &errors);
        errors.into_result()
    }

    fn validate_spec(&self, cpms: &ControlPlaneMachineSet, machines: &[Machine]) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        let name = cpms.metadata.name.as_deref().unwrap_or_default();
        if name != CONTROL_PLANE_MACHINE_SET_NAME {
            errors.push(FieldError::invalid(
                "name",
                &name,
                "control plane machine set name must be cluster",
            ));
        }

        match cpms.spec.replicas {
            Some(3) | Some(5) => {}
            Some(other) => errors.push(FieldError::not_supported(
                "spec.replicas",
                other,
                SUPPORTED_REPLICAS,
            )),
            None => errors.push(FieldError::required("spec.replicas", "")),
        }

        match cpms.spec.machine_template() {
            Some(template) => {
                errors.extend(self.validate_template(cpms, template));
                errors.extend(self.validate_failure_domains(template, machines));
            }
            None => errors.push(FieldError::required(OPENSHIFT_MACHINE_V1BETA1_TEMPLATE_PATH, "")),
        }

        errors
    }

    fn validate_template(
        &self,
        cpms: &ControlPlaneMachineSet,
        template: &OpenShiftMachineV1Beta1MachineTemplate,
    ) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let labels_path = format!("{OPENSHIFT_MACHINE_V1BETA1_TEMPLATE_PATH}.metadata.labels");
        let labels = &template.metadata.labels;

        match selector::matches(&cpms.spec.selector, labels) {
            Ok(true) => {}
            Ok(false) => errors.push(FieldError::invalid(
                &labels_path,
                labels,
                "selector does not match template labels",
            )),
            Err(e) => errors.push(FieldError::invalid(
                "spec.selector",
                &cpms.spec.selector,
                format!("could not convert label selector to selector: {e}"),
            )),
        }

        for label in [MACHINE_CLUSTER_ID_LABEL, MACHINE_ROLE_LABEL, MACHINE_TYPE_LABEL] {
            if !labels.contains_key(label) {
                errors.push(FieldError::required(
                    &labels_path,
                    format!("{label} label is required"),
                ));
            }
        }

        errors
    }

    fn validate_failure_domains(
        &self,
        template: &OpenShiftMachineV1Beta1MachineTemplate,
        machines: &[Machine],
    ) -> Vec<FieldError> {
        let path = format!("{OPENSHIFT_MACHINE_V1BETA1_TEMPLATE_PATH}.failureDomains");

        let declared = &template.failure_domains;

        // An unsupported hint is only an error when domains are actually declared
        if !declared.declares_any() {
            debug!("no failure domains declared, skipping balance check");
            return Vec::new();
        }

        let desired = match FailureDomain::from_failure_domains(declared) {
            Ok(desired) => desired,
            Err(e) => {
                return vec![FieldError::invalid(
                    &path,
                    &declared.platform,
                    e.to_string(),
                )]
            }
        };
        if declared.is_empty() {
            debug!(platform = %declared.platform, "no failure domains declared for platform, skipping balance check");
            return Vec::new();
        }

        let control_plane: Vec<Machine> = machines
            .iter()
            .filter(|m| m.is_control_plane())
            .cloned()
            .collect();
        let in_use = match extract_failure_domains(&control_plane) {
            Ok(in_use) => in_use,
            Err(e) => {
                return vec![FieldError::invalid(
                    &path,
                    &declared.platform,
                    format!("could not check failure domains: {e}"),
                )]
            }
        };

        check_balance(&desired, &in_use)
            .messages()
            .into_iter()
            .map(|message| FieldError::forbidden(&path, message))
            .collect()
    }
}

fn log_outcome(operation: &str, cpms: &ControlPlaneMachineSet, errors: &ValidationErrors) {
    let name = cpms.metadata.name.as_deref().unwrap_or_default();
    if errors.is_empty() {
        debug!(operation, name, "control plane machine set admitted");
    } else {
        info!(operation, name, errors = %errors, "control plane machine set rejected");
    }
}
