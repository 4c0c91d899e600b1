//! Render command

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use cpms_common::crd::ControlPlaneMachineSet;
use cpms_providers::mapping::specialize_for_replicas;
use cpms_providers::{FailureDomain, ProviderConfig};

use super::load_manifest;
use crate::{Error, Result};

/// Replica count used when the set leaves `spec.replicas` unset
const DEFAULT_REPLICAS: i32 = 3;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// ControlPlaneMachineSet manifest to render
    #[arg(long)]
    pub cpms: PathBuf,
}

/// Print a JSON object of replica index to the provider spec that replica
/// would be created with
pub fn run(args: RenderArgs, out: &mut impl Write) -> Result<()> {
    let cpms: ControlPlaneMachineSet = load_manifest(&args.cpms)?;
    let template = cpms.spec.machine_template().ok_or_else(|| {
        Error::invalid_manifest(
            &args.cpms,
            "spec.template.machines_v1beta1_machine_openshift_io is not set",
        )
    })?;

    let base = ProviderConfig::from_machine_template(template)?;
    let domains = if template.failure_domains.declares_any() {
        FailureDomain::from_failure_domains(&template.failure_domains)?
    } else {
        Vec::new()
    };

    let replicas = cpms.spec.replicas.unwrap_or(DEFAULT_REPLICAS);
    let replicas = u32::try_from(replicas).map_err(|_| {
        Error::invalid_manifest(
            &args.cpms,
            format!("spec.replicas must not be negative, got {replicas}"),
        )
    })?;
    info!(replicas, failure_domains = domains.len(), "rendering provider specs");

    let mut rendered = serde_json::Map::new();
    for (index, config) in specialize_for_replicas(&base, replicas, &domains)? {
        rendered.insert(index.to_string(), config.to_provider_spec_value()?);
    }

    serde_json::to_writer_pretty(&mut *out, &rendered)?;
    writeln!(out)?;
    Ok(())
}
