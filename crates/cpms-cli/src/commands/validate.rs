//! Validate command

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use cpms_common::crd::{ControlPlaneMachineSet, Machine};
use cpms_webhook::ControlPlaneMachineSetValidator;

use super::{load_manifest, load_manifests};
use crate::{Error, Result};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// ControlPlaneMachineSet manifest to validate
    #[arg(long)]
    pub cpms: PathBuf,

    /// Manifest holding the Machines in the set's namespace
    #[arg(long)]
    pub machines: PathBuf,

    /// Currently stored ControlPlaneMachineSet; validates an update when given
    #[arg(long)]
    pub old: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, out: &mut impl Write) -> Result<()> {
    let cpms: ControlPlaneMachineSet = load_manifest(&args.cpms)?;
    let machines: Vec<Machine> = load_manifests(&args.machines)?;
    let validator = ControlPlaneMachineSetValidator::new();

    let result = match &args.old {
        Some(old_path) => {
            let old: ControlPlaneMachineSet = load_manifest(old_path)?;
            info!(machines = machines.len(), "validating update");
            validator.validate_update(&old, &cpms, &machines)
        }
        None => {
            info!(machines = machines.len(), "validating create");
            validator.validate_create(&cpms, &machines)
        }
    };

    match result {
        Ok(()) => {
            writeln!(out, "admitted")?;
            Ok(())
        }
        Err(errors) => {
            writeln!(out, "rejected:")?;
            for error in errors.errors() {
                writeln!(out, "  - {error}")?;
            }
            Err(Error::rejected(errors.to_string()))
        }
    }
}
