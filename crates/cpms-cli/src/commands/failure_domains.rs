//! Failure domains command

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use cpms_common::crd::Machine;
use cpms_providers::extract_failure_domains;

use super::load_manifests;
use crate::Result;

#[derive(Args, Debug)]
pub struct FailureDomainsArgs {
    /// Manifest holding the Machines to inspect
    #[arg(long)]
    pub machines: PathBuf,
}

/// Print `<machine>\t<failure domain>` for every control plane Machine
pub fn run(args: FailureDomainsArgs, out: &mut impl Write) -> Result<()> {
    let machines: Vec<Machine> = load_manifests(&args.machines)?;
    let control_plane: Vec<Machine> = machines
        .into_iter()
        .filter(Machine::is_control_plane)
        .collect();
    info!(machines = control_plane.len(), "extracting failure domains");

    let domains = extract_failure_domains(&control_plane)?;
    for (machine, domain) in control_plane.iter().zip(&domains) {
        writeln!(out, "{}\t{domain}", machine.display_name())?;
    }
    Ok(())
}
