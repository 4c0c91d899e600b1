//! cpms CLI
//!
//! Offline validation and rendering of ControlPlaneMachineSet manifests.

use clap::Parser;

use cpms_cli::{Cli, Result};
use cpms_common::telemetry::{init_telemetry, TelemetryConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_telemetry(TelemetryConfig {
        service_name: "cpms".to_string(),
        log_format: cli.log_format,
        ..Default::default()
    })?;

    cli.run()
}
