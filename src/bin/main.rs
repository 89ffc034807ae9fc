use std::path;

use clap::Parser;
use crater_rs::{CraterConfig, Hdf5SnapshotWriter, SimSetup};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
pub struct Cli {
    /// The path to the config file to read
    #[clap(parse(from_os_str))]
    pub config: path::PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // parse command line parameters
    let args = Cli::parse();

    // read configuration
    let config = CraterConfig::from_file(&args.config)?;

    // Setup simulation
    let setup = SimSetup::from_config(&config, Hdf5SnapshotWriter)?;
    let domain = setup.domain();
    info!(
        lower_left = %domain.lower_left(),
        upper_right = %domain.upper_right(),
        num_cells = setup.initial_state().cells.len(),
        num_diagnostics = setup.diagnostics().len(),
        "Simulation set up"
    );

    // Hand the initial state over to the hydro engine
    setup.write_initial_snapshot()?;

    println!("Done!");
    Ok(())
}
