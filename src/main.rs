//! CLI entry point for grain segmentation of synthetic orientation maps

use clap::Parser;
use grainseg::io::cli::{Cli, Runner};

// The report is the program's output
#[allow(clippy::print_stdout)]
fn main() -> grainseg::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let report = Runner::new(cli).run()?;
    print!("{report}");
    Ok(())
}
