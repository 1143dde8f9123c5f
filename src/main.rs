use clap::Parser;

use sai::cli::{run, Args};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    run(args)?;

    Ok(())
}
