use std::{error::Error, path::PathBuf};

use clap::Parser;
use wordserve::{Config, protocol::ClientDriver};

#[derive(Debug, Parser)]
#[command(version, about = "Fetch all words from a word server and report frequencies")]
struct Cli {
    /// Path to the configuration file
    #[arg(default_value = "config.json")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let driver = ClientDriver::connect(
        config.server_addr()?,
        config.initial_offset()?,
        config.page_size()?,
    )?;

    // Partial counts from a lost connection are still printed.
    let freq = driver.run();
    print!("{freq}");

    Ok(())
}
