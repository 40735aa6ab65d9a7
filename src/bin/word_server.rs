use std::{error::Error, path::PathBuf, process};

use clap::Parser;
use log::info;
use wordserve::{Config, WordSequence, protocol::WordServer};

#[derive(Debug, Parser)]
#[command(version, about = "Serve pages of words from a token file over TCP")]
struct Cli {
    /// Path to the configuration file
    #[arg(default_value = "config.json")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let words = WordSequence::load(config.source_path()?)?;
    info!("loaded {} words", words.len());

    let server = WordServer::new(config.server_addr()?, words);

    // The accept loop only ends with the process.
    ctrlc::set_handler(|| {
        info!("shutting down");
        process::exit(0);
    })?;

    server.listen()?;
    Ok(())
}
