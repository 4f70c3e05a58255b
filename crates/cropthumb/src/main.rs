//! cropthumb - write a fixed-size crop of every image in a directory tree.
//!
//! Source and destination come from the environment; the command line only
//! tunes logging.
//!
//! # Usage
//!
//! ```bash
//! IMG_DIR_PATH=./photos THUMB_DIR_PATH=./thumbs cropthumb
//!
//! # Reject images too small for a full 300x300 box instead of clipping
//! THUMB_CROP_POLICY=skip IMG_DIR_PATH=./photos THUMB_DIR_PATH=./thumbs cropthumb -v
//! ```

use clap::builder::FalseyValueParser;
use clap::Parser;

mod batch;
mod logging;

/// cropthumb - center-anchored thumbnails for a whole directory tree.
///
/// Reads IMG_DIR_PATH and THUMB_DIR_PATH from the environment.
#[derive(Parser, Debug)]
#[command(name = "cropthumb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, env = "CROPTHUMB_VERBOSE", value_parser = FalseyValueParser::new())]
    verbose: bool,

    /// Output logs and the run summary in JSON format
    #[arg(long, env = "CROPTHUMB_JSON_LOGS", value_parser = FalseyValueParser::new())]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Missing directories are fatal before anything else happens. Logging
    // isn't up yet, so the error is reported through main's return value.
    let config = cropthumb_core::Config::from_env()?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("cropthumb v{}", cropthumb_core::VERSION);
    if let Ok(rendered) = config.to_json() {
        tracing::trace!("Effective config: {}", rendered);
    }

    let json_summary = cli.json_logs || config.logging.format == "json";
    batch::execute(&config, json_summary)
}
