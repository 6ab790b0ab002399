use super::Host;
use crate::Result;
use crate::config::{Config, DEFAULT_CONFIG_FILE_NAME};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `state-rank.toml` in the data directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory searched for `state-rank.toml` when no path is given
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub data_dir: Utf8PathBuf,
}

/// Load a configuration file and report whether it is valid.
///
/// On failure the problem is written to the host's error stream and the host exits with code 1.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, parsed, or validated
pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match Config::load(&args.data_dir, config_path) {
        Ok(_) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else if args.data_dir.join(DEFAULT_CONFIG_FILE_NAME).exists() {
                let _ = writeln!(host.output(), "Config file: {}", args.data_dir.join(DEFAULT_CONFIG_FILE_NAME));
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
