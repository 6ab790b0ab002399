use super::Host;
use crate::Result;
use crate::config::{Config, DEFAULT_CONFIG_FILE_NAME};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `state-rank.toml` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE_NAME));

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}
