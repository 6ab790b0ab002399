use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use crate::Result;
use crate::config::Config;
use crate::metrics::Metric;
use crate::pipeline::{SourceTables, execute};
use crate::reports::{OutputTable, generate_console, generate_csv, generate_json, generate_xlsx};
use crate::sources::RawTable;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use ohno::{IntoAppError, app_err};
use std::fs;
use std::io::{BufReader, Write};
use tempfile::NamedTempFile;

const LOG_TARGET: &str = "   analyze";

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory holding the source files and, optionally, `state-rank.toml`
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub data_dir: Utf8PathBuf,

    /// Path to configuration file (default is `state-rank.toml` in the data directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// State key source, overriding the configured path
    #[arg(long, value_name = "PATH", help_heading = "Sources")]
    pub keys: Option<Utf8PathBuf>,

    /// Population source, overriding the configured path
    #[arg(long, value_name = "PATH", help_heading = "Sources")]
    pub population: Option<Utf8PathBuf>,

    /// Median household income source, overriding the configured path
    #[arg(long, value_name = "PATH", help_heading = "Sources")]
    pub income: Option<Utf8PathBuf>,

    /// Median sale price source, overriding the configured path
    #[arg(long, value_name = "PATH", help_heading = "Sources")]
    pub sale_price: Option<Utf8PathBuf>,

    /// Output the state table to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the state table to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the state table to an Excel spreadsheet file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub excel: Option<Utf8PathBuf>,

    /// Output the state table to the console.
    /// This is the default when no report file is requested.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

impl AnalyzeArgs {
    /// Where a source is read from: the command-line override, or the configured path
    /// relative to the data directory.
    fn source_path(&self, metric: Option<Metric>, configured: &Utf8Path) -> Utf8PathBuf {
        let overridden = match metric {
            None => self.keys.as_ref(),
            Some(Metric::Population) => self.population.as_ref(),
            Some(Metric::Income) => self.income.as_ref(),
            Some(Metric::SalePrice) => self.sale_price.as_ref(),
            Some(Metric::Affordability) => None,
        };

        overridden.cloned().unwrap_or_else(|| self.data_dir.join(configured))
    }
}

/// Build the ranked state table and write the requested reports.
///
/// # Errors
///
/// Returns an error if the configuration or a source cannot be read, if the pipeline
/// hits a fatal data problem, or if a report cannot be written
pub fn analyze<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(&args.data_dir, args.config.as_ref())?;
    let tables = read_sources(args, &config)?;

    let table = execute(&config, &tables).into_app_err("building the state table")?;
    log::info!(target: LOG_TARGET, "Assembled {} state records", table.records.len());

    report(host, args, &config, &table)
}

fn read_sources(args: &AnalyzeArgs, config: &Config) -> Result<SourceTables> {
    let keys = &config.keys;
    let keys = read_table(
        "keys",
        &args.source_path(None, &keys.path),
        keys.delimiter_byte(),
        keys.header_row,
    )?;

    let read_metric = |metric: Metric| -> Result<RawTable> {
        let source = config
            .sources
            .get(metric)
            .ok_or_else(|| app_err!("no source is configured for {metric}"))?;
        read_table(
            &metric.to_string(),
            &args.source_path(Some(metric), &source.path),
            source.delimiter_byte(),
            source.header_row,
        )
    };

    Ok(SourceTables {
        keys,
        population: read_metric(Metric::Population)?,
        income: read_metric(Metric::Income)?,
        sale_price: read_metric(Metric::SalePrice)?,
    })
}

fn read_table(source_name: &str, path: &Utf8Path, delimiter: Option<u8>, header_row: usize) -> Result<RawTable> {
    let delimiter = delimiter.ok_or_else(|| app_err!("the {source_name} source needs a single ASCII delimiter"))?;

    let file = fs::File::open(path).into_app_err_with(|| format!("opening {source_name} source '{path}'"))?;
    let table = RawTable::from_reader(BufReader::new(file), delimiter, header_row, source_name)
        .into_app_err_with(|| format!("reading {source_name} source '{path}'"))?;

    log::info!(target: LOG_TARGET, "Read {} data rows from {source_name} source '{path}'", table.rows().len());
    Ok(table)
}

fn report<H: Host>(host: &mut H, args: &AnalyzeArgs, config: &Config, table: &OutputTable) -> Result<()> {
    let output = &config.output;

    // Everything is rendered before anything is written
    let mut files: Vec<(&Utf8PathBuf, Vec<u8>)> = Vec::new();

    if let Some(path) = &args.csv {
        let mut text = String::new();
        generate_csv(table, output, &mut text)?;
        files.push((path, text.into_bytes()));
    }

    if let Some(path) = &args.json {
        let mut text = String::new();
        generate_json(table, output, &mut text)?;
        files.push((path, text.into_bytes()));
    }

    if let Some(path) = &args.excel {
        let mut data = Vec::new();
        generate_xlsx(table, output, &mut data)?;
        files.push((path, data));
    }

    let console = if args.console || files.is_empty() {
        let mut text = String::new();
        generate_console(table, output, args.color.use_colors(), &mut text)?;
        Some(text)
    } else {
        None
    };

    // reports only replace their targets once every one of them has been written out
    let staged = files
        .iter()
        .map(|(path, contents)| stage_report(path, contents).map(|file| (*path, file)))
        .collect::<Result<Vec<_>>>()?;

    for (path, file) in staged {
        let _ = file.persist(path).into_app_err_with(|| format!("moving report into place at '{path}'"))?;
        log::info!(target: LOG_TARGET, "Wrote report '{path}'");
    }

    if let Some(text) = console {
        let _ = write!(host.output(), "{text}");
    }

    Ok(())
}

/// Write a report to a temporary file next to its destination.
fn stage_report(path: &Utf8Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = path.parent().filter(|dir| !dir.as_str().is_empty()).unwrap_or_else(|| Utf8Path::new("."));

    let mut file = NamedTempFile::new_in(dir).into_app_err_with(|| format!("creating a temporary file for report '{path}'"))?;
    file.write_all(contents).into_app_err_with(|| format!("writing report to '{path}'"))?;

    // temporary files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .into_app_err_with(|| format!("setting permissions of report '{path}'"))?;
    }

    Ok(file)
}
