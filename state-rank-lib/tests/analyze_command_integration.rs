//! Integration tests for the `analyze` command.
//!
//! The sample data under `tests/fixtures/sample-data` mirrors the shape of the real
//! exports: transposed census tables, a Redfin sheet with a title line above the header,
//! an excluded national row, an alias-only match, a region with no registered state,
//! and missing-value markers.

use state_rank_lib::Host;
use std::fs;

const SAMPLE_DATA: &str = "tests/fixtures/sample-data";

/// Test host that captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn temp_file(dir: &tempfile::TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_csv_report_from_sample_data() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = temp_file(&temp_dir, "states.csv");

    let mut host = TestHost::default();
    let result = state_rank_lib::run(&mut host, ["state-rank", "analyze", "--data-dir", SAMPLE_DATA, "--csv", &csv_path]);
    assert!(result.is_ok(), "analyze should succeed: {result:?}");

    let csv = fs::read_to_string(&csv_path).expect("CSV report should exist");
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(
        lines,
        [
            "state_name,census_population,population_rank,median_household_income,median_household_income_rank,\
             median_sale_price,median_sale_price_rank,house_affordability_ratio,house_affordability_rank,blurb",
            "California,39029342,1,91905,2,830000,1,0.1107,4,\
             \"California ranks #1 in population, #2 in median household income, and #4 in housing affordability.\"",
            "Texas,30029572,2,73035,3,340000,3,0.2148,2,\
             \"Texas ranks #2 in population, #3 in median household income, and #2 in housing affordability.\"",
            "Wyoming,581381,5,72495,4,330000,4,0.2197,1,\
             \"Wyoming ranks #5 in population, #4 in median household income, and #1 in housing affordability.\"",
            "Washington Dc,671803,4,101722,1,650000,2,0.1565,3,\
             \"Washington Dc ranks #4 in population, #1 in median household income, and #3 in housing affordability.\"",
            "Puerto Rico,3221789,3,,,,,,,Puerto Rico ranks #3 in population.",
        ]
    );

    // the console is only used when no report file is requested
    assert!(host.output_buf.is_empty());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_json_report_uses_null_for_absent_values() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let json_path = temp_file(&temp_dir, "states.json");

    let mut host = TestHost::default();
    state_rank_lib::run(&mut host, ["state-rank", "analyze", "--data-dir", SAMPLE_DATA, "--json", &json_path]).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 5);

    let puerto_rico = &rows[4];
    assert_eq!(puerto_rico["state_name"], "Puerto Rico");
    assert_eq!(puerto_rico["census_population"], 3_221_789);
    assert!(puerto_rico["median_household_income"].is_null());
    assert!(puerto_rico["median_sale_price"].is_null());
    assert!(puerto_rico["house_affordability_ratio"].is_null());
    assert!(puerto_rico["house_affordability_rank"].is_null());

    assert_eq!(rows[2]["house_affordability_ratio"], 0.2197);
    assert_eq!(rows[2]["house_affordability_rank"], 1);
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_all_reports_at_once() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = temp_file(&temp_dir, "states.csv");
    let json_path = temp_file(&temp_dir, "states.json");
    let excel_path = temp_file(&temp_dir, "states.xlsx");

    let mut host = TestHost::default();
    state_rank_lib::run(
        &mut host,
        [
            "state-rank",
            "analyze",
            "--data-dir",
            SAMPLE_DATA,
            "--csv",
            &csv_path,
            "--json",
            &json_path,
            "--excel",
            &excel_path,
            "--console",
            "--color",
            "never",
        ],
    )
    .unwrap();

    assert!(fs::metadata(&csv_path).unwrap().len() > 0);
    assert!(fs::metadata(&json_path).unwrap().len() > 0);
    assert_eq!(&fs::read(&excel_path).unwrap()[0..2], b"PK");

    let output = host.output_str();
    assert!(output.starts_with("state_name"));
    assert!(output.contains("Median sale prices as of March 2024"));
    assert!(!output.contains("\x1b["));
}

#[test]
fn test_console_is_the_default_report() {
    let mut host = TestHost::default();
    state_rank_lib::run(&mut host, ["state-rank", "analyze", "--data-dir", SAMPLE_DATA, "--color", "never"]).unwrap();

    let output = host.output_str();
    let table_lines: Vec<_> = output.lines().take_while(|line| !line.is_empty()).collect();
    assert_eq!(table_lines.len(), 6);
    assert!(table_lines[1].starts_with("California "));
    assert!(output.contains("  Puerto Rico ranks #3 in population.\n"));
    assert!(!output.contains("Guam"));
    assert!(!output.contains("United States"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_custom_configuration() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let dir = temp_dir.path();

    fs::write(dir.join("keys.tsv"), "code\tname\nCA\tCalifornia\nTX\tTexas\nWY\tWyoming\n").unwrap();
    fs::write(dir.join("population.csv"), "state,people\nCA,39000000\nTX,30000000\nWY,580000\n").unwrap();
    fs::write(dir.join("income.csv"), "state,income\nCalifornia,85000\nTexas,67000\nWyoming,67000\n").unwrap();
    fs::write(dir.join("prices.csv"), "state,price\nCA,650000\nTX,330000\n").unwrap();
    fs::write(
        dir.join("state-rank.toml"),
        r#"
[keys]
path = "keys.tsv"
delimiter = "\t"
key_column = "code"
name_column = "name"

[sources.population]
path = "population.csv"
layout = { strategy = "column", key_column = "state", value_column = "people" }

[sources.income]
path = "income.csv"
layout = { strategy = "column", key_column = "state", value_column = "income" }

[sources.sale_price]
path = "prices.csv"
layout = { strategy = "column", key_column = "state", value_column = "price" }

[sources.sale_price.fallback]
WY = 300000

[ranking.income]
ties = "competition"

[ranking.affordability]
direction = "low_is_best"

[affordability]
formula = "price_over_income"

[output]
ratio_decimals = 2
group_digits = true
currency_prefix = "$"
"#,
    )
    .unwrap();

    let csv_path = temp_file(&temp_dir, "out.csv");
    let data_dir = dir.to_string_lossy().into_owned();

    let mut host = TestHost::default();
    state_rank_lib::run(&mut host, ["state-rank", "analyze", "--data-dir", &data_dir, "--csv", &csv_path]).unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = csv.lines().collect();

    // price over income: CA 7.65, TX 4.93, WY 4.48; lower is more affordable
    assert!(lines[1].starts_with("California,\"39,000,000\",1,\"$85,000\",1,\"$650,000\",1,7.65,3,"), "{}", lines[1]);
    assert!(lines[2].starts_with("Texas,\"30,000,000\",2,\"$67,000\",2,\"$330,000\",2,4.93,2,"), "{}", lines[2]);
    assert!(lines[3].starts_with("Wyoming,\"580,000\",3,\"$67,000\",2,\"$300,000\",3,4.48,1,"), "{}", lines[3]);
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_malformed_value_fails_without_output() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let dir = temp_dir.path();
    for name in ["KEYS.csv", "CENSUS_POPULATION_STATE.csv", "REDFIN_MEDIAN_SALE_PRICE.csv"] {
        let _ = fs::copy(format!("{SAMPLE_DATA}/{name}"), dir.join(name)).unwrap();
    }
    fs::write(
        dir.join("CENSUS_MHI_STATE.csv"),
        "Label,Texas!!Median income (dollars)!!Estimate\nHouseholds,\"10,490,553\"\nMedian income,unknown\n",
    )
    .unwrap();

    let csv_path = temp_file(&temp_dir, "out.csv");
    let data_dir = dir.to_string_lossy().into_owned();

    let mut host = TestHost::default();
    let err = state_rank_lib::run(&mut host, ["state-rank", "analyze", "--data-dir", &data_dir, "--csv", &csv_path]).unwrap_err();

    assert!(err.to_string().contains("building the state table"), "{err}");
    assert!(!std::path::Path::new(&csv_path).exists());
}
