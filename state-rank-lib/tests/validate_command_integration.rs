//! Integration tests for the `init` and `validate` commands.

use state_rank_lib::Host;
use std::fs;

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

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
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

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_init_then_validate() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("state-rank.toml").to_string_lossy().into_owned();

    let mut host = TestHost::default();
    state_rank_lib::run(&mut host, ["state-rank", "init", &config_path]).unwrap();
    assert!(host.output_str().contains("Generated default configuration file"));

    let mut host = TestHost::default();
    state_rank_lib::run(&mut host, ["state-rank", "validate", "-c", &config_path]).unwrap();

    let output = host.output_str();
    assert!(output.contains("Configuration file is valid"), "{output}");
    assert!(output.contains(&config_path), "{output}");
    assert_eq!(host.exit_code, None);
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_validate_finds_config_in_data_dir() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data_dir = temp_dir.path().to_string_lossy().into_owned();

    let mut host = TestHost::default();
    state_rank_lib::run(&mut host, ["state-rank", "validate", "--data-dir", &data_dir]).unwrap();
    assert!(host.output_str().contains("Using default configuration"));

    fs::write(temp_dir.path().join("state-rank.toml"), state_rank_lib::config::DEFAULT_CONFIG_TOML).unwrap();

    let mut host = TestHost::default();
    state_rank_lib::run(&mut host, ["state-rank", "validate", "--data-dir", &data_dir]).unwrap();
    assert!(host.output_str().contains("state-rank.toml"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_validate_rejects_ambiguous_row_selection() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("bad.toml");
    let text = state_rank_lib::config::DEFAULT_CONFIG_TOML.replacen("row_index = 1", "row_index = 1\nrow_label = \"Total population\"", 1);
    fs::write(&config_path, text).unwrap();

    let mut host = TestHost::default();
    let config_path = config_path.to_string_lossy().into_owned();
    let result = state_rank_lib::run(&mut host, ["state-rank", "validate", "--config", &config_path]);

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    let errors = host.error_str();
    assert!(errors.contains("Configuration validation failed"), "{errors}");
    assert!(errors.contains("row_label"), "{errors}");
}
