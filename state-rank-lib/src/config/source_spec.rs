use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const fn default_delimiter() -> char {
    ','
}

/// Where the state keys come from and which columns identify a state.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeysSpec {
    /// Path of the key source, relative to the data directory
    pub path: Utf8PathBuf,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Index of the header record; records above it are ignored
    #[serde(default)]
    pub header_row: usize,

    /// Column holding the canonical state key
    pub key_column: String,

    /// Column holding the display name; derived from the key when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_column: Option<String>,

    /// Columns holding alternative spellings other sources use for a state
    #[serde(default)]
    pub alias_columns: Vec<String>,

    /// Keys dropped from the registry
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl KeysSpec {
    #[must_use]
    pub fn delimiter_byte(&self) -> Option<u8> {
        ascii_byte(self.delimiter)
    }
}

/// Where one metric comes from and how to pull a value per state out of it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    /// Path of the source, relative to the data directory
    pub path: Utf8PathBuf,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Index of the header record; records above it are ignored
    #[serde(default)]
    pub header_row: usize,

    /// How states and values are laid out in the source
    pub layout: Layout,

    /// Cell contents that mean "no value" rather than a malformed number
    #[serde(default)]
    pub missing_markers: Vec<String>,

    /// Values used for states the source has no value for
    #[serde(default)]
    pub fallback: BTreeMap<String, f64>,
}

impl SourceSpec {
    #[must_use]
    pub fn delimiter_byte(&self) -> Option<u8> {
        ascii_byte(self.delimiter)
    }
}

/// The extraction strategy for a source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Layout {
    /// One row per state, with the value in a named column
    Column { key_column: String, value_column: String },

    /// One row per state, with one column per period after the key column, oldest first.
    /// The newest non-empty period supplies the value.
    LatestNonEmpty { key_column: String },

    /// One column per state headed `<state><header_suffix>`, with the value taken from a
    /// single data row. The first column holds row labels.
    Transposed {
        #[serde(default)]
        header_suffix: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        row_label: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        row_index: Option<usize>,
    },
}

fn ascii_byte(c: char) -> Option<u8> {
    u8::try_from(c).ok().filter(u8::is_ascii)
}
