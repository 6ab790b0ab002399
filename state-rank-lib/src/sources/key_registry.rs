use super::{LOG_TARGET, RawTable};
use crate::config::KeysSpec;
use crate::error::PipelineError;
use crate::metrics::{StateKey, normalize_label};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

const SOURCE_NAME: &str = "keys";

/// The set of known states, in source order, and every label that refers to them.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    keys: Vec<StateKey>,
    names: HashMap<StateKey, String>,
    lookup: HashMap<String, StateKey>,
}

impl KeyRegistry {
    /// Build the registry from the key source.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingKeyData`] if the source has no rows, a row has no key,
    /// or every key is excluded, and [`PipelineError::MissingColumn`] if a configured column
    /// is not in the header.
    pub fn load(table: &RawTable, spec: &KeysSpec) -> Result<Self, PipelineError> {
        if table.is_empty() {
            return Err(PipelineError::MissingKeyData {
                source_name: SOURCE_NAME.to_string(),
                reason: "the source has no rows".to_string(),
            });
        }

        let key_index = table
            .column_index(&spec.key_column)
            .ok_or_else(|| PipelineError::missing_column(SOURCE_NAME, &spec.key_column))?;

        let name_index = spec
            .name_column
            .as_deref()
            .map(|column| table.column_index(column).ok_or_else(|| PipelineError::missing_column(SOURCE_NAME, column)))
            .transpose()?;

        let alias_indices = spec
            .alias_columns
            .iter()
            .map(|column| table.column_index(column).ok_or_else(|| PipelineError::missing_column(SOURCE_NAME, column)))
            .collect::<Result<Vec<_>, _>>()?;

        let excluded: HashSet<String> = spec.exclude.iter().map(|key| normalize_label(key)).collect();

        let mut registry = Self::default();
        let mut seen = HashSet::new();
        for (row_number, row) in (1_usize..).zip(table.rows()) {
            let key = RawTable::cell(row, key_index);
            if key.is_empty() {
                return Err(PipelineError::MissingKeyData {
                    source_name: SOURCE_NAME.to_string(),
                    reason: format!("data row {row_number} has no value in column '{}'", spec.key_column),
                });
            }

            let normalized = normalize_label(key);
            if excluded.contains(&normalized) {
                log::debug!(target: LOG_TARGET, "Excluding key '{key}'");
                continue;
            }

            if !seen.insert(normalized) {
                log::warn!(target: LOG_TARGET, "Duplicate key '{key}' on data row {row_number} of the keys source, keeping the first");
                continue;
            }

            let key = StateKey::new(key);
            let name = name_index
                .map(|index| RawTable::cell(row, index))
                .filter(|name| !name.is_empty())
                .map_or_else(|| derive_display_name(key.as_str()), str::to_string);

            registry.register_alias(key.as_str(), &key);
            registry.register_alias(&name, &key);
            for &index in &alias_indices {
                registry.register_alias(RawTable::cell(row, index), &key);
            }

            let _ = registry.names.insert(key.clone(), name);
            registry.keys.push(key);
        }

        if registry.keys.is_empty() {
            return Err(PipelineError::MissingKeyData {
                source_name: SOURCE_NAME.to_string(),
                reason: "every key is excluded".to_string(),
            });
        }

        log::info!(target: LOG_TARGET, "Registered {} states with {} lookup labels", registry.keys.len(), registry.lookup.len());
        Ok(registry)
    }

    fn register_alias(&mut self, alias: &str, key: &StateKey) {
        let alias = normalize_label(alias);
        if alias.is_empty() {
            return;
        }

        match self.lookup.entry(alias) {
            Entry::Vacant(entry) => {
                let _ = entry.insert(key.clone());
            }
            Entry::Occupied(entry) => {
                if entry.get() != key {
                    log::warn!(target: LOG_TARGET,
                        "Label '{}' already refers to '{}', ignoring it for '{key}'", entry.key(), entry.get());
                }
            }
        }
    }

    /// Registered keys in source order.
    #[must_use]
    pub fn keys(&self) -> &[StateKey] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &StateKey) -> bool {
        self.names.contains_key(key)
    }

    #[must_use]
    pub fn display_name(&self, key: &StateKey) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Resolve a key, display name, or alias to its state.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Option<&StateKey> {
        self.lookup.get(&normalize_label(label))
    }
}

/// Turn a key like `washington_dc` into a display name like `Washington Dc`.
#[must_use]
pub fn derive_display_name(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
