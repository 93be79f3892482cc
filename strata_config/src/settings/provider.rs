//! Named sources of configuration values for settings population.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::StrataResult;
use crate::manager::ConfigManager;

use super::cell::SettingsCell;

static NO_PAIRS: BTreeMap<String, String> = BTreeMap::new();

/// A named source that can populate settings instances.
///
/// Providers either expose a flat key-value table (keys shaped
/// `<SettingsName>.<field>`, applied through the default [`ValueProvider::populate`])
/// or override `populate` to write the instance directly, as the
/// section-bridging [`SectionProvider`] does. Providers are immutable once
/// registered; their tables are filled at construction. A provider whose
/// source had nothing to offer simply contributes zero pairs.
pub trait ValueProvider {
    /// Source name, used in diagnostics and logging.
    fn name(&self) -> &str;

    /// The flat key-value view of this source.
    fn pairs(&self) -> &BTreeMap<String, String> {
        &NO_PAIRS
    }

    /// Write matching values into one settings instance.
    ///
    /// # Errors
    ///
    /// Propagates the cell's population failure (coercion or section
    /// mismatch), which aborts the registry's population pass.
    fn populate(&self, cell: &mut dyn SettingsCell) -> StrataResult<()> {
        cell.apply_pairs(self.pairs())
    }
}

/// Key-value provider over any pre-fetched in-memory table.
///
/// This is the conforming shape for external sources: connection-string
/// tables, host app-settings stores, or database rows fetched ahead of time
/// by their own access layer (which owns any retry policy and should hand
/// over an empty table rather than fail the pipeline).
pub struct TableProvider {
    name: String,
    values: BTreeMap<String, String>,
}

impl TableProvider {
    /// Build a provider from `(key, value)` pairs.
    pub fn new<I, K, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ValueProvider for TableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn pairs(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Key-value provider snapshotting the process environment at construction.
///
/// An optional prefix selects which variables participate; after stripping
/// `<prefix>__`, the first `__` becomes the `.` separator, so with prefix
/// `APP` the variable `APP__ServiceSettings__timeout` supplies
/// `ServiceSettings.timeout`. Matching against field names is exact.
/// Construction never fails; variables that do not fit the shape, or whose
/// name or value is not valid Unicode, are skipped.
pub struct EnvironmentProvider {
    values: BTreeMap<String, String>,
}

impl EnvironmentProvider {
    /// Snapshot all variables shaped `<Settings>__<field>`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// Snapshot variables carrying `prefix`, e.g. `APP__Settings__field`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        let qualified = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}__")
        };
        let mut values = BTreeMap::new();
        for (key, value) in std::env::vars_os() {
            // Non-Unicode entries cannot match the pair shape; skip them.
            let (Some(name), Some(text)) = (key.to_str(), value.to_str()) else {
                continue;
            };
            let Some(remainder) = name.strip_prefix(&qualified) else {
                continue;
            };
            if let Some((settings, field)) = remainder.split_once("__")
                && !settings.is_empty()
                && !field.is_empty()
            {
                values.insert(format!("{settings}.{field}"), text.to_owned());
            }
        }
        Self { values }
    }
}

impl Default for EnvironmentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueProvider for EnvironmentProvider {
    fn name(&self) -> &str {
        "process environment"
    }

    fn pairs(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Provider bridging the section accessor over the resolved environment.
///
/// For each settings instance whose declared name is a section of the active
/// environment, the section's JSON merges over the instance. Instances whose
/// section is absent are left untouched.
pub struct SectionProvider {
    manager: Arc<ConfigManager>,
}

impl SectionProvider {
    /// Bridge the given manager's active environment.
    #[must_use]
    pub const fn new(manager: Arc<ConfigManager>) -> Self {
        Self { manager }
    }
}

impl ValueProvider for SectionProvider {
    fn name(&self) -> &str {
        "configuration sections"
    }

    fn populate(&self, cell: &mut dyn SettingsCell) -> StrataResult<()> {
        cell.apply_section(&self.manager)
    }
}
