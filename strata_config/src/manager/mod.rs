//! Typed access to the active environment of a resolved configuration.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{StrataError, StrataResult};
use crate::document::EnvironmentSections;
use crate::merge::{ResolvedConfig, merge_value};
use crate::sections::{
    APP_SETTINGS_SECTION, AppSettings, CONNECTION_STRINGS_SECTION, ConnectionStrings, SectionName,
};
use crate::source::ConfigSource;

mod builder;

pub use builder::ConfigManagerBuilder;

static NO_SECTIONS: BTreeMap<String, Value> = BTreeMap::new();

/// Read-only view over the active environment of a [`ResolvedConfig`].
///
/// Construction guarantees the resolved-config invariant (a non-empty active
/// environment present in the merged set), so every accessor operates against
/// a real environment. The manager is immutable; concurrent reads from
/// multiple threads are safe.
#[derive(Debug)]
pub struct ConfigManager {
    resolved: ResolvedConfig,
    active: String,
    connection_strings: OnceLock<StrataResult<ConnectionStrings>>,
    app_settings: OnceLock<StrataResult<AppSettings>>,
}

impl ConfigManager {
    /// Start building a manager from ordered sources.
    #[must_use]
    pub fn builder() -> ConfigManagerBuilder {
        ConfigManagerBuilder::default()
    }

    /// Construct from ordered JSON sources and an optional explicit
    /// environment override.
    ///
    /// Sources fold in iteration order; later sources win conflicts. This is
    /// the short form of [`ConfigManager::builder`] for callers that need no
    /// base directory or marker.
    ///
    /// # Errors
    ///
    /// Propagates any [`StrataError`] from reading, parsing, folding, or
    /// environment resolution.
    pub fn from_documents<I, S>(sources: I, environment: Option<&str>) -> StrataResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<ConfigSource>,
    {
        let mut builder = Self::builder();
        for source in sources {
            builder = builder.source(source);
        }
        if let Some(name) = environment {
            builder = builder.explicit_environment(name);
        }
        builder.build()
    }

    /// Wrap an already-resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NoActiveEnvironment`] or
    /// [`StrataError::UnknownEnvironment`] when the resolved-config invariant
    /// does not hold.
    pub fn from_resolved(resolved: ResolvedConfig) -> StrataResult<Self> {
        let active = resolved
            .active_environment()
            .ok_or_else(|| Arc::new(StrataError::NoActiveEnvironment))?
            .to_owned();
        if !resolved.contains_environment(&active) {
            return Err(StrataError::unknown_environment(
                active,
                resolved.environments().keys().map(String::as_str),
            ));
        }
        Ok(Self {
            resolved,
            active,
            connection_strings: OnceLock::new(),
            app_settings: OnceLock::new(),
        })
    }

    /// Name of the active environment.
    #[must_use]
    pub fn active_environment_name(&self) -> &str {
        &self.active
    }

    /// The underlying merged environment set.
    #[must_use]
    pub const fn resolved(&self) -> &ResolvedConfig {
        &self.resolved
    }

    /// Whether the active environment defines `section`.
    #[must_use]
    pub fn contains(&self, section: &str) -> bool {
        self.active_sections().contains_key(section)
    }

    /// Raw JSON value of `section` within the active environment.
    #[must_use]
    pub fn section_value(&self, section: &str) -> Option<&Value> {
        self.active_sections().get(section)
    }

    /// Deserialize `section` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::SectionNotFound`] when the section is absent
    /// and [`StrataError::SectionTypeMismatch`] when its JSON shape cannot
    /// populate `T`.
    pub fn get<T: DeserializeOwned>(&self, section: &str) -> StrataResult<T> {
        let value = self
            .section_value(section)
            .ok_or_else(|| StrataError::section_not_found(section, &self.active))?;
        serde_json::from_value(value.clone())
            .map_err(|e| StrataError::section_type_mismatch(section, e))
    }

    /// Populate an existing instance from `section`, merge-into style.
    ///
    /// Fields of `target` absent from the section's JSON keep their prior
    /// values, so callers can pre-configure defaults before population.
    /// Returns the populated instance.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConfigManager::get`]; additionally a
    /// [`StrataError::SectionTypeMismatch`] when `target` itself does not
    /// serialize to JSON.
    pub fn populate<T>(&self, section: &str, target: T) -> StrataResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let overlay = self
            .section_value(section)
            .ok_or_else(|| StrataError::section_not_found(section, &self.active))?
            .clone();
        let mut merged = serde_json::to_value(&target)
            .map_err(|e| StrataError::section_type_mismatch(section, e))?;
        merge_value(&mut merged, overlay);
        serde_json::from_value(merged).map_err(|e| StrataError::section_type_mismatch(section, e))
    }

    /// Deserialize the section named by `T`'s [`SectionName`] declaration.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConfigManager::get`].
    pub fn get_named<T: SectionName + DeserializeOwned>(&self) -> StrataResult<T> {
        self.get(T::NAME)
    }

    /// Typed view over the `connectionStrings` section, computed lazily and
    /// cached after first access.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConfigManager::get`], re-surfaced on every
    /// call when the first computation failed.
    pub fn connection_strings(&self) -> StrataResult<&ConnectionStrings> {
        self.connection_strings
            .get_or_init(|| self.get(CONNECTION_STRINGS_SECTION))
            .as_ref()
            .map_err(Arc::clone)
    }

    /// Typed view over the `appSettings` section, computed lazily and cached
    /// after first access.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConfigManager::get`], re-surfaced on every
    /// call when the first computation failed.
    pub fn app_settings(&self) -> StrataResult<&AppSettings> {
        self.app_settings
            .get_or_init(|| self.get(APP_SETTINGS_SECTION))
            .as_ref()
            .map_err(Arc::clone)
    }

    fn active_sections(&self) -> &EnvironmentSections {
        // The constructor invariant makes the lookup infallible; the empty
        // fallback keeps the accessor panic-free regardless.
        self.resolved.environment(&self.active).unwrap_or(&NO_SECTIONS)
    }
}
