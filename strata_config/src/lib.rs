//! Environment-layered JSON configuration resolution and typed settings
//! aggregation.
//!
//! The crate has two coupled halves:
//!
//! - **Resolution**: an ordered list of JSON documents folds into a single
//!   environment set ([`ResolvedConfig`]) with per-document base-environment
//!   inheritance; one environment is then resolved as active and served
//!   through the typed section accessors of [`ConfigManager`].
//! - **Aggregation**: a [`SettingsRegistry`] holds ordered [`ValueProvider`]s
//!   and one instance per registered [`Settings`] type, populating fields
//!   from key-value tables, the process environment, or the resolved
//!   configuration itself, then running each instance's validation hook.
//!
//! ```rust
//! use strata_config::ConfigManager;
//!
//! # fn main() -> strata_config::StrataResult<()> {
//! let manager = ConfigManager::from_documents(
//!     [r#"{
//!         "activeEnvironment": "prod",
//!         "baseEnvironment": "base",
//!         "environments": {
//!             "base": {"appSettings": {"x": "1"}},
//!             "prod": {"appSettings": {"y": "2"}}
//!         }
//!     }"#],
//!     None,
//! )?;
//! let settings = manager.app_settings()?;
//! assert_eq!(settings.get("x").map(String::as_str), Some("1"));
//! assert_eq!(settings.get("y").map(String::as_str), Some("2"));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

mod document;
mod error;
mod manager;
mod merge;
mod resolver;
mod sections;
mod settings;
mod source;

pub use document::{ConfigDocument, EnvironmentSections};
pub use error::StrataError;
pub use manager::{ConfigManager, ConfigManagerBuilder};
pub use merge::{ResolvedConfig, fold_document, merge_value};
pub use resolver::resolve_active;
pub use sections::{
    APP_SETTINGS_SECTION, AppSettings, CONNECTION_STRINGS_SECTION, ConnectionSetting,
    ConnectionStrings, SectionName,
};
pub use settings::{
    EnvironmentProvider, SectionProvider, Settings, SettingsCell, SettingsRegistry, TableProvider,
    ValueProvider,
};
pub use source::{ConfigSource, read_marker_file};

pub use strata_config_macros::SectionName;

/// Result alias used throughout the crate.
///
/// Errors are shared behind [`Arc`] so they can flow through caches (for
/// example the lazily computed typed views on [`ConfigManager`]) and be
/// re-surfaced on later calls without cloning the underlying error.
pub type StrataResult<T> = Result<T, Arc<StrataError>>;
