//! Well-known section shapes and the section-naming seam.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Section name of the connection-strings block.
pub const CONNECTION_STRINGS_SECTION: &str = "connectionStrings";

/// Section name of the flat application-settings block.
pub const APP_SETTINGS_SECTION: &str = "appSettings";

/// Declares the configuration-section name a type answers to.
///
/// Derivable via `#[derive(SectionName)]` from `strata_config_macros`, which
/// defaults `NAME` to the type's identifier and honours
/// `#[section(name = "…")]` overrides. This replaces runtime type-name
/// reflection with a compile-time declaration.
pub trait SectionName {
    /// The section (and settings) name this type reads.
    const NAME: &'static str;
}

/// One named connection in the `connectionStrings` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSetting {
    /// Driver or provider identifier, as the deployment names it.
    #[serde(default)]
    pub provider_name: String,
    /// The connection string itself.
    #[serde(default)]
    pub connection_string: String,
}

/// Typed view over the `connectionStrings` section.
pub type ConnectionStrings = BTreeMap<String, ConnectionSetting>;

/// Typed view over the `appSettings` section.
pub type AppSettings = BTreeMap<String, String>;
