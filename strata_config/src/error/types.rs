//! Primary error enum for configuration resolution and settings aggregation.

use thiserror::Error;

/// Errors that can occur while resolving configuration or aggregating
/// settings.
///
/// Every phase of the pipeline is fail-fast: the first error aborts the
/// current call and no partial state from the failing step is retained.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// A document failed to parse, or referenced a base environment absent
    /// from its own environment set.
    #[error("malformed configuration document '{origin}': {source}")]
    MalformedDocument {
        /// Label identifying the offending document (path or inline index).
        origin: String,
        /// Underlying parse or structural error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document or marker file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path that failed to read.
        path: camino::Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The resolved active environment name is absent from the merged set.
    #[error("active environment '{name}' is not defined (known environments: {known})")]
    UnknownEnvironment {
        /// The name that resolution settled on.
        name: String,
        /// Comma-separated list of environment names that do exist.
        known: String,
    },

    /// No override, marker, or document nominated an active environment.
    #[error("no active environment was nominated by any override, marker, or document")]
    NoActiveEnvironment,

    /// A requested section is absent from the active environment.
    #[error("section '{section}' not found in environment '{environment}'")]
    SectionNotFound {
        /// The requested section name.
        section: String,
        /// The active environment that was searched.
        environment: String,
    },

    /// A section's JSON shape cannot populate the requested type.
    #[error("section '{section}' does not match the requested type: {source}")]
    SectionTypeMismatch {
        /// The requested section name.
        section: String,
        /// Deserialization error describing the mismatch.
        #[source]
        source: serde_json::Error,
    },

    /// A settings constructor failed.
    #[error("failed to instantiate settings '{settings}': {detail}")]
    Instantiation {
        /// Name of the settings type that failed to construct.
        settings: String,
        /// Constructor-reported failure detail.
        detail: String,
    },

    /// A provider value could not be converted to a settings field's type.
    #[error(
        "cannot coerce value '{value}' into field '{field}' of settings '{settings}' \
         (target type {target}): {source}"
    )]
    FieldCoercion {
        /// Name of the settings type being populated.
        settings: String,
        /// Field that rejected the value.
        field: String,
        /// The raw source value.
        value: String,
        /// The declared target type of the settings instance.
        target: String,
        /// Deserialization error describing the rejection.
        #[source]
        source: serde_json::Error,
    },

    /// A settings instance failed its post-population validation hook.
    #[error("validation failed for settings '{settings}': {message}")]
    SettingsValidation {
        /// Name of the offending settings type.
        settings: String,
        /// Explanation reported by the `validate` hook.
        message: String,
    },
}
