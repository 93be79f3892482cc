//! Constructor helpers for `StrataError`.
//!
//! The pipeline passes errors behind [`std::sync::Arc`] (see
//! [`crate::StrataResult`]), so most helpers come in plain and `Arc`-wrapped
//! pairs to keep call sites terse.

use std::sync::Arc;

use super::StrataError;

impl StrataError {
    /// Construct a [`StrataError::MalformedDocument`] for a document label.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::StrataError;
    /// let e = StrataError::malformed("cfg.json", std::io::Error::other("boom"));
    /// assert!(matches!(e, StrataError::MalformedDocument { .. }));
    /// ```
    #[must_use]
    pub fn malformed(
        origin: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::MalformedDocument {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// `Arc`-wrapped variant of [`StrataError::malformed`].
    #[must_use]
    pub fn malformed_arc(
        origin: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Arc<Self> {
        Arc::new(Self::malformed(origin, source))
    }

    /// Construct a [`StrataError::MalformedDocument`] for a dangling base
    /// environment reference.
    #[must_use]
    pub fn dangling_base(origin: impl Into<String>, base: &str) -> Arc<Self> {
        Self::malformed_arc(
            origin,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("base environment '{base}' is not defined in this document"),
            ),
        )
    }

    /// Construct a [`StrataError::Io`] for a failed file read.
    #[must_use]
    pub fn io(path: impl Into<camino::Utf8PathBuf>, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::Io {
            path: path.into(),
            source,
        })
    }

    /// Construct a [`StrataError::UnknownEnvironment`] listing the known
    /// environment names for diagnosis.
    #[must_use]
    pub fn unknown_environment<'a>(
        name: impl Into<String>,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Arc<Self> {
        let mut names: Vec<&str> = known.into_iter().collect();
        names.sort_unstable();
        Arc::new(Self::UnknownEnvironment {
            name: name.into(),
            known: names.join(", "),
        })
    }

    /// Construct a [`StrataError::SectionNotFound`].
    #[must_use]
    pub fn section_not_found(section: impl Into<String>, environment: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::SectionNotFound {
            section: section.into(),
            environment: environment.into(),
        })
    }

    /// Construct a [`StrataError::SectionTypeMismatch`].
    #[must_use]
    pub fn section_type_mismatch(section: impl Into<String>, source: serde_json::Error) -> Arc<Self> {
        Arc::new(Self::SectionTypeMismatch {
            section: section.into(),
            source,
        })
    }

    /// Construct a [`StrataError::Instantiation`].
    #[must_use]
    pub fn instantiation(settings: impl Into<String>, detail: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Instantiation {
            settings: settings.into(),
            detail: detail.into(),
        })
    }

    /// Construct a [`StrataError::FieldCoercion`].
    #[must_use]
    pub fn field_coercion(
        settings: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        target: impl Into<String>,
        source: serde_json::Error,
    ) -> Arc<Self> {
        Arc::new(Self::FieldCoercion {
            settings: settings.into(),
            field: field.into(),
            value: value.into(),
            target: target.into(),
            source,
        })
    }

    /// Construct a [`StrataError::SettingsValidation`].
    #[must_use]
    pub fn settings_validation(settings: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::SettingsValidation {
            settings: settings.into(),
            message: message.into(),
        })
    }
}
