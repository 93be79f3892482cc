//! In-memory model of a single parsed configuration document.
//!
//! A document carries zero or more named environments, each mapping section
//! names to arbitrary JSON values, plus two optional nominations: the active
//! environment and a base environment layered beneath its siblings. See
//! [`crate::fold_document`] for how documents fold into a
//! [`crate::ResolvedConfig`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{StrataError, StrataResult};

/// Mapping from section name to an arbitrary JSON value.
///
/// Section names are case-sensitive and unique within an environment.
pub type EnvironmentSections = BTreeMap<String, Value>;

/// One parsed JSON configuration source.
///
/// Unknown top-level keys are ignored for forward compatibility, and a
/// missing `environments` key yields an empty mapping rather than an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Environment name this document nominates as active, if any.
    pub active_environment: Option<String>,
    /// Environment whose sections are layered beneath every sibling
    /// environment in this document, if any.
    pub base_environment: Option<String>,
    /// Environment name to section map. Insertion order is irrelevant.
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentSections>,
}

impl ConfigDocument {
    /// Parse one JSON text into a document.
    ///
    /// `origin` labels the source in diagnostics (a path, or an inline
    /// document label such as `inline document #1`).
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::MalformedDocument`] when the text is not a
    /// well-formed JSON object or `environments` is present but not an
    /// object-of-objects.
    pub fn parse(origin: &str, text: &str) -> StrataResult<Self> {
        serde_json::from_str(text).map_err(|e| StrataError::malformed_arc(origin, e))
    }

    /// Returns the environment nominated as active, if the nomination is
    /// non-empty.
    ///
    /// An empty `activeEnvironment` string is treated as no nomination, so
    /// it cannot clobber a name supplied by an earlier document.
    #[must_use]
    pub fn nominated_environment(&self) -> Option<&str> {
        self.active_environment
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}
