//! Folding documents into an accumulated environment set.
//!
//! Documents fold strictly in the order supplied by the caller; that order is
//! the only override-precedence mechanism. A document's `baseEnvironment`
//! layers beneath every sibling environment *of that document only* before
//! the sibling's own sections apply, so a base never leaks across documents.

use std::collections::BTreeMap;

use crate::{StrataError, StrataResult};
use crate::document::{ConfigDocument, EnvironmentSections};

mod value;

pub use value::merge_value;

/// The accumulated result of merging all supplied documents.
///
/// Owns its environment maps exclusively. After
/// [`crate::resolve_active`] completes, the active environment name
/// is non-empty and guaranteed to exist as a key of the environment set.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    active_environment: Option<String>,
    environments: BTreeMap<String, EnvironmentSections>,
}

impl ResolvedConfig {
    /// Create an empty merge target.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active_environment: None,
            environments: BTreeMap::new(),
        }
    }

    /// The currently nominated active environment, if any.
    #[must_use]
    pub fn active_environment(&self) -> Option<&str> {
        self.active_environment.as_deref()
    }

    /// All merged environments.
    #[must_use]
    pub const fn environments(&self) -> &BTreeMap<String, EnvironmentSections> {
        &self.environments
    }

    /// Look up one environment's sections by name.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<&EnvironmentSections> {
        self.environments.get(name)
    }

    /// Whether an environment with `name` exists in the merged set.
    #[must_use]
    pub fn contains_environment(&self, name: &str) -> bool {
        self.environments.contains_key(name)
    }

    pub(crate) fn set_active_environment(&mut self, name: String) {
        self.active_environment = Some(name);
    }
}

/// Fold one document into the accumulated result.
///
/// Order of effects:
/// 1. The document's base-environment reference is validated first; a
///    dangling reference aborts before the target mutates at all. An empty
///    `baseEnvironment` string counts as no reference, the same leniency
///    an empty `activeEnvironment` nomination gets.
/// 2. A non-empty `activeEnvironment` nomination overwrites the accumulated
///    one (last writer across the document sequence wins).
/// 3. Each environment folds in: the document's base sections first (skipped
///    for the base environment itself), then the environment's own sections,
///    so a document's own values win over its base layer.
///
/// # Errors
///
/// Returns [`StrataError::MalformedDocument`] when `baseEnvironment` names an
/// environment absent from this same document.
pub fn fold_document(
    resolved: &mut ResolvedConfig,
    incoming: ConfigDocument,
    origin: &str,
) -> StrataResult<()> {
    // An empty base reference is treated as absent, not dangling.
    let base_layer = match incoming
        .base_environment
        .as_deref()
        .filter(|name| !name.is_empty())
    {
        Some(base) => match incoming.environments.get(base) {
            Some(sections) => Some((base.to_owned(), sections.clone())),
            None => return Err(StrataError::dangling_base(origin, base)),
        },
        None => None,
    };

    if let Some(nominated) = incoming.nominated_environment() {
        resolved.set_active_environment(nominated.to_owned());
    }

    let environment_count = incoming.environments.len();
    for (name, sections) in incoming.environments {
        let target = resolved.environments.entry(name.clone()).or_default();
        if let Some((base, base_sections)) = &base_layer
            && name != *base
        {
            fold_sections(target, base_sections.clone());
        }
        fold_sections(target, sections);
    }

    tracing::debug!(
        origin,
        environments = environment_count,
        active = ?resolved.active_environment(),
        "folded configuration document"
    );
    Ok(())
}

/// Fold a section map into an environment using the deep-merge rule.
fn fold_sections(target: &mut EnvironmentSections, sections: EnvironmentSections) {
    for (name, value) in sections {
        match target.get_mut(&name) {
            Some(existing) => merge_value(existing, value),
            None => {
                target.insert(name, value);
            }
        }
    }
}
