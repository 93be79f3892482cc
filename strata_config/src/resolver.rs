//! Selection of the single active environment after all documents fold.

use crate::{StrataError, StrataResult};
use crate::merge::ResolvedConfig;

/// Determine the active environment and record it on `resolved`.
///
/// Precedence, highest first: a non-empty `explicit` override, the trimmed
/// content of an external `marker` (for example an `environment.txt` file),
/// then whatever the merged documents nominated. Runs once, after all folds.
///
/// Returns the chosen name for convenience.
///
/// # Errors
///
/// Returns [`StrataError::NoActiveEnvironment`] when nothing nominated a
/// name, and [`StrataError::UnknownEnvironment`] when the chosen name has no
/// corresponding environment in the merged set.
pub fn resolve_active(
    resolved: &mut ResolvedConfig,
    explicit: Option<&str>,
    marker: Option<&str>,
) -> StrataResult<String> {
    let explicit_choice = explicit.filter(|name| !name.is_empty());
    let marker_choice = marker.map(str::trim).filter(|name| !name.is_empty());

    let (name, provenance) = if let Some(name) = explicit_choice {
        (name, "explicit override")
    } else if let Some(name) = marker_choice {
        (name, "external marker")
    } else if let Some(name) = resolved.active_environment() {
        (name, "document content")
    } else {
        return Err(std::sync::Arc::new(StrataError::NoActiveEnvironment));
    };

    if !resolved.contains_environment(name) {
        return Err(StrataError::unknown_environment(
            name,
            resolved.environments().keys().map(String::as_str),
        ));
    }

    tracing::debug!(environment = name, provenance, "resolved active environment");
    let chosen = name.to_owned();
    resolved.set_active_environment(chosen.clone());
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::unwrap_used,
        reason = "tests panic to surface configuration mistakes"
    )]

    use rstest::rstest;
    use serde_json::json;

    use super::resolve_active;
    use crate::StrataError;
    use crate::document::ConfigDocument;
    use crate::merge::{ResolvedConfig, fold_document};

    fn merged(value: serde_json::Value) -> ResolvedConfig {
        let doc = ConfigDocument::parse("test document", &value.to_string()).unwrap();
        let mut resolved = ResolvedConfig::new();
        fold_document(&mut resolved, doc, "test document").unwrap();
        resolved
    }

    #[rstest]
    #[case::explicit_beats_everything(Some("dev"), Some("qa"), "dev")]
    #[case::marker_beats_document(None, Some("qa"), "qa")]
    #[case::marker_is_trimmed(None, Some("  qa\n"), "qa")]
    #[case::document_content_is_the_fallback(None, None, "prod")]
    #[case::empty_explicit_falls_through(Some(""), None, "prod")]
    #[case::blank_marker_falls_through(None, Some("  \n"), "prod")]
    fn precedence(
        #[case] explicit: Option<&str>,
        #[case] marker: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut resolved = merged(json!({
            "activeEnvironment": "prod",
            "environments": {"prod": {}, "dev": {}, "qa": {}}
        }));
        let chosen = resolve_active(&mut resolved, explicit, marker).unwrap();
        assert_eq!(chosen, expected);
        assert_eq!(resolved.active_environment(), Some(expected));
    }

    #[test]
    fn unknown_environment_is_fatal_and_lists_known_names() {
        let mut resolved = merged(json!({"environments": {"prod": {}, "dev": {}}}));
        let err = resolve_active(&mut resolved, Some("staging"), None).unwrap_err();
        match &*err {
            StrataError::UnknownEnvironment { name, known } => {
                assert_eq!(name, "staging");
                assert_eq!(known, "dev, prod");
            }
            other => panic!("expected UnknownEnvironment, got {other:?}"),
        }
    }

    #[test]
    fn no_nomination_at_all_is_fatal() {
        let mut resolved = merged(json!({"environments": {"prod": {}}}));
        let err = resolve_active(&mut resolved, None, None).unwrap_err();
        assert!(matches!(&*err, StrataError::NoActiveEnvironment));
    }
}
