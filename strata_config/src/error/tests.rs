//! Unit tests for error construction and display texture.
#![expect(
    clippy::unwrap_used,
    reason = "tests panic to surface configuration mistakes"
)]

use rstest::rstest;

use super::StrataError;

#[test]
fn malformed_names_the_origin() {
    let err = StrataError::malformed("cfg.json", std::io::Error::other("bad json"));
    let rendered = err.to_string();
    assert!(rendered.contains("cfg.json"), "missing origin: {rendered}");
    assert!(rendered.contains("bad json"), "missing source: {rendered}");
}

#[test]
fn dangling_base_mentions_the_base_name() {
    let err = StrataError::dangling_base("inline document #2", "shared");
    assert!(err.to_string().contains("base environment 'shared'"));
}

#[test]
fn unknown_environment_lists_known_names_sorted() {
    let err = StrataError::unknown_environment("staging", ["prod", "dev"]);
    let rendered = err.to_string();
    assert!(rendered.contains("'staging'"), "{rendered}");
    assert!(rendered.contains("dev, prod"), "{rendered}");
}

#[rstest]
#[case("connectionStrings", "prod")]
#[case("appSettings", "dev")]
fn section_not_found_names_section_and_environment(
    #[case] section: &str,
    #[case] environment: &str,
) {
    let err = StrataError::section_not_found(section, environment);
    let rendered = err.to_string();
    assert!(rendered.contains(section), "{rendered}");
    assert!(rendered.contains(environment), "{rendered}");
}

#[test]
fn field_coercion_names_field_value_and_target() {
    let source = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
    let err = StrataError::field_coercion("ServiceSettings", "timeout", "nope", "u32", source);
    let rendered = err.to_string();
    for needle in ["ServiceSettings", "timeout", "nope", "u32"] {
        assert!(rendered.contains(needle), "missing {needle}: {rendered}");
    }
}

#[test]
fn validation_names_the_offending_type() {
    let err = StrataError::settings_validation("ServiceSettings", "timeout must be positive");
    assert!(err.to_string().contains("ServiceSettings"));
}
