//! End-to-end validation of a CampingPitch instance against the sample
//! vocabulary, with and without an active scope.

use std::path::PathBuf;

use sdm_core::{EntityInstance, PropertyName, Scope, TypeName, Value};
use sdm_validate::{Issue, Severity, Validator};
use sdm_vocab::{VocabularyLoader, VocabularyRegistry};

fn vocab_dir() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir.join("vocab")
}

fn load() -> VocabularyRegistry {
    let mut loader = VocabularyLoader::new();
    loader.load_dir(vocab_dir()).unwrap();
    loader.build().unwrap()
}

fn prop(name: &str) -> PropertyName {
    PropertyName::new(name).unwrap()
}

/// A pitch with neither `name` nor `description`.
fn bare_pitch() -> EntityInstance {
    let mut pitch = EntityInstance::new(TypeName::new("CampingPitch").unwrap());
    pitch.set(prop("petsAllowed"), Value::boolean(true));
    pitch.set(prop("url"), Value::url("https://example.com/pitches/12"));
    pitch.set(prop("image"), Value::url("https://example.com/pitches/12.jpg"));
    pitch
}

#[test]
fn test_missing_name_and_description_under_google_scope() {
    let registry = load();
    let pitch = bare_pitch();
    let report = Validator::new(&registry)
        .validate(&pitch, Some(&Scope::new("google").unwrap()))
        .unwrap();

    assert_eq!(report.error_count(), 2, "report: {report}");
    let mut missing: Vec<&str> = report
        .errors()
        .map(|issue| match issue {
            Issue::RequiredMissing { property, .. } => property.as_str(),
            other => panic!("expected RequiredMissing, got: {other:?}"),
        })
        .collect();
    missing.sort_unstable();
    assert_eq!(missing, vec!["description", "name"]);
    assert_eq!(report.warning_count(), 0);
}

#[test]
fn test_same_instance_clean_without_scope() {
    let registry = load();
    let report = Validator::new(&registry).validate(&bare_pitch(), None).unwrap();
    assert!(report.is_clean(), "report: {report}");
}

#[test]
fn test_same_instance_clean_under_other_scope() {
    let registry = load();
    let other = Scope::new("bing").unwrap();
    let report = Validator::new(&registry)
        .validate(&bare_pitch(), Some(&other))
        .unwrap();
    assert!(report.is_clean(), "report: {report}");
}

#[test]
fn test_recommended_missing_is_a_warning() {
    let registry = load();
    let mut pitch = EntityInstance::new(TypeName::new("CampingPitch").unwrap());
    pitch.set(prop("name"), Value::text("Pitch 12"));
    pitch.set(prop("description"), Value::text("Riverside pitch with hookup."));

    let report = Validator::new(&registry)
        .validate(&pitch, Some(&Scope::new("google").unwrap()))
        .unwrap();
    assert_eq!(report.error_count(), 0, "report: {report}");
    assert_eq!(report.warning_count(), 2);
    for warning in report.warnings() {
        assert_eq!(warning.severity(), Severity::Warning);
        assert!(matches!(warning, Issue::RecommendedMissing { .. }));
    }
}

#[test]
fn test_inherited_contracts_checked_on_leaf_type() {
    let registry = load();
    let mut pitch = bare_pitch();
    // `latitude` comes from the Place rung and rejects booleans.
    pitch.set(prop("latitude"), Value::boolean(true));
    // `accommodationCategory` comes from the Accommodation rung.
    pitch.set(prop("accommodationCategory"), Value::text("tent"));

    let report = Validator::new(&registry).validate(&pitch, None).unwrap();
    assert_eq!(report.error_count(), 1);
    assert!(matches!(
        report.issues()[0],
        Issue::TypeMismatch { ref property, .. } if property.as_str() == "latitude"
    ));
}

#[test]
fn test_nested_image_object_accepted_for_image() {
    let registry = load();
    let mut image = EntityInstance::new(TypeName::new("ImageObject").unwrap());
    image.set(prop("contentUrl"), Value::url("https://example.com/p.jpg"));
    let mut pitch = bare_pitch();
    pitch.set(prop("image"), Value::entity(image.into_handle()));

    let report = Validator::new(&registry).validate(&pitch, None).unwrap();
    assert!(report.is_clean(), "report: {report}");
}
