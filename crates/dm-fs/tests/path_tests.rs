use dm_fs::{NormalizedPath, validate_relative_fragment};
use rstest::rstest;

#[test]
fn test_normalize_forward_slashes() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("data\\nii\\");
    assert_eq!(path.as_str(), "data/nii/");
}

#[test]
fn test_join_inserts_single_separator() {
    let base = NormalizedPath::new("tests");
    assert_eq!(base.join("demo").as_str(), "tests/demo");

    let base = NormalizedPath::new("tests/");
    assert_eq!(base.join("demo").as_str(), "tests/demo");
}

#[test]
fn test_join_preserves_trailing_separator_of_segment() {
    let base = NormalizedPath::new("tests/demo");
    assert_eq!(base.join("data/dcm/").as_str(), "tests/demo/data/dcm/");
}

#[test]
fn test_join_drops_leading_separator_of_segment() {
    let base = NormalizedPath::new("/archive");
    assert_eq!(base.join("/SPINS").as_str(), "/archive/SPINS");
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("foo/bar/baz");
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_str(), "foo/bar");
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("config/SPINS_settings.yml");
    assert_eq!(path.file_name(), Some("SPINS_settings.yml"));
    assert_eq!(path.extension(), Some("yml"));
}

#[test]
fn test_hidden_file_has_no_extension() {
    let path = NormalizedPath::new("config/.settings");
    assert_eq!(path.extension(), None);
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
}

#[rstest]
#[case("data/dcm/")]
#[case("metadata")]
#[case("pipelines/hcp/")]
#[case("./data/nii")]
#[case("data\\zips\\")]
fn test_relative_fragments_are_accepted(#[case] fragment: &str) {
    assert!(validate_relative_fragment(fragment).is_ok());
}

#[rstest]
#[case("/archive/data/dcm")]
#[case("C:\\data\\dcm")]
#[case("//server/share")]
#[case("../outside")]
#[case("data/../../etc")]
#[case("data\\..\\secret")]
fn test_unsafe_fragments_are_rejected(#[case] fragment: &str) {
    let err = validate_relative_fragment(fragment).unwrap_err();
    assert!(
        err.to_string().contains(fragment),
        "error should name the fragment, got: {}",
        err
    );
}

#[test]
fn test_double_dot_inside_name_is_not_traversal() {
    assert!(validate_relative_fragment("data/scan..v2/").is_ok());
}
