use dm_fs::{NormalizedPath, validate_relative_fragment};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        // No backslashes survive normalization
        prop_assert!(!as_str.contains('\\'));

        // Only a leading network prefix may contain a double separator
        let remainder = if path.is_network_path() && as_str.starts_with("//") {
            &as_str[2..]
        } else {
            as_str
        };
        prop_assert!(!remainder.contains("//"));

        // Normalization is idempotent
        let again = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_join_keeps_base_prefix_and_segment_suffix(
        base in "[a-z]{1,8}(/[a-z]{1,8}){0,3}/?",
        segment in "[a-z]{1,8}(/[a-z]{1,8}){0,3}/?",
    ) {
        let joined = NormalizedPath::new(&base).join(&segment);
        let as_str = joined.as_str();

        prop_assert!(as_str.starts_with(base.trim_end_matches('/')));
        prop_assert!(as_str.ends_with(&segment));
        prop_assert!(!as_str.contains("//"));
    }

    #[test]
    fn test_fragments_with_parent_segments_are_rejected(
        prefix in "([a-z]{1,6}/){0,3}",
        suffix in "(/[a-z]{1,6}){0,3}",
    ) {
        let fragment = format!("{prefix}..{suffix}");
        prop_assert!(validate_relative_fragment(&fragment).is_err());
    }
}
