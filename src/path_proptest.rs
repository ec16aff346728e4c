//! Property-based tests for path normalization.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{is_descendant, join, normalize, parent};
    use proptest::prelude::*;

    // ============================================================================
    // normalize property tests
    // ============================================================================

    proptest! {
        /// Property: normalizing twice is the same as normalizing once
        #[test]
        fn normalize_is_idempotent(input in "[a-z./]{0,40}") {
            let once = normalize(&input);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: normalized paths are always absolute
        #[test]
        fn normalize_is_absolute(input in ".*") {
            let result = normalize(&input);
            prop_assert!(result.starts_with('/'), "'{}' is not absolute", result);
        }

        /// Property: normalized paths contain no empty, `.` or `..` segments
        #[test]
        fn normalize_has_no_dot_segments(input in "[a-z./]{0,40}") {
            let result = normalize(&input);
            if result != "/" {
                for segment in result[1..].split('/') {
                    prop_assert!(
                        !segment.is_empty() && segment != "." && segment != "..",
                        "'{}' has segment '{}'",
                        result,
                        segment
                    );
                }
            }
        }

        /// Property: a trailing slash never changes the result
        #[test]
        fn normalize_ignores_trailing_slash(input in "[a-z./]{0,40}") {
            prop_assert_eq!(normalize(&input), normalize(&format!("{}/", input)));
        }

        /// Property: appending `/..` to a normalized path yields its parent
        #[test]
        fn normalize_dot_dot_is_parent(segments in prop::collection::vec("[a-z]{1,6}", 1..6)) {
            let path = format!("/{}", segments.join("/"));
            let up = normalize(&format!("{}/..", path));
            prop_assert_eq!(Some(up.as_str()), parent(&path));
        }

        /// Property: a joined child is a descendant of its directory
        #[test]
        fn join_produces_descendant(
            segments in prop::collection::vec("[a-z]{1,6}", 0..5),
            name in "[a-z0-9]{1,8}",
        ) {
            let dir = normalize(&segments.join("/"));
            let child = join(&dir, &name);
            prop_assert!(is_descendant(&child, &dir));
            prop_assert_eq!(normalize(&child), child.clone());
        }
    }
}
