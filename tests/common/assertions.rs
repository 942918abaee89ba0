//! Domain-specific assertion macros for huaming harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! pipeline invariant that was violated.

/// Assert the displayed names of a view, in render order.
///
/// ```rust
/// assert_rows!(view, ["牡丹", "芍药"]);
/// ```
#[macro_export]
macro_rules! assert_rows {
    ($view:expr, [$($name:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $view.rows().map(|r| r.record.name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "displayed rows differ");
    }};
}

/// Assert that the grouped view is a partition of `kept`: every kept record
/// appears exactly once and nothing else does.
#[macro_export]
macro_rules! assert_partition {
    ($view:expr, $kept:expr) => {{
        let mut shown: Vec<&str> = $view.rows().map(|r| r.record.name.as_str()).collect();
        let mut kept: Vec<&str> = $kept.iter().map(|r| r.name.as_str()).collect();
        shown.sort_unstable();
        kept.sort_unstable();
        pretty_assertions::assert_eq!(shown, kept, "groups are not a partition of the filtered set");
        for group in &$view.groups {
            if group.records.iter().any(|r| r.record.group_key() != group.key) {
                panic!("assert_partition! failed: group {:?} holds a foreign record", group.key);
            }
        }
    }};
}
