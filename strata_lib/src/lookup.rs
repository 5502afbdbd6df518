//! Id-keyed lookup tables for resolving foreign keys during aggregation.

use std::collections::HashMap;

/// Build an id-to-record map for O(1) joins.
///
/// Absent ids simply yield `None` on lookup; callers substitute a display
/// fallback such as "Unknown Dealer" rather than failing. Duplicate ids keep
/// the last record seen.
pub fn index_by<'a, T, F>(items: &'a [T], key: F) -> HashMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> &'a str,
{
    items.iter().map(|item| (key(item), item)).collect()
}
