//! Order-insensitive collection normalization.

/// Reorder `observed` to match `declared` when the two hold the same elements.
///
/// The service stores several collections as unordered sets and returns them
/// in arbitrary order. A positional comparison against the declared order
/// would then report a change on every convergence run even though nothing
/// differs semantically. When the two sides are equal as sets, the declared
/// order wins; any genuine difference is passed through untouched so the diff
/// engine can report it:
///
/// - either side absent (`None` is distinct from an empty collection) →
///   `observed` unchanged
/// - length mismatch → `observed` unchanged
/// - an observed element missing from `declared` (membership, not position) →
///   `observed` unchanged
///
/// Precondition: the collections in this domain hold unique elements, so
/// equal length plus full membership implies set equality. If duplicates
/// were ever introduced this check would be too weak and two genuinely
/// different multisets could be collapsed to the declared order.
pub fn reorder_to_match<T>(declared: Option<&[T]>, observed: Option<Vec<T>>) -> Option<Vec<T>>
where
    T: PartialEq + Clone,
{
    let declared = match declared {
        Some(d) => d,
        None => return observed,
    };
    let obs = match &observed {
        Some(o) => o,
        None => return observed,
    };

    if declared.len() != obs.len() {
        return observed;
    }
    if obs.iter().any(|e| !declared.contains(e)) {
        return observed;
    }

    Some(declared.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn equal_sets_take_declared_order() {
        let declared = strs(&["a", "b", "c"]);
        let observed = strs(&["c", "a", "b"]);
        assert_eq!(
            reorder_to_match(Some(&declared), Some(observed)),
            Some(declared.clone())
        );
    }

    #[test]
    fn already_matching_order_is_a_fixed_point() {
        let declared = strs(&["a", "b"]);
        assert_eq!(
            reorder_to_match(Some(&declared), Some(declared.clone())),
            Some(declared)
        );
    }

    #[test]
    fn length_mismatch_passes_observed_through() {
        let declared = strs(&["a", "b", "c"]);
        let observed = strs(&["c", "a"]);
        assert_eq!(
            reorder_to_match(Some(&declared), Some(observed.clone())),
            Some(observed)
        );
    }

    #[test]
    fn content_mismatch_passes_observed_through() {
        let declared = strs(&["a", "b", "c"]);
        let observed = strs(&["c", "a", "x"]);
        assert_eq!(
            reorder_to_match(Some(&declared), Some(observed.clone())),
            Some(observed)
        );
    }

    #[test]
    fn absent_declared_passes_observed_through() {
        let observed = strs(&["a", "b"]);
        assert_eq!(
            reorder_to_match(None, Some(observed.clone())),
            Some(observed)
        );
    }

    #[test]
    fn absent_observed_stays_absent() {
        let declared = strs(&["a"]);
        assert_eq!(reorder_to_match::<String>(Some(&declared), None), None);
    }

    #[test]
    fn empty_is_not_absent() {
        // Both empty: trivially equal sets, declared order (empty) returned.
        let declared: Vec<String> = vec![];
        assert_eq!(
            reorder_to_match(Some(&declared), Some(vec![])),
            Some(vec![])
        );
        // Declared empty, observed populated: length mismatch, pass through.
        let observed = strs(&["a"]);
        assert_eq!(
            reorder_to_match(Some(&declared), Some(observed.clone())),
            Some(observed)
        );
    }

    #[test]
    fn works_for_any_comparable_element() {
        let declared = vec![3, 1, 2];
        let observed = vec![2, 3, 1];
        assert_eq!(
            reorder_to_match(Some(&declared), Some(observed)),
            Some(declared)
        );
    }
}
