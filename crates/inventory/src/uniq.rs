//! Sorted, deduplicated string lists.

/// Insert `item` into `items` unless it is already present.
///
/// The list is re-sorted on every call, so membership ends up in
/// lexicographic order regardless of insertion order.
pub fn append_uniq(items: &mut Vec<String>, item: &str) {
    if items.is_empty() {
        items.push(item.to_string());
        return;
    }

    items.sort_unstable();
    if let Err(pos) = items.binary_search_by(|existing| existing.as_str().cmp(item)) {
        items.insert(pos, item.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_empty() {
        let mut items = Vec::new();
        append_uniq(&mut items, "web");
        assert_eq!(items, vec!["web"]);
    }

    #[test]
    fn test_duplicate_is_noop_and_sorted() {
        let mut items = vec!["b".to_string()];
        append_uniq(&mut items, "a");
        append_uniq(&mut items, "a");
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let mut items = vec!["c".to_string(), "a".to_string()];
        append_uniq(&mut items, "b");
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_lexicographic_not_insertion_order() {
        let mut items = Vec::new();
        for host in ["web.2", "web.10", "web.1"] {
            append_uniq(&mut items, host);
        }
        assert_eq!(items, vec!["web.1", "web.10", "web.2"]);
    }
}
