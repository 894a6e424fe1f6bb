//! Containment filtering for the select list.
//!
//! This is deliberately a *stable* filter, not a relevance ranking: matches
//! keep registry order. Fuzzy scoring belongs to command palettes, not to a
//! select that mirrors a fixed option list.

use crate::registry::SelectItem;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalizes text for matching: NFD decomposition, combining marks dropped,
/// lowercased. "Café" and "cafe" fold to the same string.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case- and diacritic-insensitive substring containment. An empty or
/// whitespace-only query matches everything.
pub fn is_match(text: &str, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    fold(text).contains(&fold(query))
}

/// The visible subset of `items` under `query`, preserving item order.
/// Matching considers item text only, never the key.
pub fn filter_items<'a>(items: &'a [SelectItem], query: &str) -> Vec<&'a SelectItem> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }
    let folded = fold(query);
    items
        .iter()
        .filter(|i| fold(&i.text).contains(&folded))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<SelectItem> {
        vec![
            SelectItem::new("a", "Apple"),
            SelectItem::new("b", "Banana"),
            SelectItem::new("c", "Cherry"),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let items = items();
        let visible = filter_items(&items, "");
        assert_eq!(visible.len(), 3);
        let keys: Vec<&str> = visible.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn whitespace_query_is_identity() {
        let items = items();
        assert_eq!(filter_items(&items, "   ").len(), 3);
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(is_match("Banana", "bAnA"));
    }

    #[test]
    fn match_ignores_diacritics() {
        assert!(is_match("Café au lait", "cafe"));
        assert!(is_match("Jose", "José"));
    }

    #[test]
    fn filter_preserves_order_among_matches() {
        let items = vec![
            SelectItem::new("ba", "Banana"),
            SelectItem::new("ap", "Apple"),
            SelectItem::new("an", "Anise"),
        ];
        let visible = filter_items(&items, "an");
        let keys: Vec<&str> = visible.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, ["ba", "an"]);
    }

    #[test]
    fn filter_never_matches_on_key() {
        let items = vec![SelectItem::new("needle", "Haystack")];
        assert!(filter_items(&items, "needle").is_empty());
    }

    #[test]
    fn filtered_set_is_subset() {
        let items = items();
        for q in ["a", "an", "zzz", "RR"] {
            let visible = filter_items(&items, q);
            assert!(visible.len() <= items.len());
            for v in visible {
                assert!(items.iter().any(|i| i.key == v.key));
            }
        }
    }
}
