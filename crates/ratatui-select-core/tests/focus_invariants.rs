//! Property tests for the two load-bearing invariants: the focused item is
//! always part of the visible, enabled subset, and filtering only ever
//! narrows the item set while preserving order.

use proptest::prelude::*;
use ratatui_select_core::filter;
use ratatui_select_core::registry::SelectItem;
use ratatui_select_core::select::SelectConfig;
use ratatui_select_core::select::SelectCore;

const WORDS: [&str; 6] = ["apple", "banana", "cherry", "date", "elderberry", "fig"];

#[derive(Clone, Debug)]
enum Op {
    Register(u8, bool),
    Unregister(u8),
    PushChar(char),
    PopChar,
    Next,
    Previous,
    First,
    Last,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8, any::<bool>()).prop_map(|(n, d)| Op::Register(n, d)),
        (0u8..8).prop_map(Op::Unregister),
        proptest::sample::select(vec!['a', 'e', 'n', 'r', 'z']).prop_map(Op::PushChar),
        Just(Op::PopChar),
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::First),
        Just(Op::Last),
    ]
}

fn key(n: u8) -> String {
    format!("k{n}")
}

proptest! {
    #[test]
    fn focus_always_references_a_visible_enabled_item(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut core = SelectCore::uncontrolled(SelectConfig::default(), None);
        core.open();

        for op in ops {
            match op {
                Op::Register(n, disabled) => {
                    core.register_item(key(n), WORDS[n as usize % WORDS.len()], disabled)
                }
                Op::Unregister(n) => core.unregister_item(&key(n)),
                Op::PushChar(c) => {
                    core.push_query_char(c);
                }
                Op::PopChar => {
                    core.pop_query_char();
                }
                Op::Next => {
                    core.focus_next();
                }
                Op::Previous => {
                    core.focus_previous();
                }
                Op::First => {
                    core.focus_first();
                }
                Op::Last => {
                    core.focus_last();
                }
            }

            let visible = core.visible_items();
            match core.focused_key() {
                Some(focused) => {
                    prop_assert!(
                        visible.iter().any(|i| i.key == focused && !i.disabled),
                        "focused key {focused:?} not among visible enabled items"
                    );
                }
                None => {
                    prop_assert!(
                        visible.iter().all(|i| i.disabled),
                        "focus is empty although an enabled item is visible"
                    );
                }
            }
        }
    }

    #[test]
    fn filtering_narrows_and_preserves_order(
        texts in prop::collection::vec(proptest::sample::select(WORDS.to_vec()), 0..12),
        query in "[a-z]{0,4}",
    ) {
        let items: Vec<SelectItem> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| SelectItem::new(format!("k{i}"), *t))
            .collect();

        let all = filter_keys(&items, "");
        let full: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
        prop_assert_eq!(all, full);

        let narrowed = filter_keys(&items, &query);
        let mut last_pos = 0usize;
        for key in &narrowed {
            let pos = items.iter().position(|i| i.key == *key).unwrap();
            prop_assert!(pos >= last_pos, "filter reordered items");
            last_pos = pos;
        }
        prop_assert!(narrowed.len() <= items.len());
    }
}

fn filter_keys<'a>(items: &'a [SelectItem], query: &str) -> Vec<&'a str> {
    filter::filter_items(items, query)
        .into_iter()
        .map(|i| i.key.as_str())
        .collect()
}
