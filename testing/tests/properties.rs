//! Property tests for the store and the display order.
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use todo_core::persistence::PersistenceAdapter;
use todo_core::store::TodoStore;
use todo_core::view;
use todo_core::TodoError;
use todo_testing::properties::{blank_text, collection, padded_text};
use todo_testing::{MockStorage, test_environment};

fn empty_store() -> TodoStore<MockStorage> {
    let mut store = TodoStore::new(PersistenceAdapter::new(MockStorage::new()), test_environment());
    store.init();
    store
}

proptest! {
    #[test]
    fn blank_input_is_rejected(existing in 0usize..4, input in blank_text()) {
        let mut store = empty_store();
        for i in 0..existing {
            store.add(&format!("item {i}")).unwrap();
        }

        prop_assert_eq!(store.add(&input), Err(TodoError::Validation));
        prop_assert_eq!(store.len(), existing);
    }

    #[test]
    fn valid_input_adds_exactly_one_trimmed_record((raw, trimmed) in padded_text()) {
        let mut store = empty_store();
        store.add("already here").unwrap();

        let added = store.add(&raw).unwrap();
        prop_assert_eq!(store.len(), 2);
        prop_assert_eq!(&added.text, &trimmed);
        prop_assert!(store.get_all().contains(&added));
    }

    #[test]
    fn incomplete_items_come_first(todos in collection()) {
        let ordered = view::sort_for_display(&todos);
        let first_done = ordered.iter().position(|t| t.completed).unwrap_or(ordered.len());
        prop_assert!(ordered[first_done..].iter().all(|t| t.completed));
    }

    #[test]
    fn created_at_non_increasing_within_runs(todos in collection()) {
        let ordered = view::sort_for_display(&todos);
        for pair in ordered.windows(2) {
            if pair[0].completed == pair[1].completed {
                prop_assert!(pair[0].created_at >= pair[1].created_at);
            }
        }
    }

    #[test]
    fn sort_is_a_permutation_and_leaves_input_alone(todos in collection()) {
        let before = todos.clone();
        let mut ordered = view::sort_for_display(&todos);
        prop_assert_eq!(&todos, &before);

        ordered.sort_by(|a, b| a.id.cmp(&b.id));
        let mut expected = before;
        expected.sort_by(|a, b| a.id.cmp(&b.id));
        prop_assert_eq!(ordered, expected);
    }

    #[test]
    fn sort_and_render_are_idempotent(todos in collection()) {
        let first = view::render(&view::sort_for_display(&todos));
        let second = view::render(&view::sort_for_display(&todos));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn save_load_round_trips(todos in collection()) {
        let adapter = PersistenceAdapter::new(MockStorage::new());
        adapter.save(&todos).unwrap();

        let reloaded = adapter.load();
        prop_assert_eq!(reloaded.warning, None);
        adapter.save(&reloaded.todos).unwrap();
        prop_assert_eq!(adapter.load().todos, todos);
    }

    #[test]
    fn rendered_ids_match_ordered_ids(todos in collection()) {
        let ordered = view::sort_for_display(&todos);
        let rendered = view::render(&ordered);

        if todos.is_empty() {
            prop_assert!(rendered.is_placeholder());
        } else {
            let ids: Vec<_> = rendered.items().map(|item| item.id.clone()).collect();
            let expected: Vec<_> = ordered.into_iter().map(|t| t.id).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}
