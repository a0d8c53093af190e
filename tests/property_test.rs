//! Property tests for queue ordering and pressed-set consistency.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use proptest::prelude::*;

use ui_guard::action_queue::{ActionQueueManager, TaskStatus};
use ui_guard::critical_section::CriticalSectionManager;
use ui_guard::input::{InputBindings, InputController, KEY_REPEAT_DELAY_MS, KeyCode};

proptest! {
    /// Tasks run in strict submission order regardless of which ids are
    /// attached, and each distinct pending id runs at most once.
    #[test]
    fn queue_preserves_submission_order(ids in prop::collection::vec(prop::option::of(0u8..4), 1..32)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = ActionQueueManager::new();

        let mut expected = Vec::new();
        for (seq, id) in ids.iter().enumerate() {
            let id_string = id.map(|n| format!("id_{n}"));
            expected.push(seq);
            let log_ref = Rc::clone(&log);
            queue.enqueue(
                Box::new(move || {
                    log_ref.borrow_mut().push(seq);
                    Ok(TaskStatus::Done)
                }),
                id_string.as_deref(),
            );
        }
        queue.update();

        // Sync tasks drain as they arrive, so dedup never triggers here and
        // every task runs exactly once, in order.
        prop_assert_eq!(&*log.borrow(), &expected);
        prop_assert!(queue.is_empty());
    }

    /// After any interleaving of down/up events and drains, the pressed-key
    /// set matches a straightforward replay of the accepted events, and an
    /// `up` is never lost.
    #[test]
    fn pressed_set_matches_event_replay(events in prop::collection::vec((0usize..4, prop::bool::ANY), 0..64)) {
        let keys = ["KeyW", "KeyA", "KeyS", "KeyD"];
        let locks = CriticalSectionManager::new();
        let mut input = InputController::new(InputBindings::default());

        let mut model: HashSet<&str> = HashSet::new();
        let mut now = 0u64;
        for (key_idx, is_down) in events {
            // Space events out past the repeat delay so every down is accepted.
            now += KEY_REPEAT_DELAY_MS;
            let key = KeyCode::from(keys[key_idx]);
            if is_down {
                input.handle_key_down(&key, now, &locks);
                model.insert(keys[key_idx]);
            } else {
                input.handle_key_up(&key, now);
                model.remove(keys[key_idx]);
            }
        }
        // Let the debounced drain settle.
        now += 1_000;
        input.update(now);

        let pressed: HashSet<&str> = input
            .pressed_keys()
            .iter()
            .map(|k| keys.iter().copied().find(|name| *name == k.as_str()).unwrap())
            .collect();
        prop_assert_eq!(pressed, model);
        prop_assert_eq!(input.pending_token_count(), 0);
    }
}
