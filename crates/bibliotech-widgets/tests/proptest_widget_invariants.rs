//! Property-based invariant tests for the component kit.
//!
//! 1. `format_counter` groups digits without losing any
//! 2. `TextInputState` never exceeds its max length and keeps the cursor in range
//! 3. Rendered text never leaks raw markup characters
//! 4. Modal scale and opacity stay bounded under arbitrary toggling

use std::time::Duration;

use bibliotech_widgets::{
    Button, ModalAnimationConfig, ModalAnimationState, TextInputState, Widget, format_counter,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Insert(String),
    Backspace,
    Left,
    Right,
    Clear,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => "[a-zA-Zçãé \n]{0,6}".prop_map(Edit::Insert),
        2 => Just(Edit::Backspace),
        1 => Just(Edit::Left),
        1 => Just(Edit::Right),
        1 => Just(Edit::Clear),
    ]
}

proptest! {
    #[test]
    fn counter_format_round_trips_digits(value in any::<u64>(), suffix in "[+%k]{0,2}") {
        let text = format_counter(value, &suffix);
        prop_assert!(text.ends_with(suffix.as_str()));
        let body = &text[..text.len() - suffix.len()];
        let digits: String = body.chars().filter(|c| *c != '.').collect();
        prop_assert_eq!(digits, value.to_string());
        for group in body.split('.').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
    }

    #[test]
    fn input_respects_max_length(
        max in 1usize..40,
        edits in proptest::collection::vec(edit_strategy(), 0..60),
    ) {
        let mut state = TextInputState::new().with_max_length(max);
        for edit in edits {
            match edit {
                Edit::Insert(s) => state.insert_text(&s),
                Edit::Backspace => { state.backspace(); }
                Edit::Left => state.move_left(),
                Edit::Right => state.move_right(),
                Edit::Clear => state.clear(),
            }
            prop_assert!(state.grapheme_count() <= max);
            prop_assert!(state.cursor() <= state.grapheme_count());
            prop_assert!(!state.value().contains('\n'));
        }
    }

    #[test]
    fn labels_are_always_escaped(label in ".{0,30}") {
        let html = Button::new(label).to_html();
        let inner = html
            .split_once('>')
            .map(|(_, rest)| rest.trim_end_matches("</button>"))
            .unwrap_or_default();
        prop_assert!(!inner.contains('<'));
        prop_assert!(!inner.contains('>'));
    }

    #[test]
    fn modal_values_stay_bounded(
        steps in proptest::collection::vec((any::<bool>(), 0u64..120), 0..50),
    ) {
        let config = ModalAnimationConfig::default();
        let mut state = ModalAnimationState::new();
        for (toggle, ms) in steps {
            if toggle {
                state.toggle();
            }
            state.tick(Duration::from_millis(ms), &config);
            let scale = state.scale(&config);
            let opacity = state.opacity(&config);
            prop_assert!((0.0..=1.0).contains(&state.progress()));
            prop_assert!((config.min_scale..=1.0).contains(&scale));
            prop_assert!((0.0..=1.0).contains(&opacity));
        }
    }
}
