//! Property-based tests for history navigation and cursor geometry

use proptest::prelude::*;
use termprompt::config::PromptConfig;
use termprompt::events::{EventHub, Signal, Subscriber};
use termprompt::history::{CommandLine, CommandLineStore};
use termprompt::keyboard::KeyMap;
use termprompt::ui::cursor::cursor_geometry;
use termprompt::ui::{CharMetrics, FixedLayout, PromptController, Selection};

fn prompt_over(
    entries: &[String],
) -> (PromptController<CommandLineStore, FixedLayout>, Subscriber<Signal>) {
    let (hub, batons) = EventHub::new();
    let signals = hub.subscribe();
    let prompt = PromptController::new(
        batons,
        CommandLineStore::with_entries(1000, entries.iter().cloned()),
        FixedLayout::new(800.0),
        KeyMap::default(),
        &PromptConfig::default(),
    );
    (prompt, signals)
}

fn no_submissions(signals: &mut Subscriber<Signal>) -> bool {
    signals
        .drain()
        .iter()
        .all(|s| !matches!(s, Signal::CommandSubmitted(_)))
}

proptest! {
    #[test]
    fn test_navigation_in_range_shows_entry(
        entries in prop::collection::vec("[a-z ]{1,12}", 1..20),
        steps in 1usize..20,
    ) {
        let (mut prompt, mut signals) = prompt_over(&entries);
        let len = entries.len();

        for _ in 0..steps {
            prompt.command_select_change(1);
        }

        // Every len + 1 presses of Up cycle back to a blank line
        let position = steps % (len + 1);
        if position == 0 {
            prop_assert_eq!(prompt.navigation_index(), -1);
            prop_assert_eq!(prompt.field().value(), "");
        } else {
            let index = position - 1;
            prop_assert_eq!(prompt.navigation_index(), index as isize);
            prop_assert_eq!(prompt.field().value(), entries[len - 1 - index].as_str());
        }
        prop_assert!(no_submissions(&mut signals));
        prop_assert_eq!(prompt.command_line().history_len(), len);
    }

    #[test]
    fn test_out_of_range_clears(
        entries in prop::collection::vec("[a-z]{1,8}", 0..10),
        draft in "[a-z]{0,8}",
    ) {
        let (mut prompt, _signals) = prompt_over(&entries);
        prompt.field_mut().insert_str(&draft);

        // Down from a fresh line is always out of range
        prompt.command_select_change(-1);
        prop_assert_eq!(prompt.navigation_index(), -1);
        prop_assert_eq!(prompt.field().value(), "");
    }

    #[test]
    fn test_any_delta_from_any_position(
        entries in prop::collection::vec("[a-z]{1,8}", 0..10),
        start in 0usize..12,
        delta in any::<isize>(),
    ) {
        let (mut prompt, mut signals) = prompt_over(&entries);
        let len = entries.len();
        for _ in 0..start {
            prompt.command_select_change(1);
        }
        let from = prompt.navigation_index();
        prompt.field_mut().insert_str("draft");

        prompt.command_select_change(delta);

        let target = from
            .checked_add(delta)
            .and_then(|t| usize::try_from(t).ok())
            .filter(|&t| t < len);
        match target {
            Some(index) => {
                prop_assert_eq!(prompt.navigation_index(), index as isize);
                prop_assert_eq!(prompt.field().value(), entries[len - 1 - index].as_str());
            }
            None => {
                prop_assert_eq!(prompt.navigation_index(), -1);
                prop_assert_eq!(prompt.field().value(), "");
            }
        }
        prop_assert!(no_submissions(&mut signals));
    }

    #[test]
    fn test_recording_rule(
        entries in prop::collection::vec("[a-z]{1,8}", 0..10),
        value in "[a-z]{0,8}",
        browse in any::<bool>(),
    ) {
        let (mut prompt, _signals) = prompt_over(&entries);
        if browse {
            prompt.command_select_change(1);
        }

        let before = prompt.command_line().history_len();
        let browsing = prompt.command_line().history_entry(0).filter(|_| browse).map(str::to_string);
        let recorded = prompt.add_to_command_history(&value);

        let expected = !value.is_empty() && browsing.as_deref() != Some(value.as_str());
        prop_assert_eq!(recorded, expected);
        prop_assert_eq!(
            prompt.command_line().history_len(),
            before + usize::from(expected)
        );
    }

    #[test]
    fn test_cursor_stays_inside_paragraph(
        len in 0usize..500,
        start in 0usize..500,
        extent in 0usize..200,
        width in 10.0f32..2000.0,
        zoom in 0.5f32..3.0,
    ) {
        let start = start.min(len);
        let end = (start + extent).min(len);
        let metrics = CharMetrics::default();
        let rect = cursor_geometry(len, Some(Selection::new(start, end)), width, metrics, zoom);

        let char_width = metrics.char_width * zoom;
        let chars_per_line = (width / char_width).max(1.0);
        prop_assert!(rect.width >= char_width.min(chars_per_line * char_width) - 1e-3);
        prop_assert!(rect.width <= chars_per_line * char_width + 1e-3);
        prop_assert!(rect.left >= 0.0);
        prop_assert!(rect.left < chars_per_line * char_width + 1e-3);
        prop_assert!(rect.top >= 0.0);
    }
}
