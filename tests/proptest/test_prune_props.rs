//! Property-based tests for pruning the scrollback

use proptest::prelude::*;
use termprompt::config::DisplayConfig;
use termprompt::events::EventHub;
use termprompt::models::{Command, CommandCollection, CommandStatus};
use termprompt::ui::{HistoryDisplay, ViewFactory, VirtualViewport};

struct Ids;

impl ViewFactory for Ids {
    type View = String;

    fn render(&mut self, command: &Command) -> String {
        command.id.clone()
    }
}

fn status() -> impl Strategy<Value = CommandStatus> {
    prop_oneof![
        Just(CommandStatus::InQueue),
        Just(CommandStatus::Processing),
        Just(CommandStatus::Finished),
        Just(CommandStatus::Error),
    ]
}

proptest! {
    #[test]
    fn test_prune_keeps_exactly_active(statuses in prop::collection::vec(status(), 0..40)) {
        let mut collection = CommandCollection::new();
        let mut ids = Vec::new();
        for (i, status) in statuses.iter().enumerate() {
            let mut command = Command::new(format!("cmd {}", i));
            command.status = *status;
            ids.push(collection.add(command));
        }

        let (hub, _batons) = EventHub::new();
        let mut display = HistoryDisplay::new(
            &hub,
            collection,
            Ids,
            VirtualViewport::new(400.0, 800.0),
            &DisplayConfig::default(),
        );
        let removed = display.clear_old_commands();

        let expected: Vec<&String> = ids
            .iter()
            .zip(&statuses)
            .filter(|(_, s)| s.is_active())
            .map(|(id, _)| id)
            .collect();
        let remaining: Vec<&String> = display.collection().iter().map(|c| &c.id).collect();
        let mounted: Vec<&String> = display.mounted().iter().map(|m| &m.view).collect();

        prop_assert_eq!(removed, ids.len() - expected.len());
        prop_assert_eq!(&remaining, &expected);
        prop_assert_eq!(&mounted, &expected);
    }

    #[test]
    fn test_prune_is_idempotent(statuses in prop::collection::vec(status(), 0..20)) {
        let mut collection = CommandCollection::new();
        for status in &statuses {
            let mut command = Command::new("x");
            command.status = *status;
            collection.add(command);
        }

        let (hub, _batons) = EventHub::new();
        let mut display = HistoryDisplay::new(
            &hub,
            collection,
            Ids,
            VirtualViewport::new(400.0, 800.0),
            &DisplayConfig::default(),
        );
        display.clear_old_commands();
        prop_assert_eq!(display.clear_old_commands(), 0);
    }
}
