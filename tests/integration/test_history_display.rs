//! Integration tests for the scrollback display

#[path = "../test_utils/mod.rs"]
mod test_utils;

use termprompt::config::DisplayConfig;
use termprompt::events::EventHub;
use termprompt::models::{Command, CommandCollection, CommandError, CommandStatus, ErrorKind};
use termprompt::ui::HistoryDisplay;
use test_utils::*;

fn display_with(
    collection: CommandCollection,
    autoscroll: bool,
) -> (HistoryDisplay<RecordingViews, MockSurface>, EventHub) {
    let (hub, _batons) = EventHub::new();
    let display = HistoryDisplay::new(
        &hub,
        collection,
        RecordingViews::default(),
        MockSurface::new(200.0, 600.0),
        &DisplayConfig { autoscroll },
    );
    (display, hub)
}

#[test]
fn test_existing_commands_mounted_in_order() {
    let mut collection = CommandCollection::new();
    collection.add(Command::new("git init"));
    collection.add(Command::new("git status"));

    let (display, _hub) = display_with(collection, true);

    let raws: Vec<_> = display.mounted().iter().map(|m| m.view.raw.as_str()).collect();
    assert_eq!(raws, vec!["git init", "git status"]);
    assert_eq!(display.factory().rendered, 2);
}

#[test]
fn test_added_commands_mount_on_pump() {
    let (mut display, _hub) = display_with(CommandCollection::new(), true);
    let id = display.collection_mut().add(Command::new("git branch"));
    assert!(display.mounted().is_empty());

    display.pump();
    assert_eq!(display.mounted().len(), 1);
    assert_eq!(display.mounted()[0].command_id, id);
    assert!(display.mounted()[0].element_id.starts_with("command_"));
}

#[test]
fn test_destroyed_before_pump_is_not_mounted() {
    let (mut display, _hub) = display_with(CommandCollection::new(), true);
    let id = display.collection_mut().add(Command::new("git branch"));
    display.collection_mut().destroy(&id);

    display.pump();
    assert!(display.mounted().is_empty());
}

#[test]
fn test_warning_shown_immediately() {
    let (mut display, _hub) = display_with(CommandCollection::new(), true);
    let id = display.add_warning("Unknown command");

    assert_eq!(display.mounted().len(), 1);
    let command = display.collection().get(&id).unwrap();
    assert_eq!(command.status, CommandStatus::Error);
    let error = command.error.as_ref().unwrap();
    assert_eq!(error.kind, ErrorKind::Warning);
    assert_eq!(error.msg, "Unknown command");
}

#[test]
fn test_command_result_error_finishes_command() {
    let (mut display, _hub) = display_with(CommandCollection::new(), true);
    let id = display.collection_mut().add(Command::new("show goal"));
    display.pump();

    display
        .collection_mut()
        .update(&id, |c| c.set_error(CommandError::command_result("Goal shown")));
    display.pump();

    assert_eq!(display.mounted()[0].view.status, CommandStatus::Finished);
}

#[test]
fn test_clear_signal_prunes_only_finished() {
    let (mut display, hub) = display_with(CommandCollection::new(), true);
    let queued = display.collection_mut().add(Command::new("a"));
    let done = display.collection_mut().add(Command::new("b"));
    let failed = display.collection_mut().add(Command::new("c"));
    let running = display.collection_mut().add(Command::new("d"));
    display.collection_mut().set_status(&done, CommandStatus::Finished);
    display.collection_mut().set_status(&failed, CommandStatus::Error);
    display.collection_mut().set_status(&running, CommandStatus::Processing);
    display.pump();

    hub.clear_old_commands();
    display.pump();

    let ids: Vec<_> = display.collection().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![queued, running]);
    assert_eq!(display.mounted().len(), 2);
}

#[test]
fn test_scroll_signal_snaps_to_bottom() {
    let (mut display, hub) = display_with(CommandCollection::new(), true);
    display.surface_mut().entries = 10;

    hub.scroll_down();
    display.pump();

    assert!(display.surface().scrolling);
    assert_eq!(display.surface().scroll_top, 10.0 * ENTRY_HEIGHT);
}

#[test]
fn test_autoscroll_disabled_only_flags_scrolling() {
    let (mut display, hub) = display_with(CommandCollection::new(), false);
    display.surface_mut().entries = 10;

    hub.scroll_down();
    display.pump();

    assert!(display.surface().scrolling);
    assert_eq!(display.surface().scroll_calls, 0);
}

#[test]
fn test_reset_remounts_everything() {
    let (mut display, _hub) = display_with(CommandCollection::new(), true);
    display.collection_mut().add(Command::new("old"));
    display.pump();

    display
        .collection_mut()
        .reset(vec![Command::new("x"), Command::new("y")]);
    display.pump();

    let raws: Vec<_> = display.mounted().iter().map(|m| m.view.raw.as_str()).collect();
    assert_eq!(raws, vec!["x", "y"]);
}

#[test]
fn test_dispose_returns_collection() {
    let mut collection = CommandCollection::new();
    collection.add(Command::new("git log"));
    let (display, _hub) = display_with(collection, true);

    let (collection, factory, _surface) = display.dispose();
    assert_eq!(collection.len(), 1);
    assert_eq!(factory.rendered, 1);
}
