//! Command history display
//!
//! Mirrors the command collection into mounted views, keeps the
//! scrollback pinned to the bottom while it overflows, and prunes
//! finished commands on request.

use crate::config::DisplayConfig;
use crate::events::{EventHub, Signal, Subscriber};
use crate::models::{CollectionEvent, Command, CommandCollection};
use crate::ui::scroll::{AutoScroll, ScrollDecision, ScrollSurface};

/// Produces the rendered view for a command
pub trait ViewFactory {
    type View;

    /// Render a fresh view
    fn render(&mut self, command: &Command) -> Self::View;

    /// Bring an existing view up to date after the command changed
    fn refresh(&mut self, _view: &mut Self::View, _command: &Command) {}
}

/// A view attached to the display container
#[derive(Debug, Clone, PartialEq)]
pub struct MountedView<V> {
    /// Id of the element holding the view
    pub element_id: String,
    /// Command the view renders
    pub command_id: String,
    pub view: V,
}

/// The scrollback
pub struct HistoryDisplay<F: ViewFactory, S: ScrollSurface> {
    collection: CommandCollection,
    collection_events: Subscriber<CollectionEvent>,
    signals: Subscriber<Signal>,
    factory: F,
    surface: S,
    mounted: Vec<MountedView<F::View>>,
    autoscroll: AutoScroll,
}

impl<F: ViewFactory, S: ScrollSurface> HistoryDisplay<F, S> {
    /// Create the display and mount whatever the collection already holds
    pub fn new(
        hub: &EventHub,
        collection: CommandCollection,
        factory: F,
        surface: S,
        config: &DisplayConfig,
    ) -> Self {
        let collection_events = collection.subscribe();
        let mut display = Self {
            collection,
            collection_events,
            signals: hub.subscribe_where(|s| {
                matches!(s, Signal::ScrollDown | Signal::ClearOldCommands)
            }),
            factory,
            surface,
            mounted: Vec::new(),
            autoscroll: AutoScroll::new(config.autoscroll),
        };
        if !display.collection.is_empty() {
            display.add_all();
        }
        display
    }

    /// Drop subscriptions and mounted views, returning the owned parts
    pub fn dispose(self) -> (CommandCollection, F, S) {
        debug!("Disposing history display with {} views", self.mounted.len());
        (self.collection, self.factory, self.surface)
    }

    /// Handle pending collection events and hub signals
    pub fn pump(&mut self) -> usize {
        let mut handled = self.sync_collection();

        while let Some(signal) = self.signals.try_next() {
            match signal {
                Signal::ScrollDown => {
                    self.scroll_down();
                    handled += 1;
                }
                Signal::ClearOldCommands => {
                    self.clear_old_commands();
                    handled += 1;
                }
                _ => {}
            }
        }
        handled
    }

    fn sync_collection(&mut self) -> usize {
        let events = self.collection_events.drain();
        let handled = events.len();

        for event in events {
            match event {
                CollectionEvent::Added { id } => self.add_one(&id),
                CollectionEvent::Changed { id } => {
                    self.refresh_one(&id);
                    self.scroll_down();
                }
                CollectionEvent::Removed { id } => {
                    self.mounted.retain(|m| m.command_id != id);
                    self.scroll_down();
                }
                CollectionEvent::Reset => self.add_all(),
            };
        }
        handled
    }

    /// Mount a view for the command with `id` after the existing ones
    pub fn add_one(&mut self, id: &str) {
        if self.mounted.iter().any(|m| m.command_id == id) {
            return;
        }
        let Some(command) = self.collection.get(id) else {
            // Destroyed before we got to it
            return;
        };

        let view = self.factory.render(command);
        self.mounted.push(MountedView {
            element_id: command.element_id(),
            command_id: command.id.clone(),
            view,
        });
        self.scroll_down();
    }

    /// Mount a view for every command, replacing what was mounted
    pub fn add_all(&mut self) {
        self.mounted.clear();
        let ids: Vec<String> = self.collection.iter().map(|c| c.id.clone()).collect();
        for id in ids {
            self.add_one(&id);
        }
        self.scroll_down();
    }

    fn refresh_one(&mut self, id: &str) {
        let Some(command) = self.collection.get(id) else {
            return;
        };
        if let Some(mounted) = self.mounted.iter_mut().find(|m| m.command_id == id) {
            self.factory.refresh(&mut mounted.view, command);
        }
    }

    /// Show a non-fatal warning inline; returns the new command's id
    pub fn add_warning(&mut self, msg: impl Into<String>) -> String {
        let command = Command::warning(msg);
        warn!("{}", command.result.as_deref().unwrap_or_default());
        let id = self.collection.add(command);
        self.sync_collection();
        id
    }

    /// Destroy every command that is neither queued nor processing.
    /// Returns how many were removed.
    pub fn clear_old_commands(&mut self) -> usize {
        let to_destroy: Vec<String> = self
            .collection
            .iter()
            .filter(|c| !c.is_active())
            .map(|c| c.id.clone())
            .collect();

        for id in &to_destroy {
            self.collection.destroy(id);
        }
        self.sync_collection();

        info!("Cleared {} finished commands", to_destroy.len());
        self.scroll_down();
        to_destroy.len()
    }

    /// Recompute scrolling and snap to the bottom if needed
    pub fn scroll_down(&mut self) -> ScrollDecision {
        self.autoscroll.apply(&mut self.surface)
    }

    pub fn collection(&self) -> &CommandCollection {
        &self.collection
    }

    /// Mutations show up in the display on the next [`pump`](Self::pump)
    pub fn collection_mut(&mut self) -> &mut CommandCollection {
        &mut self.collection
    }

    pub fn mounted(&self) -> &[MountedView<F::View>] {
        &self.mounted
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}
