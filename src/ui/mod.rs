//! UI components
//!
//! The prompt and scrollback are headless: they compute markup, geometry
//! and mount lists, and reach the real rendering surface only through the
//! [`TextLayout`], [`ScrollSurface`] and [`ViewFactory`] traits.

pub mod cursor;
pub mod history_view;
pub mod input;
pub mod scroll;

pub use cursor::{CharMetrics, CursorRect, FixedLayout, Selection, TextLayout};
pub use history_view::{HistoryDisplay, MountedView, ViewFactory};
pub use input::{KeyEvent, KeyOutcome, PromptAction, PromptController, PromptRender, TextField};
pub use scroll::{AutoScroll, ScrollDecision, ScrollMetrics, ScrollSurface, VirtualViewport};
