//! Panel transition guard.
//!
//! This module provides:
//! - [`Panel`]: identity of the mutually-exclusive base panels
//! - [`UiSnapshot`]: read-only view of the host's panel-visibility state
//! - [`StateAction`]: the dispatch vocabulary the guard constructs
//! - [`PanelManager`]: lock-gated, queue-serialized open/close/toggle

mod manager;
mod state;

pub use manager::{PanelManager, TRANSITION_DURATION_MS, TRANSITION_LOCK, TransitionState};
pub use state::{Panel, StateAction, UiSnapshot};
