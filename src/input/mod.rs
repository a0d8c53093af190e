//! Keyboard-input stabilization.
//!
//! This module provides:
//! - [`KeyCode`]: serializable string-named key identity
//! - [`InputBindings`]: action-to-key configuration with save/load
//! - [`InputController`]: debounced, lock-aware key event pipeline
//! - [`Direction`]: unambiguous movement direction derivation

mod bindings;
mod controller;
mod key_code;

pub use bindings::{GameAction, InputBindings};
pub use controller::{
    DRAIN_DEBOUNCE_MS, Direction, InputController, KEY_REPEAT_DELAY_MS, KeyDownOutcome,
};
pub use key_code::KeyCode;
