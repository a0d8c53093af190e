//! Input/UI-transition concurrency guard for a cooperative event loop.
//!
//! Prevents rapid user input from racing asynchronous UI transitions: the
//! critical-section lock blocks overlapping panel animations, the action
//! queue serializes state mutation, and the input controller debounces raw
//! key events and refuses them mid-transition. The host supplies a
//! `dispatch` callback and a read-only state snapshot; the guard never
//! inspects application semantics beyond panel identity.

pub mod action_queue;
pub mod critical_section;
pub mod input;
pub mod panel;
pub mod rate_limit;
pub mod util;
