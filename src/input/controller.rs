//! Debounced, lock-aware keyboard event pipeline.
//!
//! Raw key events arrive noisy: OS key repeat fires dozens of `keydown`s per
//! second, and a hotkey can land in the middle of a panel transition. The
//! controller filters both, maintains the canonical pressed-key set from the
//! ordered event stream, and derives a single unambiguous movement
//! direction.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::critical_section::CriticalSectionManager;
use crate::panel::TRANSITION_LOCK;
use crate::rate_limit::Debounce;

use super::bindings::{GameAction, InputBindings};
use super::key_code::KeyCode;

/// Minimum interval between accepted `keydown`s of the same key.
pub const KEY_REPEAT_DELAY_MS: u64 = 150;

/// Delay of the debounced token drain, coalescing event bursts.
pub const DRAIN_DEBOUNCE_MS: u64 = 10;

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        &[
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    fn action(self) -> GameAction {
        match self {
            Direction::Up => GameAction::MoveUp,
            Direction::Down => GameAction::MoveDown,
            Direction::Left => GameAction::MoveLeft,
            Direction::Right => GameAction::MoveRight,
        }
    }
}

/// What happened to a `keydown`, and whether the host should swallow the
/// native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDownOutcome {
    /// Event entered the pipeline.
    Accepted,
    /// Same key was accepted less than [`KEY_REPEAT_DELAY_MS`] ago.
    RepeatSuppressed,
    /// A UI transition is in flight; input is refused.
    LockedOut,
    /// Key is outside the recognized taxonomy; the host keeps it.
    Unbound,
}

impl KeyDownOutcome {
    /// Whether the host should suppress default handling of the native
    /// event. True for every recognized game key, accepted or not.
    pub fn suppress_default(&self) -> bool {
        !matches!(self, KeyDownOutcome::Unbound)
    }
}

/// Ordered down/up token, consumed by the debounced drain.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyToken {
    Down(KeyCode),
    Up(KeyCode),
}

/// Turns raw keyboard events into a stable, debounced stream that respects
/// the panel transition lock.
pub struct InputController {
    bindings: InputBindings,
    /// Ordered event queue awaiting the debounced drain.
    tokens: VecDeque<KeyToken>,
    /// Canonical currently-pressed set, updated only by the drain.
    pressed: HashSet<KeyCode>,
    /// Last accepted keydown per key, for repeat suppression.
    last_down_ms: HashMap<KeyCode, u64>,
    drain: Debounce<()>,
}

impl InputController {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            bindings,
            tokens: VecDeque::new(),
            pressed: HashSet::new(),
            last_down_ms: HashMap::new(),
            drain: Debounce::new(DRAIN_DEBOUNCE_MS),
        }
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    /// The action bound to `key`, for hotkey routing by the host.
    pub fn action_for(&self, key: &KeyCode) -> Option<GameAction> {
        self.bindings.action_for(key)
    }

    /// Feed a native `keydown`. Repeats inside [`KEY_REPEAT_DELAY_MS`] and
    /// events arriving while the transition lock is held are rejected.
    pub fn handle_key_down(
        &mut self,
        key: &KeyCode,
        now_ms: u64,
        locks: &CriticalSectionManager,
    ) -> KeyDownOutcome {
        if !self.bindings.recognizes(key) {
            return KeyDownOutcome::Unbound;
        }
        if let Some(last) = self.last_down_ms.get(key) {
            if now_ms.saturating_sub(*last) < KEY_REPEAT_DELAY_MS {
                return KeyDownOutcome::RepeatSuppressed;
            }
        }
        if locks.is_locked(TRANSITION_LOCK, now_ms) {
            debug!(%key, "keydown refused during transition");
            return KeyDownOutcome::LockedOut;
        }

        self.last_down_ms.insert(key.clone(), now_ms);
        self.tokens.push_back(KeyToken::Down(key.clone()));
        self.drain.call((), now_ms);
        KeyDownOutcome::Accepted
    }

    /// Feed a native `keyup`. Never rate-limited and never refused, so a key
    /// cannot get stuck held by a suppressed release. Returns the suppress
    /// flag for the host.
    pub fn handle_key_up(&mut self, key: &KeyCode, now_ms: u64) -> bool {
        if !self.bindings.recognizes(key) {
            return false;
        }
        self.tokens.push_back(KeyToken::Up(key.clone()));
        self.drain.call((), now_ms);
        true
    }

    /// Poll the debounced drain. Call once per frame.
    pub fn update(&mut self, now_ms: u64) {
        if self.drain.poll(now_ms).is_some() {
            self.drain_tokens();
        }
    }

    /// The single unambiguous movement direction, if any. `None` while the
    /// transition lock is held, and `None` whenever more than one
    /// directional group is active: ties resolve to no movement, never to a
    /// diagonal.
    pub fn direction(&self, locks: &CriticalSectionManager, now_ms: u64) -> Option<Direction> {
        if locks.is_locked(TRANSITION_LOCK, now_ms) {
            return None;
        }
        let mut active = Direction::all()
            .iter()
            .copied()
            .filter(|direction| self.group_active(*direction));
        match (active.next(), active.next()) {
            (Some(direction), None) => Some(direction),
            _ => None,
        }
    }

    /// Canonical pressed-key set. Diagnostic read.
    pub fn pressed_keys(&self) -> &HashSet<KeyCode> {
        &self.pressed
    }

    /// Tokens waiting for the next drain. Diagnostic read.
    pub fn pending_token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Teardown: cancel the pending drain and clear all controller state.
    /// Removing native listeners is the host's job.
    pub fn shutdown(&mut self) {
        self.drain.cancel();
        self.tokens.clear();
        self.pressed.clear();
        self.last_down_ms.clear();
    }

    fn drain_tokens(&mut self) {
        let drained = self.tokens.len();
        for token in self.tokens.drain(..) {
            match token {
                KeyToken::Down(key) => {
                    self.pressed.insert(key);
                }
                KeyToken::Up(key) => {
                    self.pressed.remove(&key);
                }
            }
        }
        if drained > 0 {
            debug!(drained, pressed = self.pressed.len(), "key tokens drained");
        }
    }

    fn group_active(&self, direction: Direction) -> bool {
        self.bindings
            .keys_for(direction.action())
            .iter()
            .any(|key| self.pressed.contains(key))
    }
}
