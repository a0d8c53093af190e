//! Lock-gated, queue-serialized panel transitions.
//!
//! Every open/close goes through the same two gates: the `ui_transition`
//! critical section blocks a second transition from starting before the
//! animation window of the first has passed, and the action queue serializes
//! the dispatch calls that actually mutate host state. A request that loses
//! the lock race is dropped, never deferred, so a stale transition cannot
//! fire after the UI has moved on.

use tracing::{debug, warn};

use crate::action_queue::{ActionQueueManager, TaskStatus};
use crate::critical_section::CriticalSectionManager;

use super::state::{Panel, StateAction, UiSnapshot};

/// Critical-section key guarding panel open/close transitions.
pub const TRANSITION_LOCK: &str = "ui_transition";

/// Lock duration, matching the host's panel animation length.
pub const TRANSITION_DURATION_MS: u64 = 300;

/// Observable transition status for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionState {
    /// Mirrors the transition lock.
    pub is_transitioning: bool,
    /// True only once the lock has cleared and no deferred panel mutation
    /// remains pending.
    pub can_accept_input: bool,
}

/// Serializes panel open/close/toggle against rapid repeated hotkeys and
/// mid-transition requests. Owns the lock table and the action queue;
/// collaborators receive them by reference.
#[derive(Default)]
pub struct PanelManager {
    locks: CriticalSectionManager,
    queue: ActionQueueManager,
}

impl PanelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct from pre-built parts. Used by hosts that share the managers
    /// with other subsystems and by tests that need direct access.
    pub fn with_parts(locks: CriticalSectionManager, queue: ActionQueueManager) -> Self {
        Self { locks, queue }
    }

    /// The lock table, for collaborators that gate on the transition lock.
    pub fn locks(&self) -> &CriticalSectionManager {
        &self.locks
    }

    pub fn queue(&self) -> &ActionQueueManager {
        &self.queue
    }

    /// Open `panel`, closing every other base panel first. Drops the request
    /// with a warning when a transition is already in flight.
    pub fn open_panel_safely<D>(&mut self, panel: Panel, now_ms: u64, dispatch: D)
    where
        D: FnMut(StateAction) + 'static,
    {
        let Some(open) = panel.open_action() else {
            warn!(%panel, "panel cannot be opened by the guard, request dropped");
            return;
        };
        if !self.locks.lock(TRANSITION_LOCK, TRANSITION_DURATION_MS, now_ms) {
            warn!(%panel, "transition in progress, open request dropped");
            return;
        }

        let mut actions: Vec<StateAction> = Panel::all()
            .iter()
            .filter(|other| **other != panel)
            .map(|other| other.close_action())
            .collect();
        actions.push(open);

        debug!(%panel, "panel open enqueued");
        self.enqueue_dispatch(actions, &format!("open_panel_{}", panel.name()), dispatch);
    }

    /// Close every base panel. Drops the request when a transition is
    /// already in flight.
    pub fn close_all_panels_safely<D>(&mut self, now_ms: u64, dispatch: D)
    where
        D: FnMut(StateAction) + 'static,
    {
        if !self.locks.lock(TRANSITION_LOCK, TRANSITION_DURATION_MS, now_ms) {
            warn!("transition in progress, close-all request dropped");
            return;
        }

        let actions: Vec<StateAction> = Panel::all()
            .iter()
            .map(|panel| panel.close_action())
            .collect();

        debug!("close-all enqueued");
        self.enqueue_dispatch(actions, "close_all_panels", dispatch);
    }

    /// Toggle `panel` based on the current snapshot. Unlike open/close-all,
    /// this checks the lock up front and drops the request without even
    /// attempting to acquire it.
    pub fn toggle_panel_safely<D>(
        &mut self,
        panel: Panel,
        snapshot: &UiSnapshot,
        now_ms: u64,
        dispatch: D,
    ) where
        D: FnMut(StateAction) + 'static,
    {
        if self.locks.is_locked(TRANSITION_LOCK, now_ms) {
            warn!(%panel, "transition in progress, toggle dropped");
            return;
        }
        if snapshot.is_open(panel) {
            self.close_all_panels_safely(now_ms, dispatch);
        } else {
            self.open_panel_safely(panel, now_ms, dispatch);
        }
    }

    /// Pure predicate over the snapshot.
    pub fn is_panel_open(&self, panel: Panel, snapshot: &UiSnapshot) -> bool {
        snapshot.is_open(panel)
    }

    pub fn transition_state(&self, now_ms: u64) -> TransitionState {
        let is_transitioning = self.locks.is_locked(TRANSITION_LOCK, now_ms);
        TransitionState {
            is_transitioning,
            can_accept_input: !is_transitioning && self.queue.is_empty(),
        }
    }

    /// Force-release the transition lock and discard all pending actions.
    /// Last-resort recovery for a stuck UI; no precondition.
    pub fn emergency_reset(&mut self) {
        warn!("emergency reset: releasing transition lock and clearing queue");
        self.locks.release(TRANSITION_LOCK);
        self.queue.clear();
    }

    /// Pump the action queue. Call once per frame.
    pub fn update(&mut self) {
        self.queue.update();
    }

    fn enqueue_dispatch<D>(&mut self, mut actions: Vec<StateAction>, id: &str, mut dispatch: D)
    where
        D: FnMut(StateAction) + 'static,
    {
        self.queue.enqueue(
            Box::new(move || {
                for action in actions.drain(..) {
                    dispatch(action);
                }
                Ok(TaskStatus::Done)
            }),
            Some(id),
        );
    }
}
