//! Debounce and throttle primitives for collapsing bursts of calls.
//!
//! Both are driven by caller-supplied millisecond timestamps: the host loop
//! feeds events in with [`Debounce::call`] / [`Throttle::call`] and polls once
//! per frame with `poll`, which yields the coalesced arguments when the
//! deferred invocation is due. Only the most recent arguments survive
//! coalescing.

/// A pending deferred invocation: the latest arguments and when they fire.
#[derive(Debug, Clone, Copy)]
struct PendingCall<T> {
    args: T,
    deadline_ms: u64,
}

/// Collapses a burst of calls into a single trailing invocation.
///
/// Each `call` restarts the delay; the wrapped invocation only becomes due
/// once the delay elapses without another call resetting it.
#[derive(Debug)]
pub struct Debounce<T> {
    delay_ms: u64,
    pending: Option<PendingCall<T>>,
}

impl<T> Debounce<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Record a call. Overwrites any previously recorded arguments and
    /// restarts the delay from `now_ms`.
    pub fn call(&mut self, args: T, now_ms: u64) {
        self.pending = Some(PendingCall {
            args,
            deadline_ms: now_ms + self.delay_ms,
        });
    }

    /// Yield the coalesced arguments once the delay has elapsed.
    /// Fires at most once per burst.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some(pending) if now_ms >= pending.deadline_ms => {
                self.pending.take().map(|p| p.args)
            }
            _ => None,
        }
    }

    /// Discard any pending invocation. Idempotent, no side effect.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Caps call frequency to at most one invocation per fixed window.
///
/// The first call in a closed window fires immediately (`call` returns the
/// arguments); calls landing inside an open window are coalesced into a
/// single trailing invocation carrying the most recent arguments.
#[derive(Debug)]
pub struct Throttle<T> {
    delay_ms: u64,
    window_start_ms: Option<u64>,
    trailing: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            window_start_ms: None,
            trailing: None,
        }
    }

    /// Record a call. Returns `Some(args)` when the call may fire
    /// immediately, opening a new window; `None` when it was coalesced into
    /// the trailing slot of the current window.
    pub fn call(&mut self, args: T, now_ms: u64) -> Option<T> {
        if self.window_open(now_ms) {
            self.trailing = Some(args);
            return None;
        }
        // This call supersedes any trailing one left from the previous
        // window; firing both would reorder arguments.
        self.trailing = None;
        self.window_start_ms = Some(now_ms);
        Some(args)
    }

    /// Yield the trailing invocation once the current window has elapsed.
    /// Opens a fresh window when it fires.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.trailing.is_some() && !self.window_open(now_ms) {
            self.window_start_ms = Some(now_ms);
            return self.trailing.take();
        }
        None
    }

    /// Discard the trailing invocation and close the window. Idempotent.
    pub fn cancel(&mut self) {
        self.trailing = None;
        self.window_start_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.trailing.is_some()
    }

    fn window_open(&self, now_ms: u64) -> bool {
        match self.window_start_ms {
            Some(start) => now_ms < start + self.delay_ms,
            None => false,
        }
    }
}
