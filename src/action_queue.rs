//! Sequential queue of deferred state-mutating actions.
//!
//! Actions run strictly in submission order and never overlap. Every queued
//! task shares one async-capable contract: it is polled and reports
//! [`TaskStatus::Done`] when finished or [`TaskStatus::Pending`] when it
//! still has work in flight. A synchronous action simply returns `Done` on
//! its first poll; a multi-step action stays at the head of the queue,
//! blocking everything behind it, until it completes.

use std::collections::VecDeque;

use anyhow::Result;
use tracing::{debug, warn};

/// Result of polling a queued task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The task finished and can be removed from the queue.
    Done,
    /// The task has work in flight; poll it again on the next update.
    Pending,
}

/// A queued unit of work, polled to completion by the queue.
pub type QueuedTask = Box<dyn FnMut() -> Result<TaskStatus>>;

struct QueueEntry {
    task: QueuedTask,
    id: Option<String>,
}

/// FIFO queue of deferred actions with optional per-action deduplication.
#[derive(Default)]
pub struct ActionQueueManager {
    entries: VecDeque<QueueEntry>,
}

impl ActionQueueManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and pump the queue. When `id` is given and an entry
    /// with the same id is already pending, the call is a silent no-op.
    pub fn enqueue(&mut self, task: QueuedTask, id: Option<&str>) {
        if let Some(id) = id {
            if self.entries.iter().any(|e| e.id.as_deref() == Some(id)) {
                debug!(id, "duplicate action dropped");
                return;
            }
        }
        self.entries.push_back(QueueEntry {
            task,
            id: id.map(str::to_string),
        });
        self.pump();
    }

    /// Pending entry count, including an in-flight head.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard all pending entries without running them. Emergency recovery.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            warn!(discarded = self.entries.len(), "action queue cleared");
            self.entries.clear();
        }
    }

    /// Continue polling an in-flight head task. Call once per frame.
    pub fn update(&mut self) {
        self.pump();
    }

    /// Drain loop: poll the head until it completes, then move on. A
    /// `Pending` head stops the pump, so tasks never overlap. A failing
    /// task is skipped with a warning and the queue continues.
    fn pump(&mut self) {
        while let Some(entry) = self.entries.front_mut() {
            match (entry.task)() {
                Ok(TaskStatus::Done) => {
                    self.entries.pop_front();
                }
                Ok(TaskStatus::Pending) => break,
                Err(err) => {
                    warn!(id = ?entry.id, error = %err, "queued action failed, skipping");
                    self.entries.pop_front();
                }
            }
        }
    }
}
