//! Single-threaded periodic task scheduler.
//!
//! All timed work (scroll ticks, countdown ticks) runs on one cooperative
//! timeline owned by the event loop. Callers pass `now` explicitly, so the
//! scheduler is deterministic under test.

use std::time::{Duration, Instant};

/// Handle returned by [`Scheduler::every`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// What a task wants after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    /// Keep the task registered.
    Continue,
    /// Remove the task.
    Cancel,
}

/// Callback invoked with the context and the actual time since its previous run.
pub type TaskFn<C> = Box<dyn FnMut(&mut C, Duration) -> TaskControl>;

struct Task<C> {
    id: TaskId,
    interval: Duration,
    last_run: Instant,
    callback: TaskFn<C>,
}

/// Runs periodic callbacks against a shared context `C`.
pub struct Scheduler<C> {
    tasks: Vec<Task<C>>,
    next_id: u64,
}

impl<C> Scheduler<C> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `callback` to run every `interval`, first due at `now + interval`.
    pub fn every(&mut self, interval: Duration, now: Instant, callback: TaskFn<C>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            interval,
            last_run: now,
            callback,
        });
        id
    }

    /// Remove a task. Returns false if it was not registered.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// True if the task is registered.
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True if no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Take the time elapsed since task `id` last ran and mark it as run at `now`.
    ///
    /// Lets the owner bring a task's work up to `now` outside its deadline. A
    /// `now` before the last run yields zero and leaves the task unchanged.
    /// Returns `None` if the task is not registered.
    pub fn catch_up(&mut self, id: TaskId, now: Instant) -> Option<Duration> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        let elapsed = now.saturating_duration_since(task.last_run);
        if now > task.last_run {
            task.last_run = now;
        }
        Some(elapsed)
    }

    /// Earliest instant at which some task is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks
            .iter()
            .map(|task| task.last_run + task.interval)
            .min()
    }

    /// Run every task whose deadline is at or before `now`, in registration order.
    ///
    /// Each due task runs once and receives the real elapsed time since its last
    /// run, so a late tick catches up in one step. Returns how many ran.
    pub fn run_due(&mut self, ctx: &mut C, now: Instant) -> usize {
        let mut ran = 0;
        self.tasks.retain_mut(|task| {
            if now < task.last_run + task.interval {
                return true;
            }
            let elapsed = now.saturating_duration_since(task.last_run);
            task.last_run = now;
            ran += 1;
            (task.callback)(ctx, elapsed) == TaskControl::Continue
        });
        ran
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for Scheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("tasks", &self.tasks.iter().map(|t| t.id).collect::<Vec<_>>())
            .finish()
    }
}
