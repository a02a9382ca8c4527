//! The cooperative timeline: command queue, scheduler and controller together.
//!
//! Commands are queued and applied strictly one after another on the same
//! thread that runs timed ticks, so a tick never observes a half-applied
//! command. Phase transitions register or replace the scroll and countdown
//! tasks; each task also cancels itself once its phase is over.

use super::command::Command;
use super::controller::PlaybackController;
use super::phase::PlaybackPhase;
use super::scheduler::{Scheduler, TaskControl, TaskId};
use super::snapshot::Snapshot;
use crate::layout::LayoutProvider;
use crate::model::CommandError;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::warn;

/// Default scroll tick interval (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Countdown tick interval.
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

/// Controller plus the pending command queue and emitted snapshots.
///
/// This is the context scheduled tasks run against.
#[derive(Debug)]
pub struct Session<P> {
    controller: PlaybackController<P>,
    queue: VecDeque<Command>,
    outbox: Vec<Snapshot>,
}

impl<P: LayoutProvider> Session<P> {
    /// Wrap a controller.
    pub fn new(controller: PlaybackController<P>) -> Self {
        Self {
            controller,
            queue: VecDeque::new(),
            outbox: Vec::new(),
        }
    }

    /// The controller.
    pub fn controller(&self) -> &PlaybackController<P> {
        &self.controller
    }

    /// Number of commands waiting.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn enqueue(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    fn dispatch_next(&mut self) -> Option<Result<(), CommandError>> {
        let command = self.queue.pop_front()?;
        Some(self.controller.dispatch(command).map(|changed| {
            self.outbox.extend(changed);
        }))
    }

    fn advance(&mut self, elapsed: Duration) {
        let changed = self.controller.advance(elapsed);
        self.outbox.extend(changed);
    }

    fn tick_countdown(&mut self, elapsed: Duration) {
        let changed = self.controller.tick_countdown(elapsed);
        self.outbox.extend(changed);
    }
}

/// Drives a [`Session`] from the event loop.
pub struct Timeline<P> {
    session: Session<P>,
    scheduler: Scheduler<Session<P>>,
    scroll_task: Option<TaskId>,
    countdown_task: Option<TaskId>,
    frame_interval: Duration,
}

impl<P: LayoutProvider + 'static> Timeline<P> {
    /// Create a timeline ticking the scroll position every `frame_interval`.
    pub fn new(controller: PlaybackController<P>, frame_interval: Duration) -> Self {
        Self {
            session: Session::new(controller),
            scheduler: Scheduler::new(),
            scroll_task: None,
            countdown_task: None,
            frame_interval,
        }
    }

    /// The controller.
    pub fn controller(&self) -> &PlaybackController<P> {
        self.session.controller()
    }

    /// Queue a command for the next [`Timeline::process`].
    pub fn submit(&mut self, command: Command) {
        self.session.enqueue(command);
    }

    /// Apply all queued commands in order.
    ///
    /// While playing, the position is first brought up to `now` so each command
    /// acts on where the script actually is rather than where the last frame
    /// left it. Rejections are logged and returned; they do not stop later
    /// commands.
    pub fn process(&mut self, now: Instant) -> Vec<CommandError> {
        let mut rejected = Vec::new();
        while self.session.queued() > 0 {
            let before = self.session.controller.phase();
            self.catch_up_scroll(now);
            match self.session.dispatch_next() {
                None => break,
                Some(Ok(())) => {}
                Some(Err(err)) => {
                    warn!(error = %err, "Command rejected");
                    rejected.push(err);
                }
            }
            self.sync_tasks(before, now);
        }
        rejected
    }

    /// Queue and immediately apply one command.
    pub fn apply(&mut self, command: Command, now: Instant) -> Result<(), CommandError> {
        self.submit(command);
        match self.process(now).pop() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run due ticks. Returns how many tasks ran.
    pub fn tick(&mut self, now: Instant) -> usize {
        let before = self.session.controller.phase();
        let ran = self.scheduler.run_due(&mut self.session, now);
        self.sync_tasks(before, now);
        ran
    }

    /// Earliest instant at which a tick is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Take snapshots emitted since the last call, oldest first.
    pub fn take_snapshots(&mut self) -> Vec<Snapshot> {
        std::mem::take(&mut self.session.outbox)
    }

    fn catch_up_scroll(&mut self, now: Instant) {
        if self.session.controller.phase() != PlaybackPhase::Playing {
            return;
        }
        let Some(id) = self.scroll_task else {
            return;
        };
        if let Some(elapsed) = self.scheduler.catch_up(id, now) {
            self.session.advance(elapsed);
        }
    }

    fn sync_tasks(&mut self, before: PlaybackPhase, now: Instant) {
        let after = self.session.controller.phase();
        if before == after {
            return;
        }

        match after {
            PlaybackPhase::Playing => {
                if let Some(id) = self.scroll_task.take() {
                    self.scheduler.cancel(id);
                }
                let id = self.scheduler.every(
                    self.frame_interval,
                    now,
                    Box::new(|session: &mut Session<P>, elapsed: Duration| {
                        if session.controller.phase() != PlaybackPhase::Playing {
                            return TaskControl::Cancel;
                        }
                        session.advance(elapsed);
                        TaskControl::Continue
                    }),
                );
                self.scroll_task = Some(id);
            }
            PlaybackPhase::Countdown => {
                if let Some(id) = self.countdown_task.take() {
                    self.scheduler.cancel(id);
                }
                let id = self.scheduler.every(
                    COUNTDOWN_INTERVAL,
                    now,
                    Box::new(|session: &mut Session<P>, elapsed: Duration| {
                        if session.controller.phase() != PlaybackPhase::Countdown {
                            return TaskControl::Cancel;
                        }
                        session.tick_countdown(elapsed);
                        TaskControl::Continue
                    }),
                );
                self.countdown_task = Some(id);
            }
            PlaybackPhase::Idle | PlaybackPhase::Paused | PlaybackPhase::Finished => {}
        }

        if after != PlaybackPhase::Playing {
            if let Some(id) = self.scroll_task.take() {
                self.scheduler.cancel(id);
            }
        }
        if after != PlaybackPhase::Countdown {
            if let Some(id) = self.countdown_task.take() {
                self.scheduler.cancel(id);
            }
        }
    }
}

impl<P> std::fmt::Debug for Timeline<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("scheduler", &self.scheduler)
            .field("scroll_task", &self.scroll_task)
            .field("countdown_task", &self.countdown_task)
            .finish()
    }
}
