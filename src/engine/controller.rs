//! Playback controller: the single owner of playback state.
//!
//! Every mutation goes through [`PlaybackController::dispatch`] (for commands) or the
//! two tick entry points driven by the scheduler. Each command is validated before
//! anything is touched, so a rejected command leaves the state bit-for-bit unchanged.
//!
//! # Transitions
//!
//! | from      | command / event       | to                      |
//! |-----------|-----------------------|-------------------------|
//! | Idle      | Start                 | Countdown (or Playing)  |
//! | Countdown | countdown expires     | Playing                 |
//! | Countdown | Stop                  | Idle                    |
//! | Playing   | Pause                 | Paused                  |
//! | Paused    | Start                 | Playing                 |
//! | Playing   | end of content        | Finished                |
//! | Finished  | Start                 | Countdown (or Playing)  |
//! | any       | Stop, LoadScript      | Idle                    |

use super::command::{Command, CommandKind};
use super::countdown::{Countdown, CountdownStatus};
use super::fit::{fit_velocity, FitPlan};
use super::phase::PlaybackPhase;
use super::scroll::{Advance, ScrollEngine};
use super::snapshot::{ScrollState, Snapshot};
use crate::layout::LayoutProvider;
use crate::model::{CommandError, ContentExtent, LayoutError, LayoutMetrics, Script};
use std::time::Duration;
use tracing::{debug, info};

/// Default scroll speed in rows per second.
pub const DEFAULT_SPEED: f64 = 1.5;
/// Default lower speed bound for manual adjustment.
pub const DEFAULT_MIN_SPEED: f64 = 0.1;
/// Default upper speed bound for manual adjustment.
pub const DEFAULT_MAX_SPEED: f64 = 50.0;
/// Default countdown length in seconds.
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 3;

/// Tunables that do not change during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// Velocity at startup, rows per second.
    pub initial_speed: f64,
    /// Lower bound applied by `SetSpeed`.
    pub min_speed: f64,
    /// Upper bound applied by `SetSpeed`.
    pub max_speed: f64,
    /// Countdown length; 0 starts playing immediately.
    pub countdown_seconds: u32,
}

impl ControllerSettings {
    /// Repair non-finite or inverted speed bounds.
    ///
    /// ```
    /// use tprompt::engine::ControllerSettings;
    ///
    /// let s = ControllerSettings { min_speed: 9.0, max_speed: 2.0, ..Default::default() }.normalized();
    /// assert!(s.min_speed <= s.max_speed);
    /// ```
    pub fn normalized(self) -> Self {
        let min_speed = if self.min_speed.is_finite() {
            self.min_speed.max(0.0)
        } else {
            DEFAULT_MIN_SPEED
        };
        let max_speed = if self.max_speed.is_finite() {
            self.max_speed.max(min_speed)
        } else {
            DEFAULT_MAX_SPEED.max(min_speed)
        };
        let initial_speed = if self.initial_speed.is_finite() {
            self.initial_speed
        } else {
            DEFAULT_SPEED
        };
        Self {
            initial_speed,
            min_speed,
            max_speed,
            countdown_seconds: self.countdown_seconds,
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            initial_speed: DEFAULT_SPEED,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Countdown(Countdown),
    Playing,
    Paused,
    Finished,
}

impl Phase {
    fn public(&self) -> PlaybackPhase {
        match self {
            Phase::Idle => PlaybackPhase::Idle,
            Phase::Countdown(_) => PlaybackPhase::Countdown,
            Phase::Playing => PlaybackPhase::Playing,
            Phase::Paused => PlaybackPhase::Paused,
            Phase::Finished => PlaybackPhase::Finished,
        }
    }
}

/// Owns script, layout metrics, scroll state and phase.
#[derive(Debug)]
pub struct PlaybackController<P> {
    provider: P,
    script: Script,
    metrics: LayoutMetrics,
    engine: ScrollEngine,
    phase: Phase,
    fit: Option<FitPlan>,
    settings: ControllerSettings,
}

impl<P: LayoutProvider> PlaybackController<P> {
    /// Measure `script` under `metrics` and start Idle at position 0.
    pub fn new(
        provider: P,
        script: Script,
        metrics: LayoutMetrics,
        settings: ControllerSettings,
    ) -> Result<Self, LayoutError> {
        let settings = settings.normalized();
        let extent = provider.measure_extent(&script, &metrics)?;
        let velocity = settings
            .initial_speed
            .clamp(settings.min_speed, settings.max_speed);
        info!(extent = extent.total(), velocity, "Playback controller ready");

        Ok(Self {
            provider,
            script,
            metrics,
            engine: ScrollEngine::new(extent, velocity),
            phase: Phase::Idle,
            fit: None,
            settings,
        })
    }

    /// Apply one command.
    ///
    /// Returns the new snapshot when observable state changed, `None` for a no-op,
    /// or the rejection. A rejected command changes nothing.
    pub fn dispatch(&mut self, command: Command) -> Result<Option<Snapshot>, CommandError> {
        let kind = command.kind();
        let before = self.snapshot();
        self.apply(command)?;
        let after = self.snapshot();
        debug!(command = %kind, phase = %after.phase, position = after.position, "Command applied");
        Ok((after != before).then_some(after))
    }

    /// Advance the scroll position by `elapsed` if playing.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Snapshot> {
        if self.phase != Phase::Playing {
            return None;
        }
        let before = self.snapshot();
        if let Some(plan) = self.fit.as_mut() {
            plan.record_play(elapsed);
        }
        if self.engine.advance(elapsed) == Advance::Exhausted {
            self.set_phase(Phase::Finished);
        }
        let after = self.snapshot();
        (after != before).then_some(after)
    }

    /// Advance the countdown by `elapsed` if counting down.
    pub fn tick_countdown(&mut self, elapsed: Duration) -> Option<Snapshot> {
        let before = self.snapshot();
        let status = match &mut self.phase {
            Phase::Countdown(countdown) => countdown.tick(elapsed),
            _ => return None,
        };
        if status == CountdownStatus::Expired {
            self.set_phase(Phase::Playing);
        }
        let after = self.snapshot();
        (after != before).then_some(after)
    }

    /// Current observable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase.public(),
            position: self.engine.position(),
            extent: self.engine.extent().total(),
            velocity: self.engine.velocity(),
            fit_active: self.fit.is_some(),
            mirrored: self.metrics.mirrored(),
            countdown_remaining: match &self.phase {
                Phase::Countdown(countdown) => Some(countdown.remaining_seconds()),
                _ => None,
            },
        }
    }

    /// Position, velocity and fit flag.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            position: self.engine.position(),
            velocity: self.engine.velocity(),
            fit_mode_active: self.fit.is_some(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.phase.public()
    }

    /// Current layout metrics.
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Current script.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Current extent.
    pub fn extent(&self) -> ContentExtent {
        self.engine.extent()
    }

    /// Active fit plan, if any.
    pub fn fit_plan(&self) -> Option<&FitPlan> {
        self.fit.as_ref()
    }

    /// Session tunables.
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// The layout provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Start => self.start(),
            Command::Pause => {
                if self.phase == Phase::Playing {
                    self.set_phase(Phase::Paused);
                }
            }
            Command::Stop => self.stop(),
            Command::JumpBy(delta) => {
                self.ensure_not_counting_down(CommandKind::JumpBy)?;
                self.engine.jump_by(delta);
            }
            Command::JumpToFraction(fraction) => {
                self.ensure_not_counting_down(CommandKind::JumpToFraction)?;
                self.engine.jump_to_fraction(fraction);
            }
            Command::Rewind => {
                self.ensure_not_counting_down(CommandKind::Rewind)?;
                self.engine.jump_to_fraction(0.0);
                self.restart_fit();
            }
            Command::SetSpeed(delta) => {
                let current = self.engine.velocity();
                let requested = if delta.is_finite() {
                    current + delta
                } else {
                    current
                };
                let velocity = requested.clamp(self.settings.min_speed, self.settings.max_speed);
                self.engine.set_velocity(velocity);
                self.fit = None;
            }
            Command::FitToDuration(seconds) => {
                let velocity = fit_velocity(self.engine.remaining(), seconds)?;
                self.engine.set_velocity(velocity);
                self.fit = Some(FitPlan::new(seconds));
                info!(target_seconds = seconds, velocity, "Fitted speed to target duration");
            }
            Command::ToggleMirror => {
                self.metrics = self.metrics.with_mirrored(!self.metrics.mirrored());
            }
            Command::LayoutChanged(metrics) => self.relayout(metrics)?,
            Command::LoadScript(script) => self.load(script)?,
        }
        Ok(())
    }

    fn start(&mut self) {
        match self.phase {
            Phase::Playing | Phase::Countdown(_) => {}
            Phase::Paused => self.set_phase(Phase::Playing),
            Phase::Idle | Phase::Finished => {
                if self.phase == Phase::Finished && self.engine.at_end() {
                    self.engine.jump_to_fraction(0.0);
                    self.restart_fit();
                }
                if self.settings.countdown_seconds > 0 && !self.engine.extent().is_empty() {
                    self.set_phase(Phase::Countdown(Countdown::start(
                        self.settings.countdown_seconds,
                    )));
                } else {
                    self.set_phase(Phase::Playing);
                }
            }
        }
    }

    fn stop(&mut self) {
        if let Phase::Countdown(countdown) = &mut self.phase {
            let discarded = countdown.cancel();
            debug!(?discarded, "Countdown cancelled");
        }
        self.set_phase(Phase::Idle);
        self.engine.jump_to_fraction(0.0);
        // Stop keeps the velocity, so the plan follows it instead.
        if self.fit.is_some() {
            self.fit = FitPlan::matching(self.engine.remaining(), self.engine.velocity());
        }
    }

    /// Start the active fit over from the current position: the play clock
    /// restarts and the whole target is spread across what is left.
    fn restart_fit(&mut self) {
        if let Some(plan) = self.fit.as_mut() {
            plan.reset_played();
            let velocity = plan.refit(self.engine.remaining());
            self.engine.set_velocity(velocity);
        }
    }

    fn relayout(&mut self, metrics: LayoutMetrics) -> Result<(), CommandError> {
        let extent = self.provider.measure_extent(&self.script, &metrics)?;
        self.metrics = metrics;
        self.engine.rescale(extent);
        if let Some(plan) = self.fit.as_ref() {
            let velocity = plan.refit(self.engine.remaining());
            self.engine.set_velocity(velocity);
        }
        debug!(extent = extent.total(), "Layout remeasured");
        Ok(())
    }

    fn load(&mut self, script: Script) -> Result<(), CommandError> {
        let extent = self.provider.measure_extent(&script, &self.metrics)?;
        info!(
            label = script.label().unwrap_or("<unnamed>"),
            words = script.word_count(),
            extent = extent.total(),
            "Script loaded"
        );
        self.script = script;
        self.engine.reset(extent);
        self.fit = None;
        self.set_phase(Phase::Idle);
        Ok(())
    }

    fn ensure_not_counting_down(&self, command: CommandKind) -> Result<(), CommandError> {
        if let Phase::Countdown(_) = self.phase {
            return Err(CommandError::IllegalInPhase {
                command,
                phase: PlaybackPhase::Countdown,
            });
        }
        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) {
        let from = self.phase.public();
        let to = phase.public();
        if from != to {
            debug!(%from, %to, "Phase transition");
        }
        self.phase = phase;
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
