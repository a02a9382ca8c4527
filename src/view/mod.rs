//! TUI rendering and terminal management (impure shell)
//!
//! The shell owns the terminal, the clock and the filesystem. It turns key
//! presses and resizes into engine commands, drives the timeline from the
//! event loop and draws whatever snapshot the engine last produced.

pub mod constants;
pub mod countdown;
pub mod help;
pub mod prompt_input;
pub mod prompter;
pub mod status_bar;
pub mod styles;

pub use countdown::CountdownOverlay;
pub use help::render_help_overlay;
pub use prompt_input::PromptInput;
pub use prompter::PrompterView;
pub use status_bar::StatusBar;
pub use styles::{ColorConfig, Palette};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::engine::{Command, Debouncer, PlaybackController, Snapshot, Timeline};
use crate::layout::{TerminalLayout, WrappedScript};
use crate::model::{AppError, LayoutMetrics, Script, Theme, Viewport};
use crate::output::SnapshotSink;
use crate::source::read_script_file;
use crate::state::{
    handle_key_action, handle_prompt_key, AppState, Effect, KeyContext, StatusMessage,
};
use constants::STATUS_BAR_HEIGHT;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Size},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Longest wait for input when nothing is scheduled.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Viewport handed to the layout provider for a terminal of `size`.
///
/// The status bar takes the bottom row.
pub fn prompter_viewport(size: Size) -> Viewport {
    Viewport::new(size.width, size.height.saturating_sub(STATUS_BAR_HEIGHT))
}

/// Wrapped script cached against the metrics and script generation it was built from.
#[derive(Debug)]
struct WrapCache {
    generation: u64,
    metrics: LayoutMetrics,
    wrapped: WrappedScript,
}

/// Everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Engine state to draw.
    pub snapshot: &'a Snapshot,
    /// Current layout metrics.
    pub metrics: &'a LayoutMetrics,
    /// Script wrapped under `metrics`.
    pub wrapped: &'a WrappedScript,
    /// Script name.
    pub label: Option<&'a str>,
    /// UI state.
    pub app_state: &'a AppState,
    /// Resolved styles.
    pub palette: Palette,
}

/// Draw one frame: prompter, status bar and any overlays.
pub fn render_frame(frame: &mut Frame, view: FrameView<'_>) {
    let [prompter_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
            .areas(frame.area());

    frame.render_widget(
        PrompterView::new(view.wrapped, view.snapshot.position, view.palette)
            .mirrored(view.snapshot.mirrored)
            .focus_band(view.app_state.focus_band),
        prompter_area,
    );

    if view.app_state.prompt.is_active() {
        let input = PromptInput::new(&view.app_state.prompt, view.palette);
        if let Some(position) = input.cursor_position(status_area) {
            frame.set_cursor_position(position);
        }
        frame.render_widget(input, status_area);
    } else {
        frame.render_widget(
            StatusBar::new(view.snapshot, view.metrics, view.palette)
                .label(view.label)
                .message(view.app_state.status.as_ref()),
            status_area,
        );
    }

    if let Some(remaining) = view.snapshot.countdown_remaining {
        frame.render_widget(CountdownOverlay::new(remaining, view.palette), prompter_area);
    }

    if view.app_state.help_visible {
        render_help_overlay(frame, view.palette);
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    timeline: Timeline<TerminalLayout>,
    app_state: AppState,
    key_bindings: KeyBindings,
    relayout: Debouncer<LayoutMetrics>,
    sinks: Vec<Box<dyn SnapshotSink>>,
    colors: ColorConfig,
    speed_step: f64,
    nudge_rows: f64,
    script_generation: u64,
    wrap_cache: Option<WrapCache>,
    dirty: bool,
}

impl<B: Backend> TuiApp<B> {
    /// Build the application on an already initialised terminal.
    ///
    /// # Errors
    ///
    /// Fails if the terminal size cannot be read or the script cannot be laid out
    /// in it.
    pub fn with_terminal(
        terminal: Terminal<B>,
        script: Script,
        config: &ResolvedConfig,
        colors: ColorConfig,
    ) -> Result<Self, AppError> {
        let viewport = prompter_viewport(terminal.size()?);
        let controller = PlaybackController::new(
            TerminalLayout::new(config.scroll_past_end),
            script,
            config.layout_metrics(viewport),
            config.controller_settings(),
        )?;
        let mut timeline = Timeline::new(
            controller,
            Duration::from_millis(config.frame_interval_ms.max(1)),
        );

        let theme = config.theme.parse::<Theme>().unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to default theme");
            Theme::default()
        });
        let mut app_state = AppState::new(theme, config.target_duration_secs);
        app_state.focus_band = config.focus_band;

        if config.fit_on_start {
            if let Err(err) = timeline.apply(
                Command::FitToDuration(config.target_duration_secs),
                Instant::now(),
            ) {
                app_state.set_status(StatusMessage::error(err.to_string()));
            }
        }

        Ok(Self {
            terminal,
            timeline,
            app_state,
            key_bindings: KeyBindings::default(),
            relayout: Debouncer::per_second(config.relayout_max_per_second),
            sinks: Vec::new(),
            colors,
            speed_step: config.speed_step,
            nudge_rows: config.nudge_rows,
            script_generation: 0,
            wrap_cache: None,
            dirty: true,
        })
    }

    /// Forward every snapshot to `sink` as well.
    pub fn add_sink(&mut self, sink: Box<dyn SnapshotSink>) {
        self.sinks.push(sink);
    }

    /// The engine timeline.
    pub fn timeline(&self) -> &Timeline<TerminalLayout> {
        &self.timeline
    }

    /// UI state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// The terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run the main event loop until the user quits.
    ///
    /// Sleeps in `event::poll` until the next scheduled tick, relayout or input,
    /// so an idle prompter uses no CPU.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.draw()?;

        while !self.app_state.should_quit {
            let now = Instant::now();
            let timeout = self
                .next_wakeup()
                .map_or(IDLE_POLL_INTERVAL, |deadline| {
                    deadline.saturating_duration_since(now)
                });

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key, Instant::now());
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(Size::new(width, height), Instant::now());
                    }
                    _ => {}
                }
            }

            self.step(Instant::now())?;
        }

        self.flush_sinks();
        info!("Quit requested");
        Ok(())
    }

    /// Earliest instant something is scheduled to happen.
    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.timeline.next_deadline(), self.relayout.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        self.dirty = true;
        let effect = if self.app_state.prompt.is_active() {
            handle_prompt_key(&mut self.app_state, key)
        } else {
            let Some(action) = self.key_bindings.get(key) else {
                return;
            };
            self.app_state.clear_status();
            let controller = self.timeline.controller();
            let metrics = self.relayout.pending().unwrap_or(controller.metrics());
            let ctx = KeyContext {
                phase: controller.phase(),
                metrics,
                speed_step: self.speed_step,
                nudge_rows: self.nudge_rows,
            };
            debug!(?action, "Key action");
            handle_key_action(&mut self.app_state, action, &ctx)
        };
        self.apply_effect(effect, now);
    }

    /// Handle a terminal resize.
    pub fn handle_resize(&mut self, size: Size, now: Instant) {
        self.dirty = true;
        let base = self
            .relayout
            .pending()
            .unwrap_or(self.timeline.controller().metrics());
        let metrics = base.with_viewport(prompter_viewport(size));
        if let Some(ready) = self.relayout.submit(metrics, now) {
            self.submit_relayout(ready);
        }
    }

    /// Apply queued work due at `now`, publish snapshots and redraw if needed.
    pub fn step(&mut self, now: Instant) -> Result<(), AppError> {
        if let Some(metrics) = self.relayout.poll(now) {
            self.submit_relayout(metrics);
        }

        for err in self.timeline.process(now) {
            self.app_state.set_status(StatusMessage::error(err.to_string()));
            self.dirty = true;
        }
        self.timeline.tick(now);

        let snapshots = self.timeline.take_snapshots();
        if !snapshots.is_empty() {
            self.publish(&snapshots);
            self.dirty = true;
        }

        if self.dirty {
            self.draw()?;
        }
        Ok(())
    }

    /// Draw the current state.
    pub fn draw(&mut self) -> Result<(), AppError> {
        self.refresh_wrap_cache();
        let Some(cache) = self.wrap_cache.as_ref() else {
            return Ok(());
        };

        let controller = self.timeline.controller();
        let snapshot = controller.snapshot();
        let view = FrameView {
            snapshot: &snapshot,
            metrics: controller.metrics(),
            wrapped: &cache.wrapped,
            label: controller.script().label(),
            app_state: &self.app_state,
            palette: Palette::new(self.app_state.theme, self.colors),
        };

        self.terminal.draw(|frame| render_frame(frame, view))?;
        self.dirty = false;
        Ok(())
    }

    fn apply_effect(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::None | Effect::Quit => {}
            Effect::Command(command) => self.timeline.submit(command),
            Effect::Relayout(metrics) => {
                if let Some(ready) = self.relayout.submit(metrics, now) {
                    self.submit_relayout(ready);
                }
            }
            Effect::Open(path) => self.open(&path),
        }
    }

    fn open(&mut self, path: &Path) {
        match read_script_file(path) {
            Ok(script) => {
                self.app_state
                    .set_status(StatusMessage::info(format!("Loaded {}", path.display())));
                self.script_generation += 1;
                self.timeline.submit(Command::LoadScript(script));
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Cannot open script");
                self.app_state.set_status(StatusMessage::error(err.to_string()));
            }
        }
    }

    /// The mirrored flag belongs to the engine; keep its current value.
    fn submit_relayout(&mut self, metrics: LayoutMetrics) {
        let mirrored = self.timeline.controller().metrics().mirrored();
        self.timeline
            .submit(Command::LayoutChanged(metrics.with_mirrored(mirrored)));
    }

    fn publish(&mut self, snapshots: &[Snapshot]) {
        for snapshot in snapshots {
            for sink in &mut self.sinks {
                if let Err(err) = sink.accept(snapshot) {
                    warn!(error = %err, "Snapshot sink failed");
                }
            }
        }
    }

    fn flush_sinks(&mut self) {
        for sink in &mut self.sinks {
            if let Err(err) = sink.flush() {
                warn!(error = %err, "Snapshot sink flush failed");
            }
        }
    }

    fn refresh_wrap_cache(&mut self) {
        let controller = self.timeline.controller();
        let metrics = controller.metrics();
        let fresh = self.wrap_cache.as_ref().is_some_and(|cache| {
            cache.generation == self.script_generation && !cache.metrics.affects_layout(metrics)
        });
        if fresh {
            return;
        }
        self.wrap_cache = Some(WrapCache {
            generation: self.script_generation,
            metrics: metrics.clone(),
            wrapped: controller.provider().wrap(controller.script(), metrics),
        });
    }
}

/// Set up the terminal, run the prompter and restore the terminal afterwards.
///
/// The terminal is restored even when the event loop fails.
pub fn run_with_script(
    script: Script,
    config: &ResolvedConfig,
    colors: ColorConfig,
    sinks: Vec<Box<dyn SnapshotSink>>,
) -> Result<(), AppError> {
    let terminal = setup_terminal()?;
    let result = TuiApp::with_terminal(terminal, script, config, colors).and_then(|mut app| {
        for sink in sinks {
            app.add_sink(sink);
        }
        app.run()
    });

    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
