//! Playback engine (pure core).
//!
//! Everything in here is deterministic given its inputs: time arrives as explicit
//! `Duration`s and `Instant`s, and layout arrives through [`crate::layout::LayoutProvider`].
//! The terminal shell in [`crate::view`] only feeds commands and draws snapshots.

pub mod command;
pub mod controller;
pub mod countdown;
pub mod debounce;
pub mod fit;
pub mod phase;
pub mod scheduler;
pub mod scroll;
pub mod snapshot;
pub mod timeline;

pub use command::{Command, CommandKind};
pub use controller::{ControllerSettings, PlaybackController};
pub use debounce::Debouncer;
pub use phase::PlaybackPhase;
pub use scheduler::{Scheduler, TaskControl, TaskId};
pub use snapshot::{ScrollState, Snapshot};
pub use timeline::{Session, Timeline};
