//! Terminal teleprompter (tprompt)
//!
//! Scrolls a plain-text script up the terminal at a steady, adjustable speed.
//!
//! The crate follows a Pure Core / Impure Shell architecture:
//! - [`engine`] owns playback state and is driven by explicit time values
//! - [`layout`] measures how far a script scrolls under given metrics
//! - [`state`] maps keys to engine commands without touching the terminal
//! - [`view`] runs the event loop and draws snapshots with ratatui

pub mod config;
pub mod engine;
pub mod layout;
pub mod logging;
pub mod model;
pub mod output;
pub mod source;
pub mod state;
pub mod view;
