//! Snapshot sinks.
//!
//! The renderer is one consumer of engine snapshots; a sink is any other. The
//! shell forwards every emitted snapshot to its sinks after each loop turn.

use crate::engine::Snapshot;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from writing snapshots.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink file could not be created.
    #[error("Cannot open snapshot log {path}: {source}")]
    Open {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A snapshot could not be serialized.
    #[error("Cannot serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing failed.
    #[error("Cannot write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives engine snapshots in emission order.
pub trait SnapshotSink {
    /// Accept one snapshot.
    fn accept(&mut self, snapshot: &Snapshot) -> Result<(), SinkError>;

    /// Flush buffered output. The default does nothing.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes each snapshot as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create (or truncate) a JSON-lines file.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn accept(&mut self, snapshot: &Snapshot) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    snapshots: Vec<Snapshot>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

impl SnapshotSink for RecordingSink {
    fn accept(&mut self, snapshot: &Snapshot) -> Result<(), SinkError> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}
