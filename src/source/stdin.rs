//! Stdin-based script source for piped input.

use crate::model::error::InputError;
use crate::model::Script;
use std::io::Read;

/// Read an entire script from `reader`.
///
/// Blocks until EOF. Invalid UTF-8 is replaced. The script is labelled `stdin`.
///
/// # Errors
///
/// Returns `InputError::Io` if reading fails.
pub fn read_script<R: Read>(mut reader: R) -> Result<Script, InputError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);
    tracing::info!(bytes = bytes.len(), "Read script from stdin");
    Ok(Script::new(text).with_label("stdin"))
}
