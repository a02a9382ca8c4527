//! File-based script source.

use crate::model::error::InputError;
use crate::model::Script;
use std::path::Path;

/// Read a script file.
///
/// Text is decoded as UTF-8; invalid sequences are replaced rather than
/// rejected so a stray byte never prevents a show from starting. The file name
/// becomes the script label.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors.
pub fn read_script_file(path: &Path) -> Result<Script, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), "Script is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };

    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::info!(path = %path.display(), bytes = text.len(), "Read script file");
    Ok(Script::new(text).with_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_file_and_labels_with_name() {
        let file = std::env::temp_dir().join("tprompt_read_file_label.txt");
        fs::write(&file, "Line one\r\nLine two\r\n").unwrap();

        let result = read_script_file(&file);
        let _ = fs::remove_file(&file);

        let script = result.unwrap();
        assert_eq!(script.text(), "Line one\nLine two\n", "CRLF should be normalized");
        assert_eq!(script.label(), Some("tprompt_read_file_label.txt"));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let file = std::env::temp_dir().join("tprompt_read_file_lossy.txt");
        fs::write(&file, b"caf\xe9 au lait").unwrap();

        let result = read_script_file(&file);
        let _ = fs::remove_file(&file);

        let script = result.unwrap();
        assert_eq!(script.text(), "caf\u{FFFD} au lait");
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = std::env::temp_dir();
        let result = read_script_file(&dir);
        assert!(
            matches!(result, Err(InputError::Io(_))),
            "Expected Io error, got: {:?}",
            result
        );
    }
}
