//! Script input sources.
//!
//! A script comes from one of three places:
//! - a file path given on the command line
//! - piped stdin, read to the end once
//! - the built-in welcome script when stdin is an interactive terminal

use crate::model::error::InputError;
use crate::model::Script;
use std::io::IsTerminal;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::read_script_file;
pub use stdin::read_script;

/// Shown when no file is given and nothing is piped in.
pub const WELCOME_SCRIPT: &str = "\
TELEPROMPTER

Pass a script file as the first argument, or pipe text in on stdin.

Quick tips:
- Press Space to play or pause.
- Use Up and Down to adjust speed.
- Press + and - for font size.
- Press m to mirror for a beam-splitter.
- Press t to set a target time, then r to fit the speed to it.
- Press ? for every shortcut.

Have a great read!
";

/// Where the script comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// Read from a file.
    File(PathBuf),
    /// Read piped stdin to the end.
    Stdin,
    /// Use [`WELCOME_SCRIPT`].
    Welcome,
}

impl ScriptSource {
    /// Read the script.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist and
    /// `InputError::Io` for other read failures.
    pub fn load(&self) -> Result<Script, InputError> {
        match self {
            ScriptSource::File(path) => read_script_file(path),
            ScriptSource::Stdin => read_script(std::io::stdin().lock()),
            ScriptSource::Welcome => Ok(Script::new(WELCOME_SCRIPT).with_label("welcome")),
        }
    }
}

/// Pick the source for the given command-line file argument.
pub fn detect_script_source(file: Option<PathBuf>) -> ScriptSource {
    match file {
        Some(path) => ScriptSource::File(path),
        None if std::io::stdin().is_terminal() => ScriptSource::Welcome,
        None => ScriptSource::Stdin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let source = detect_script_source(Some(PathBuf::from("talk.txt")));
        assert_eq!(source, ScriptSource::File(PathBuf::from("talk.txt")));
    }

    #[test]
    fn no_path_chooses_by_terminal() {
        let source = detect_script_source(None);
        if std::io::stdin().is_terminal() {
            assert_eq!(source, ScriptSource::Welcome);
        } else {
            assert_eq!(source, ScriptSource::Stdin);
        }
    }

    #[test]
    fn welcome_script_loads_with_label() {
        let script = ScriptSource::Welcome.load().unwrap();
        assert_eq!(script.label(), Some("welcome"));
        assert!(script.text().starts_with("TELEPROMPTER"));
    }

    #[test]
    fn missing_file_reports_path() {
        let missing = std::env::temp_dir().join("tprompt_missing_script_98765.txt");
        let result = ScriptSource::File(missing.clone()).load();
        assert!(
            matches!(result, Err(InputError::FileNotFound { ref path }) if *path == missing),
            "Expected FileNotFound, got: {:?}",
            result
        );
    }
}
