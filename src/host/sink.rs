//! Commit message sinks

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::host::MessageSink;

/// Prints the message to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl MessageSink for StdoutSink {
    fn write_message(&self, message: &str) -> Result<()> {
        println!("{}", message);
        Ok(())
    }
}

/// Writes the message to a file, e.g. `.git/COMMIT_EDITMSG` or the file
/// handed to a `prepare-commit-msg` hook
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MessageSink for FileSink {
    fn write_message(&self, message: &str) -> Result<()> {
        debug!("Writing commit message to {}", self.path.display());
        fs::write(&self.path, format!("{}\n", message))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(&path, "old message\n").unwrap();

        FileSink::new(&path).write_message("feat: new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "feat: new\n");
    }

    #[test]
    fn test_file_sink_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("missing").join("msg"));
        assert!(sink.write_message("feat: x").is_err());
    }
}
