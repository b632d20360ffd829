//! Staged-changes reader
//!
//! Shells out to the system `git` binary, read-only:
//! - `git diff --cached` for the staged diff
//! - `git diff --cached --name-only` for the staged file list
//!
//! Every failure (no workspace, git missing, not a repository) ends up as
//! "no diff" for the caller. The cause is kept in [`GitError`] and logged.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Maximum number of characters of diff sent to the model
pub const MAX_DIFF_CHARS: usize = 8000;

/// Appended when the diff is cut at [`MAX_DIFF_CHARS`]
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Runs a git subcommand and returns its stdout.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    async fn run(&self, cwd: &Path, args: &[String]) -> Result<String, GitError>;
}

/// Executor that calls the real `git` binary
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

#[async_trait]
impl GitExecutor for SystemGit {
    async fn run(&self, cwd: &Path, args: &[String]) -> Result<String, GitError> {
        if which::which("git").is_err() {
            return Err(GitError::NotInstalled);
        }

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("not a git repository") {
                return Err(GitError::NotRepository(cwd.display().to_string()));
            }
            return Err(GitError::CommandFailed {
                args: args.join(" "),
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Reads staged changes from the first workspace root
pub struct GitReader<'a> {
    executor: &'a dyn GitExecutor,
    workspace_roots: Vec<PathBuf>,
}

impl<'a> GitReader<'a> {
    pub fn new(executor: &'a dyn GitExecutor, workspace_roots: Vec<PathBuf>) -> Self {
        Self {
            executor,
            workspace_roots,
        }
    }

    /// Explicit path first, then the first workspace root
    fn resolve_cwd(&self, repo_path: Option<&Path>) -> Result<PathBuf, GitError> {
        repo_path
            .map(Path::to_path_buf)
            .or_else(|| self.workspace_roots.first().cloned())
            .ok_or(GitError::NoWorkspace)
    }

    /// Staged diff, or `None` when there is nothing usable
    pub async fn staged_diff(&self, repo_path: Option<&Path>) -> Option<String> {
        match self.try_staged_diff(repo_path).await {
            Ok(diff) => diff,
            Err(e) => {
                debug!("Staged diff unavailable: {}", e);
                None
            }
        }
    }

    /// Staged diff with the failure cause preserved
    pub async fn try_staged_diff(
        &self,
        repo_path: Option<&Path>,
    ) -> Result<Option<String>, GitError> {
        let cwd = self.resolve_cwd(repo_path)?;
        let args = vec!["diff".to_string(), "--cached".to_string()];
        let diff = self.executor.run(&cwd, &args).await?;

        if diff.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(truncate_diff(diff)))
    }

    /// Staged file paths, empty on any failure
    pub async fn staged_files(&self, repo_path: Option<&Path>) -> Vec<String> {
        match self.try_staged_files(repo_path).await {
            Ok(files) => files,
            Err(e) => {
                debug!("Staged files unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// Staged file paths with the failure cause preserved
    pub async fn try_staged_files(&self, repo_path: Option<&Path>) -> Result<Vec<String>, GitError> {
        let cwd = self.resolve_cwd(repo_path)?;
        let args = vec![
            "diff".to_string(),
            "--cached".to_string(),
            "--name-only".to_string(),
        ];
        let stdout = self.executor.run(&cwd, &args).await?;

        Ok(stdout
            .trim()
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Cut the diff to [`MAX_DIFF_CHARS`] characters and mark it
fn truncate_diff(diff: String) -> String {
    match diff.char_indices().nth(MAX_DIFF_CHARS) {
        Some((byte_idx, _)) => {
            let mut truncated = diff[..byte_idx].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => diff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(mock: &MockGitExecutor) -> GitReader<'_> {
        GitReader::new(mock, vec![PathBuf::from("/work/repo")])
    }

    #[test]
    fn test_truncate_long_diff() {
        let diff = "a".repeat(MAX_DIFF_CHARS + 500);
        let truncated = truncate_diff(diff);
        assert_eq!(
            truncated,
            format!("{}{}", "a".repeat(MAX_DIFF_CHARS), TRUNCATION_MARKER)
        );
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let diff = "é".repeat(MAX_DIFF_CHARS + 1);
        let truncated = truncate_diff(diff);
        assert!(truncated.starts_with(&"é".repeat(MAX_DIFF_CHARS)));
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            truncated.chars().count(),
            MAX_DIFF_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn test_diff_at_limit_is_untouched() {
        let diff = "b".repeat(MAX_DIFF_CHARS);
        assert_eq!(truncate_diff(diff.clone()), diff);
    }

    #[tokio::test]
    async fn test_staged_diff_runs_in_first_root() {
        let mut mock = MockGitExecutor::new();
        mock.expect_run()
            .withf(|cwd, args| cwd == Path::new("/work/repo") && *args == ["diff", "--cached"])
            .times(1)
            .returning(|_, _| Ok("diff --git a/x.txt b/x.txt\n+hello\n".to_string()));

        let diff = reader(&mock).staged_diff(None).await;
        assert_eq!(diff.as_deref(), Some("diff --git a/x.txt b/x.txt\n+hello\n"));
    }

    #[tokio::test]
    async fn test_explicit_path_wins() {
        let mut mock = MockGitExecutor::new();
        mock.expect_run()
            .withf(|cwd, _| cwd == Path::new("/elsewhere"))
            .times(1)
            .returning(|_, _| Ok("+change\n".to_string()));

        let diff = reader(&mock).staged_diff(Some(Path::new("/elsewhere"))).await;
        assert!(diff.is_some());
    }

    #[tokio::test]
    async fn test_whitespace_diff_is_none() {
        let mut mock = MockGitExecutor::new();
        mock.expect_run().returning(|_, _| Ok("  \n\t\n".to_string()));

        assert!(reader(&mock).staged_diff(None).await.is_none());
    }

    #[tokio::test]
    async fn test_long_diff_is_truncated() {
        let mut mock = MockGitExecutor::new();
        mock.expect_run()
            .returning(|_, _| Ok("x".repeat(MAX_DIFF_CHARS * 2)));

        let diff = reader(&mock).staged_diff(None).await.unwrap();
        assert_eq!(diff.len(), MAX_DIFF_CHARS + TRUNCATION_MARKER.len());
        assert!(diff.ends_with(TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn test_git_failures_collapse_to_none() {
        let mut mock = MockGitExecutor::new();
        mock.expect_run()
            .returning(|cwd, _| Err(GitError::NotRepository(cwd.display().to_string())));

        let reader = reader(&mock);
        assert!(reader.staged_diff(None).await.is_none());
        assert!(reader.staged_files(None).await.is_empty());
        assert!(matches!(
            reader.try_staged_diff(None).await,
            Err(GitError::NotRepository(_))
        ));
    }

    #[tokio::test]
    async fn test_no_workspace_skips_subprocess() {
        let mut mock = MockGitExecutor::new();
        mock.expect_run().times(0);

        let reader = GitReader::new(&mock, Vec::new());
        assert!(reader.staged_diff(None).await.is_none());
        assert!(reader.staged_files(None).await.is_empty());
        assert!(matches!(
            reader.try_staged_files(None).await,
            Err(GitError::NoWorkspace)
        ));
    }

    #[tokio::test]
    async fn test_staged_files_filters_empty_lines() {
        let mut mock = MockGitExecutor::new();
        mock.expect_run()
            .withf(|_, args| *args == ["diff", "--cached", "--name-only"])
            .returning(|_, _| Ok("src/main.rs\n\nREADME.md\n".to_string()));

        let files = reader(&mock).staged_files(None).await;
        assert_eq!(files, vec!["src/main.rs", "README.md"]);
    }

    #[tokio::test]
    async fn test_system_git_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        let git = SystemGit;
        let reader = GitReader::new(&git, vec![dir.path().to_path_buf()]);

        // Either git is missing or the temp dir is not a repository
        assert!(reader.staged_diff(None).await.is_none());
        assert!(reader.staged_files(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_system_git_classifies_missing_repository() {
        let dir = tempfile::tempdir().unwrap();
        let git = SystemGit;
        let reader = GitReader::new(&git, vec![dir.path().to_path_buf()]);

        let err = reader.try_staged_diff(None).await.unwrap_err();
        assert!(
            matches!(err, GitError::NotRepository(_) | GitError::NotInstalled),
            "unexpected error: {err}"
        );
    }
}
