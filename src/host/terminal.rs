//! Terminal host: dialoguer prompts and an indicatif spinner

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::host::{Host, InputRequest, NotificationLevel, ProgressIndicator};

const DISMISS: &str = "Dismiss";

/// Host backed by the current terminal
pub struct TerminalHost {
    workspace_roots: Vec<PathBuf>,
    theme: ColorfulTheme,
    interactive: bool,
}

impl TerminalHost {
    /// Host whose only workspace root is the given directory
    pub fn new(workspace_root: Option<PathBuf>) -> Self {
        Self {
            workspace_roots: workspace_root.into_iter().collect(),
            theme: ColorfulTheme::default(),
            interactive: std::io::stdin().is_terminal() && std::io::stderr().is_terminal(),
        }
    }

    /// Host rooted at the current directory
    pub fn current_dir() -> Self {
        Self::new(std::env::current_dir().ok())
    }

    /// Override terminal detection; without a terminal, action menus are skipped
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

impl Host for TerminalHost {
    fn workspace_roots(&self) -> Vec<PathBuf> {
        self.workspace_roots.clone()
    }

    fn prompt_input(&self, request: &InputRequest) -> Result<Option<String>> {
        let prompt = match &request.placeholder {
            Some(placeholder) => format!("{} ({})", request.prompt, placeholder),
            None => request.prompt.clone(),
        };

        let value = if request.password {
            Password::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()?
        } else {
            Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?
        };

        let value = value.trim().to_string();
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    fn select(
        &self,
        title: &str,
        items: &[String],
        current: Option<usize>,
    ) -> Result<Option<usize>> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(title)
            .items(items)
            .default(current.unwrap_or(0))
            .interact_opt()?;
        Ok(choice)
    }

    fn notify(
        &self,
        level: NotificationLevel,
        message: &str,
        actions: &[&str],
    ) -> Result<Option<String>> {
        let prefix = match level {
            NotificationLevel::Info => "✓",
            NotificationLevel::Warning => "Warning:",
            NotificationLevel::Error => "Error:",
        };
        eprintln!("{} {}", prefix, message);

        if actions.is_empty() || !self.interactive {
            return Ok(None);
        }

        let mut items: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
        items.push(DISMISS.to_string());

        let choice = Select::with_theme(&self.theme)
            .with_prompt("What would you like to do?")
            .items(&items)
            .default(0)
            .interact_opt()?;

        Ok(choice
            .filter(|&idx| idx < actions.len())
            .map(|idx| actions[idx].to_string()))
    }

    fn open_external(&self, url: &str) -> bool {
        eprintln!("Open this URL in your browser:");
        eprintln!("  {}", url);
        open_browser(url)
    }

    fn begin_progress(&self, title: &str) -> Box<dyn ProgressIndicator> {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(title.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Box::new(Spinner(spinner))
    }
}

struct Spinner(ProgressBar);

impl ProgressIndicator for Spinner {
    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

/// Try to open a URL in the default browser
fn open_browser(url: &str) -> bool {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn().is_ok()
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn().is_ok()
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()
            .is_ok()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = url;
        false
    }
}
