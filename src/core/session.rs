//! Command orchestration
//!
//! A [`Session`] owns the host capabilities, the token store, the settings
//! store and the current chat client. Each command is one request/response
//! cycle; the chat client is replaced wholesale whenever the token or the
//! model changes.

use secrecy::SecretString;
use tracing::{debug, info};

use crate::ai::client::{ChatClient, GITHUB_MODELS_BASE};
use crate::ai::prompts::CommitStyle;
use crate::core::config::{ChatModel, SettingsStore, DEFAULT_MODEL};
use crate::core::credentials::TokenStore;
use crate::core::git::{GitExecutor, GitReader};
use crate::error::{LazyCommitError, Result};
use crate::host::{Host, InputRequest, MessageSink, NotificationLevel};

/// Where new fine-grained tokens with model access are created
pub const TOKEN_CREATION_URL: &str =
    "https://github.com/settings/personal-access-tokens/new?user_models=read";

const GET_TOKEN: &str = "Get Token";
const INPUT_TOKEN: &str = "Input Token";

/// Result of the generate command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Message generated (and handed to the sink, if any)
    Generated(String),
    /// No token and none was entered
    MissingToken,
    /// Nothing staged, or the diff could not be read
    NoStagedChanges,
    /// Request or sink failed; the error was shown to the user
    Failed(String),
}

/// Result of the input-token command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOutcome {
    Saved,
    Invalid,
    Cancelled,
}

/// Snapshot reported by the status command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    /// Masked token, if one is available
    pub token: Option<String>,
    pub model: String,
    pub style: CommitStyle,
}

/// Explicitly constructed command context
pub struct Session {
    host: Box<dyn Host>,
    tokens: TokenStore,
    settings: Box<dyn SettingsStore>,
    git: Box<dyn GitExecutor>,
    sink: Option<Box<dyn MessageSink>>,
    client: Option<ChatClient>,
    api_base: String,
}

impl Session {
    pub fn new(
        host: Box<dyn Host>,
        tokens: TokenStore,
        settings: Box<dyn SettingsStore>,
        git: Box<dyn GitExecutor>,
    ) -> Self {
        Self {
            host,
            tokens,
            settings,
            git,
            sink: None,
            client: None,
            api_base: GITHUB_MODELS_BASE.to_string(),
        }
    }

    /// Where generated messages are written; without one they are dropped
    pub fn with_sink(mut self, sink: Box<dyn MessageSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use another GitHub Models host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Current chat client, if one has been built
    pub fn client(&self) -> Option<&ChatClient> {
        self.client.as_ref()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    fn build_client(&self, token: SecretString, model: &str) -> ChatClient {
        ChatClient::new(token, model).with_base_url(self.api_base.clone())
    }

    fn notify(&self, level: NotificationLevel, message: &str) -> Result<()> {
        self.host.notify(level, message, &[])?;
        Ok(())
    }

    /// Startup: build the client if a token is stored, otherwise offer to get one
    ///
    /// Returns whether a client is ready afterwards.
    pub async fn activate(&mut self) -> Result<bool> {
        match self.tokens.resolve()? {
            Some(token) => {
                let config = self.settings.load()?;
                debug!(model = config.model(), "Token found, building chat client");
                self.client = Some(self.build_client(token, config.model()));
            }
            None => self.show_token_notification().await?,
        }
        Ok(self.client.is_some())
    }

    async fn show_token_notification(&mut self) -> Result<()> {
        let choice = self.host.notify(
            NotificationLevel::Warning,
            "GitHub token not configured for LazyCommit",
            &[GET_TOKEN, INPUT_TOKEN],
        )?;

        match choice.as_deref() {
            Some(GET_TOKEN) => {
                self.get_token();
            }
            Some(INPUT_TOKEN) => {
                self.input_token().await?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Generate a commit message from the staged diff
    pub async fn generate_message(&mut self) -> Result<GenerateOutcome> {
        let token = match self.tokens.resolve()? {
            Some(token) => token,
            None => {
                self.show_token_notification().await?;
                match self.tokens.resolve()? {
                    Some(token) => token,
                    None => return Ok(GenerateOutcome::MissingToken),
                }
            }
        };

        let config = self.settings.load()?;
        if self.client.is_none() {
            self.client = Some(self.build_client(token, config.model()));
        }

        let reader = GitReader::new(self.git.as_ref(), self.host.workspace_roots());
        let Some(diff) = reader.staged_diff(None).await else {
            self.notify(
                NotificationLevel::Warning,
                "No staged changes found. Stage some changes first.",
            )?;
            return Ok(GenerateOutcome::NoStagedChanges);
        };

        let style = config.commit_style();
        let Some(client) = self.client.as_ref() else {
            return Ok(GenerateOutcome::MissingToken);
        };
        info!(model = client.model(), style = %style, "Generating commit message");

        let progress = self.host.begin_progress("Generating commit message...");
        let result = client
            .generate_commit_message(style.system_prompt(), &diff)
            .await;
        progress.finish();

        let result = result.and_then(|message| {
            if let Some(sink) = &self.sink {
                sink.write_message(&message)?;
            }
            Ok(message)
        });

        match result {
            Ok(message) => Ok(GenerateOutcome::Generated(message)),
            Err(e) => {
                self.notify(
                    NotificationLevel::Error,
                    &format!("Failed to generate commit message: {}", e),
                )?;
                Ok(GenerateOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Prompt for a token, validate it and store it
    pub async fn input_token(&mut self) -> Result<TokenOutcome> {
        let request = InputRequest {
            prompt: "Enter your GitHub Personal Access Token".to_string(),
            placeholder: Some("ghp_xxxxxxxxxxxx".to_string()),
            password: true,
        };

        match self.host.prompt_input(&request)? {
            Some(token) => self.store_token(token).await,
            None => Ok(TokenOutcome::Cancelled),
        }
    }

    /// Validate a token obtained elsewhere and store it
    pub async fn store_token(&mut self, token: String) -> Result<TokenOutcome> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Ok(TokenOutcome::Cancelled);
        }

        let probe = self.build_client(SecretString::from(token.clone()), DEFAULT_MODEL);
        if !probe.validate_token().await {
            self.notify(NotificationLevel::Error, &LazyCommitError::InvalidToken.to_string())?;
            return Ok(TokenOutcome::Invalid);
        }

        self.tokens.save(&token)?;
        let config = self.settings.load()?;
        self.client = Some(self.build_client(SecretString::from(token), config.model()));
        self.notify(NotificationLevel::Info, "GitHub token saved successfully!")?;
        Ok(TokenOutcome::Saved)
    }

    /// Open the token creation page
    pub fn get_token(&self) -> bool {
        self.host.open_external(TOKEN_CREATION_URL)
    }

    /// Pick a model from the fixed list, or use the given one
    pub async fn select_model(&mut self, preset: Option<ChatModel>) -> Result<Option<ChatModel>> {
        let mut config = self.settings.load()?;

        let model = match preset {
            Some(model) => model,
            None => {
                let items: Vec<String> = ChatModel::all()
                    .iter()
                    .map(|m| format!("{} ({})", m.api_name(), m.display_name()))
                    .collect();
                let current = ChatModel::all()
                    .iter()
                    .position(|m| m.api_name() == config.model());

                let chosen = self
                    .host
                    .select("Select a model", &items, current)?
                    .and_then(|idx| ChatModel::all().get(idx).copied());
                match chosen {
                    Some(model) => model,
                    None => return Ok(None),
                }
            }
        };

        config.set_model(model);
        self.settings.save(&config)?;

        if let Some(token) = self.tokens.resolve()? {
            self.client = Some(self.build_client(token, model.api_name()));
        }

        self.notify(
            NotificationLevel::Info,
            &format!("Model set to: {}", model.display_name()),
        )?;
        Ok(Some(model))
    }

    /// Pick a commit style from the fixed list, or use the given one
    pub async fn select_commit_style(
        &mut self,
        preset: Option<CommitStyle>,
    ) -> Result<Option<CommitStyle>> {
        let mut config = self.settings.load()?;

        let style = match preset {
            Some(style) => style,
            None => {
                let items: Vec<String> = CommitStyle::all()
                    .iter()
                    .map(|s| format!("{} - {}", s.id(), s.description()))
                    .collect();
                let current = CommitStyle::all()
                    .iter()
                    .position(|s| *s == config.commit_style());

                let chosen = self
                    .host
                    .select("Select a commit style", &items, current)?
                    .and_then(|idx| CommitStyle::all().get(idx).copied());
                match chosen {
                    Some(style) => style,
                    None => return Ok(None),
                }
            }
        };

        config.set_commit_style(style);
        self.settings.save(&config)?;

        self.notify(
            NotificationLevel::Info,
            &format!("Commit style set to: {}", style.id()),
        )?;
        Ok(Some(style))
    }

    /// Token, model and style currently in effect
    pub fn status(&self) -> Result<SessionStatus> {
        let config = self.settings.load()?;
        Ok(SessionStatus {
            token: self.tokens.resolve()?.map(|t| TokenStore::mask_token(&t)),
            model: config.model().to_string(),
            style: config.commit_style(),
        })
    }

    /// Remove the stored token and drop the client
    pub fn logout(&mut self) -> Result<()> {
        self.tokens.delete()?;
        self.client = None;
        self.notify(NotificationLevel::Info, "GitHub token removed.")
    }

    /// Staged files in the first workspace root
    pub async fn staged_files(&self) -> Vec<String> {
        GitReader::new(self.git.as_ref(), self.host.workspace_roots())
            .staged_files(None)
            .await
    }
}
