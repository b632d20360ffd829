//! lazycommit - Conventional Commit messages from staged changes
//!
//! Sends the staged diff of the current repository to GitHub Models and
//! prints the generated commit message.
//! Run without arguments to generate a message.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lazycommit::cli::commands::{Cli, Commands, GenerateArgs};
use lazycommit::cli::{auth, config, generate};
use lazycommit::core::config::FileSettings;
use lazycommit::core::credentials::TokenStore;
use lazycommit::core::git::SystemGit;
use lazycommit::core::session::Session;
use lazycommit::error::Result;
use lazycommit::host::{FileSink, MessageSink, StdoutSink, TerminalHost};

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        // No subcommand - generate for the current directory
        None => {
            let args = GenerateArgs::default();
            let mut session = build_session(None, None)?;
            generate::handle_generate(&mut session, &args).await
        }

        Some(Commands::Generate(args)) => {
            let mut session = build_session(args.repo.clone(), args.output.clone())?;
            generate::handle_generate(&mut session, &args).await
        }

        // Token commands manage the credential themselves
        Some(Commands::InputToken(args)) => {
            let mut session = build_session(None, None)?;
            auth::handle_input_token(&mut session, &args).await
        }
        Some(Commands::GetToken) => auth::handle_get_token(&build_session(None, None)?),
        Some(Commands::Logout) => auth::handle_logout(&mut build_session(None, None)?),

        // Model changes rebuild the client, so load the token first
        Some(Commands::SelectModel { model }) => {
            let mut session = build_session(None, None)?;
            session.activate().await?;
            config::handle_select_model(&mut session, model).await
        }
        Some(Commands::SelectStyle { style }) => {
            config::handle_select_style(&mut build_session(None, None)?, style).await
        }
        Some(Commands::Status) => auth::handle_status(&build_session(None, None)?),
    }
}

/// Wire the terminal host, keyring, config file and git binary together
fn build_session(repo: Option<PathBuf>, output: Option<PathBuf>) -> Result<Session> {
    let host = match repo {
        Some(repo) => TerminalHost::new(Some(repo)),
        None => TerminalHost::current_dir(),
    };

    let sink: Box<dyn MessageSink> = match output {
        Some(path) => Box::new(FileSink::new(path)),
        None => Box::new(StdoutSink),
    };

    Ok(Session::new(
        Box::new(host),
        TokenStore::keyring(),
        Box::new(FileSettings::new()?),
        Box::new(SystemGit),
    )
    .with_sink(sink))
}
