//! CLI command definitions using clap
//!
//! Defines the command structure for the `lazycommit` CLI tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::ai::prompts::CommitStyle;
use crate::core::config::ChatModel;

/// lazycommit - Conventional Commit messages from staged changes
///
/// Sends the staged diff to GitHub Models and prints the generated message.
/// Run without arguments to generate a message for the current directory.
#[derive(Parser, Debug)]
#[command(name = "lazycommit", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a commit message from the staged changes
    Generate(GenerateArgs),

    /// Enter and validate a GitHub token
    InputToken(InputTokenArgs),

    /// Open the GitHub page for creating a token
    GetToken,

    /// Choose the model used for generation
    SelectModel {
        /// Model to use; prompts when omitted
        model: Option<ModelArg>,
    },

    /// Choose the commit message style
    SelectStyle {
        /// Style to use; prompts when omitted
        style: Option<StyleArg>,
    },

    /// Show token, model and style in use
    Status,

    /// Remove the stored GitHub token
    Logout,
}

/// Generate command arguments
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Repository directory (defaults to the current directory)
    #[arg(short = 'C', long = "repo", value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Write the message to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Input token command arguments
#[derive(Args, Debug, Default)]
pub struct InputTokenArgs {
    /// Read the token from standard input instead of prompting
    #[arg(long)]
    pub stdin: bool,
}

/// Model names accepted on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModelArg {
    #[value(name = "gpt-4o-mini")]
    Gpt4oMini,
    #[value(name = "gpt-4o")]
    Gpt4o,
    #[value(name = "gpt-4.1")]
    Gpt41,
    #[value(name = "gpt-4.1-mini")]
    Gpt41Mini,
    #[value(name = "gpt-4.1-nano")]
    Gpt41Nano,
    #[value(name = "o4-mini")]
    O4Mini,
}

impl From<ModelArg> for ChatModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Gpt4oMini => ChatModel::Gpt4oMini,
            ModelArg::Gpt4o => ChatModel::Gpt4o,
            ModelArg::Gpt41 => ChatModel::Gpt41,
            ModelArg::Gpt41Mini => ChatModel::Gpt41Mini,
            ModelArg::Gpt41Nano => ChatModel::Gpt41Nano,
            ModelArg::O4Mini => ChatModel::O4Mini,
        }
    }
}

/// Commit styles accepted on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StyleArg {
    /// type(scope): summary, with bullets for multiple changes
    Default,
    /// type: summary, no scope
    Simple,
    /// One line, changes separated by semicolons
    Short,
}

impl From<StyleArg> for CommitStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Default => CommitStyle::Default,
            StyleArg::Simple => CommitStyle::Simple,
            StyleArg::Short => CommitStyle::Short,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_model_args_match_model_list() {
        for arg in ModelArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(ChatModel::from(*arg).api_name(), name);
        }
        assert_eq!(ModelArg::value_variants().len(), ChatModel::all().len());
    }

    #[test]
    fn test_style_args_match_styles() {
        for arg in StyleArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(CommitStyle::from(*arg).id(), name);
        }
    }

    #[test]
    fn test_parse_generate_with_output() {
        let cli = Cli::parse_from(["lazycommit", "generate", "-C", "/repo", "-o", "msg.txt"]);
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.repo, Some(PathBuf::from("/repo")));
                assert_eq!(args.output, Some(PathBuf::from("msg.txt")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["lazycommit"]);
        assert!(cli.command.is_none());
    }
}
