//! Generate command handler

use crate::cli::commands::GenerateArgs;
use crate::core::session::{GenerateOutcome, Session};
use crate::error::Result;

/// Handle the generate command
///
/// Returns whether a message was produced.
pub async fn handle_generate(session: &mut Session, args: &GenerateArgs) -> Result<bool> {
    let files = session.staged_files().await;
    if !files.is_empty() {
        eprintln!("Changes to be committed:");
        for file in &files {
            eprintln!("  {}", file);
        }
        eprintln!();
    }

    match session.generate_message().await? {
        GenerateOutcome::Generated(_) => {
            if let Some(path) = &args.output {
                eprintln!("✓ Commit message written to {}", path.display());
            }
            Ok(true)
        }
        GenerateOutcome::MissingToken
        | GenerateOutcome::NoStagedChanges
        | GenerateOutcome::Failed(_) => Ok(false),
    }
}
