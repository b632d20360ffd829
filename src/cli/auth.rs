//! Token CLI command handlers

use std::io::{self, Read};

use crate::cli::commands::InputTokenArgs;
use crate::core::session::{Session, TokenOutcome};
use crate::error::Result;

/// Handle the input-token command
pub async fn handle_input_token(session: &mut Session, args: &InputTokenArgs) -> Result<bool> {
    let outcome = if args.stdin {
        let mut token = String::new();
        io::stdin().read_to_string(&mut token)?;
        session.store_token(token).await?
    } else {
        session.input_token().await?
    };

    Ok(match outcome {
        TokenOutcome::Saved => true,
        TokenOutcome::Cancelled => {
            eprintln!("No token provided.");
            false
        }
        TokenOutcome::Invalid => false,
    })
}

/// Handle the get-token command
pub fn handle_get_token(session: &Session) -> Result<bool> {
    if session.get_token() {
        println!("✓ Browser opened to token creation page.");
    }
    println!("Create a token with the 'Models: read' permission, then run: lazycommit input-token");
    Ok(true)
}

/// Handle the status command
pub fn handle_status(session: &Session) -> Result<bool> {
    let status = session.status()?;

    println!("LazyCommit Status:");
    match &status.token {
        Some(masked) => println!("  GitHub token: {}", masked),
        None => println!("  GitHub token: Not configured"),
    }
    println!("  Model:        {}", status.model);
    println!(
        "  Commit style: {} ({})",
        status.style.id(),
        status.style.description()
    );

    Ok(true)
}

/// Handle the logout command
pub fn handle_logout(session: &mut Session) -> Result<bool> {
    if session.tokens().get()?.is_none() {
        println!("No GitHub token stored.");
        return Ok(true);
    }

    session.logout()?;
    Ok(true)
}
