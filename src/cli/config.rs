//! Model and style selection handlers

use crate::cli::commands::{ModelArg, StyleArg};
use crate::core::session::Session;
use crate::error::Result;

/// Handle the select-model command
pub async fn handle_select_model(session: &mut Session, model: Option<ModelArg>) -> Result<bool> {
    let selected = session.select_model(model.map(Into::into)).await?;
    Ok(selected.is_some())
}

/// Handle the select-style command
pub async fn handle_select_style(session: &mut Session, style: Option<StyleArg>) -> Result<bool> {
    let selected = session.select_commit_style(style.map(Into::into)).await?;
    Ok(selected.is_some())
}
