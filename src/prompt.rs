use inquire::{Confirm, InquireError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Error occurred trying to prompt user")]
    #[diagnostic(
        code(sitepad::prompt::inquire),
        help("Run in an interactive terminal or pass --yes")
    )]
    Inquire(#[from] InquireError),
}

/// Asks whether the previewed export should be written.
pub fn apply_changes() -> Result<bool, PromptError> {
    let answer = Confirm::new("Write these files?")
        .with_default(false)
        .with_help_message("Press [y] to confirm or [n] to cancel")
        .prompt()?;

    Ok(answer)
}
