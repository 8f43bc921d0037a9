//! Error types for the confirmation flow.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain an answer from the user.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The input stream ended or the prompt was cancelled.
    #[error("Input closed")]
    Closed,

    /// The prompt could not be shown.
    #[error("Prompt failed: {0}")]
    Failed(String),
}

/// Errors that end the confirmation flow.
#[derive(Debug, Error)]
pub enum ConfirmError {
    /// The user chose to exit.
    #[error("Quitting at the user's request")]
    Aborted,

    /// No answer could be read.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// An ignore rule file could not be written.
    #[error("Failed to create {path}: {source}")]
    CreateIgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The flow was driven past a terminal state.
    #[error("Confirmation flow already finished")]
    Finished,
}

impl ConfirmError {
    /// Whether the run ended by user choice rather than a failure.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, Self::Aborted | Self::Prompt(PromptError::Closed))
    }
}
