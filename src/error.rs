use thiserror::Error;

use crate::calculator::ValidationError;

#[derive(Debug, Error)]
pub enum HidricaError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl HidricaError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            HidricaError::Validation(_) => 2,
            HidricaError::Config(_) | HidricaError::Output(_) => 1,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
