use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
