use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("Empty input: the {table} table has no rows")]
    EmptyInput { table: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GenError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter { reason: reason.into() }
    }
}

pub type GenResult<T> = Result<T, GenError>;
