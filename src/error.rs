// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid value '{value}' for flag {flag}")]
    InvalidFlag { flag: String, value: String },
}

pub type SimResult<T> = Result<T, SimError>;
