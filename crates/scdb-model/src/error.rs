use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown view '{name}' (expected one of: {expected})")]
    UnknownView { name: String, expected: String },
    #[error("invalid filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
