use crate::domain::payment::PaymentStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("payment {0:?} already exists")]
    DuplicateId(String),
    #[error("payment {0:?} not found")]
    NotFound(String),
    #[error("invalid payment method: {0}")]
    InvalidMethod(String),
    #[error("payment {id:?} cannot be paid while {status}")]
    InvalidTransition { id: String, status: PaymentStatus },
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
