use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid token table entry: {0}")]
    InvalidTokenEntry(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("token verifier unavailable: {0}")]
    Unavailable(String),
}
