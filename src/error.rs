use serde::Serialize;
use warp::{http::StatusCode, reject::Reject};

#[derive(thiserror::Error, Debug)]
pub enum AdminError {
    #[error("username or password incorrect")]
    InvalidCredentials,
    #[error("account is disabled")]
    AccountDisabled,
    #[error("employee not found")]
    NotFound,
    #[error("an employee with username {0} already exists")]
    DuplicateIdentity(String),
    #[error("{0}")]
    Validation(String),
    #[error("error with token")]
    TokenError {
        #[from]
        source: jsonwebtoken::errors::Error,
    },
    #[error("error during service operation")]
    ServiceError {
        #[from]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Reject for AdminError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidCredentials,
    AccountDisabled,
    NotFound,
    DuplicateIdentity,
    ValidationError,
    TokenError,
    ServiceError,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ErrorKind::AccountDisabled => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::DuplicateIdentity => StatusCode::CONFLICT,
            ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::TokenError | ErrorKind::ServiceError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AdminError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AdminError::AccountDisabled => ErrorKind::AccountDisabled,
            AdminError::NotFound => ErrorKind::NotFound,
            AdminError::DuplicateIdentity(_) => ErrorKind::DuplicateIdentity,
            AdminError::Validation(_) => ErrorKind::ValidationError,
            AdminError::TokenError { .. } => ErrorKind::TokenError,
            AdminError::ServiceError { .. } => ErrorKind::ServiceError,
        }
    }
}
