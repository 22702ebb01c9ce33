use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use strum::AsRefStr;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Could not find a cart with ID \"{0}\"")]
    CartNotFound(String),

    #[error("The current user cannot perform operations on cart \"{0}\"")]
    AccessDenied(String),

    #[error("The requested Payment Method \"{0}\" is not available")]
    InvalidMethod(String),

    #[error("Required field \"{0}\" for the selected payment method is missing")]
    MissingRequiredField(String),

    #[error("The cart could not be updated right now, please try again")]
    TransientStorageFailure,

    #[error("Invalid token provided")]
    InvalidToken(String),

    #[error("Requested store \"{0}\" is not found")]
    StoreNotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Server Error")]
    ServerError(String),
}

/// Categories surfaced to clients under the `kind` extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    AccessDenied,
    InvalidMethod,
    MissingRequiredField,
    TransientStorageFailure,
    InvalidToken,
    StoreNotFound,
    BadRequest,
    Internal,
}

impl CheckoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CartNotFound(_) | Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::InvalidMethod(_) => ErrorKind::InvalidMethod,
            Self::MissingRequiredField(_) => ErrorKind::MissingRequiredField,
            Self::TransientStorageFailure => ErrorKind::TransientStorageFailure,
            Self::InvalidToken(_) => ErrorKind::InvalidToken,
            Self::StoreNotFound(_) => ErrorKind::StoreNotFound,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::ServerError(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller may replay the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientStorageFailure)
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::CartNotFound(_) | Self::StoreNotFound(_) => StatusCode::NOT_FOUND,
            Self::AccessDenied(_) => StatusCode::FORBIDDEN,
            Self::InvalidMethod(_) | Self::MissingRequiredField(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::TransientStorageFailure => StatusCode::SERVICE_UNAVAILABLE,
            Self::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorExtensions for CheckoutError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(format!("{}", self)).extend_with(|_, e| {
            e.set("status", self.status().as_u16());
            e.set("kind", self.kind().as_ref());
            e.set("retryable", self.is_retryable());
            match self {
                Self::MissingRequiredField(field) => e.set("details", field.as_str()),
                Self::InvalidMethod(code) => e.set("details", code.as_str()),
                Self::InvalidToken(reason) | Self::BadRequest(reason) => {
                    e.set("details", reason.as_str())
                }
                Self::ServerError(context) => {
                    // Only ever logged, the client gets the generic message
                    error!(%context, "internal error surfaced to graphql");
                }
                _ => {}
            }
        })
    }
}

#[derive(Debug, Serialize)]
struct Messages(Vec<String>);

impl From<Vec<&String>> for Messages {
    fn from(s: Vec<&String>) -> Self {
        Self(s.iter().map(|s| s.to_string()).collect::<Vec<String>>())
    }
}

impl ResponseError for CheckoutError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::BadRequest(error) | Self::InvalidToken(error) => {
                HttpResponse::build(self.status()).json(Messages::from(vec![error]))
            }
            // Catch all, as most of the time we should be using GraphQL errors
            _ => HttpResponse::build(self.status()).finish(),
        }
    }
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> CheckoutError {
        error!(err = ?e, "SQLx error occurred");
        CheckoutError::TransientStorageFailure
    }
}

impl From<sqlx::migrate::MigrateError> for CheckoutError {
    fn from(e: sqlx::migrate::MigrateError) -> CheckoutError {
        error!(err = ?e, "failed to run database migrations");
        CheckoutError::ServerError(e.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for CheckoutError {
    fn from(e: tokio::time::error::Elapsed) -> CheckoutError {
        warn!(err = ?e, "storage call timed out");
        CheckoutError::TransientStorageFailure
    }
}

impl From<jsonwebtoken::errors::Error> for CheckoutError {
    fn from(e: jsonwebtoken::errors::Error) -> CheckoutError {
        use jsonwebtoken::errors::ErrorKind::*;

        warn!(err = ?e, "failed to decode json web token");
        match e.kind() {
            ExpiredSignature => CheckoutError::InvalidToken("Token has expired".to_owned()),
            _ => CheckoutError::InvalidToken("Token did not match what was expected".to_owned()),
        }
    }
}
