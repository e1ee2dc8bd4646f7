use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// A failed create, carrying the flash message shown to the user.
    #[error("{message}")]
    NotListed {
        message: String,
        #[source]
        cause: Box<AppError>,
    },

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    /// Wraps a create failure with `"An error occurred. <kind> <name> could not be listed."`.
    pub fn not_listed(kind: &str, name: &str, cause: AppError) -> Self {
        let subject = if name.is_empty() {
            kind.to_string()
        } else {
            format!("{kind} {name}")
        };
        AppError::NotListed {
            message: format!("An error occurred. {subject} could not be listed."),
            cause: Box::new(cause),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(StoreError::MissingReference { .. }) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotListed { cause, .. } => cause.status_code(),
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(StoreError::MissingReference { .. }) => "UNKNOWN_REFERENCE",
            AppError::Storage(_) => "DATABASE_ERROR",
            AppError::NotListed { .. } => "NOT_LISTED",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::Storage(e) => {
                error!(error = ?e, "Storage error");
            }
            AppError::NotListed { message, cause } => {
                error!(cause = ?cause, message = %message, "Record could not be listed");
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => msg.clone(),
            AppError::Storage(StoreError::MissingReference { entity, id }) => {
                format!("No {entity} with id {id}")
            }
            AppError::Storage(_) => "A database error occurred".to_string(),
            AppError::NotListed { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // The cause of a failed create is only logged
        let details = match &self {
            AppError::NotListed { cause, .. } => Some(serde_json::json!({
                "cause": cause.code(),
            })),
            _ => None,
        };

        error_response(code, self.public_message(), details, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_listed_keeps_cause_status() {
        let err = AppError::not_listed(
            "Venue",
            "The Musical Hop",
            AppError::ValidationError("name is required".to_string()),
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "NOT_LISTED");
        assert_eq!(
            err.public_message(),
            "An error occurred. Venue The Musical Hop could not be listed."
        );
    }

    #[test]
    fn test_not_listed_without_name() {
        let err = AppError::not_listed(
            "Show",
            "",
            AppError::Storage(StoreError::Database(sqlx::Error::PoolTimedOut)),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "An error occurred. Show could not be listed.");
    }

    #[test]
    fn test_database_details_are_hidden() {
        let err = AppError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.public_message(), "A database error occurred");
    }

    #[test]
    fn test_missing_reference_is_bad_request() {
        let err = AppError::from(StoreError::MissingReference {
            entity: "venue",
            id: 42,
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "No venue with id 42");
    }
}
