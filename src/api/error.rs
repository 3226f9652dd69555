use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::db::QueryError;

// ============================================================================
// Request Errors
// ============================================================================
//
// Validation errors carry their message to the client (400). Everything else
// is logged in full and answered with a generic 500 body.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// The message shown to clients
    fn public_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::NotFound => "Not found".to_string(),
            ApiError::Query(_) => "Server error".to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.public_message()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: ApiError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_validation_maps_to_400_with_message() {
        let err = ApiError::validation("Email parameter is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(err).await,
            serde_json::json!({"error": "Email parameter is required"})
        );
    }

    #[actix_web::test]
    async fn test_query_error_does_not_leak_details() {
        let err = ApiError::from(QueryError {
            statement: "customers.list",
            source: sqlx::Error::Protocol("password authentication failed".to_string()),
        });

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(err).await, serde_json::json!({"error": "Server error"}));
    }

    #[actix_web::test]
    async fn test_not_found() {
        let err = ApiError::NotFound;
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(err).await, serde_json::json!({"error": "Not found"}));
    }
}
