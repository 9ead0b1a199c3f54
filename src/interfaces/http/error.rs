//! Domain error to HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::ApiResponse;
use crate::shared::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::DuplicateEmail(_) | DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Database(_) | DomainError::Crypto(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
            "Internal server error".to_string()
        } else {
            tracing::warn!("{}: {}", status, self);
            self.to_string()
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn render(err: DomainError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404_with_message() {
        let (status, body) =
            render(DomainError::NotFound("The car with id: 3 was not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "success": false,
                "data": null,
                "error": "The car with id: 3 was not found"
            })
        );
    }

    #[tokio::test]
    async fn duplicates_and_conflicts_are_409() {
        let (status, body) = render(DomainError::DuplicateEmail("a@b.pl".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            "There is an account with that email address: a@b.pl"
        );

        let (status, _) = render(DomainError::Conflict("already rented".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn validation_is_400() {
        let (status, _) = render(DomainError::Validation("email: email".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_failures_are_500_without_details() {
        let err = DomainError::Database(sea_orm::DbErr::Custom("disk I/O".into()));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");

        let (status, _) = render(DomainError::Crypto("bad cost".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
