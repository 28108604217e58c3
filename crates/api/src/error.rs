//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{GatewayError, OrderError};

/// Message returned for failures whose details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "something wrong happened";

/// API-level error type that maps to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Order creation failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// A payment or delivery store failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Order(err) => order_error_to_response(err),
            ApiError::Gateway(err) => {
                tracing::error!(error = %err, "gateway error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn order_error_to_response(err: OrderError) -> (StatusCode, String) {
    match &err {
        OrderError::CreationFailed => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        OrderError::Transaction(_) => {
            tracing::error!(error = %err, "order transaction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            )
        }
    }
}
