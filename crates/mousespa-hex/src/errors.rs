use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mousespa_types::envelope::ApiResponse;
use mousespa_types::ports::order_repository::RepoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    BadRequest {
        message: String,
        detail: Option<String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{message}: {source}")]
    Internal {
        message: String,
        #[source]
        source: RepoError,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            detail,
        }
    }

    pub fn internal(message: impl Into<String>, source: RepoError) -> Self {
        Self::Internal {
            message: message.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        let body = match self {
            AppError::BadRequest { message, detail } => ApiResponse::<()>::failure(message, detail),
            AppError::NotFound(message) => ApiResponse::failure(message, None),
            // The store's own error text goes back to the caller unchanged.
            AppError::Internal { message, source } => {
                tracing::error!(error = %source, "{message}");
                ApiResponse::failure(message, Some(source.to_string()))
            }
        };

        let body = serde_json::to_string(&body).unwrap_or_else(|_| {
            "{\"success\":false,\"message\":\"internal serialization\"}".into()
        });
        (code, [("content-type", "application/json")], body).into_response()
    }
}
