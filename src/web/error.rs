// API errors — every handler failure becomes a JSON body with a status code.
//
// Client mistakes (missing fields, bad limits, unknown ids) map to 4xx with
// the message passed through. Store failures are logged and surface as a
// generic 500 so SQL details never reach the browser.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::api_error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => api_error(StatusCode::BAD_REQUEST, &message),
            ApiError::NotFound(message) => api_error(StatusCode::NOT_FOUND, &message),
            ApiError::Store(e) => {
                tracing::error!(error = %format!("{e:#}"), "Database error");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
        }
    }
}

/// JSON body extractor whose rejections are `ApiError::BadRequest`, so a
/// malformed body gets the same error shape as every other failure.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection_message(rejection))),
        }
    }
}

fn rejection_message(rejection: JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        _ => "Failed to parse JSON body".to_string(),
    }
}
