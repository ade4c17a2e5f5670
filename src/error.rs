//! Error kinds raised by the data access layer and handlers.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::respond;

/// Every variant carries exactly one HTTP status code, see [`ApiError::status_code`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::Internal(_) => 500,
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Internal(anyhow::Error::new(err).context("document store failure"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        match &self {
            ApiError::Internal(err) => {
                tracing::error!(status_code = code, error = ?err, "request failed");
            }
            other => {
                tracing::warn!(status_code = code, error = %other, "request rejected");
            }
        }
        respond(code, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn each_kind_carries_its_code() {
        assert_eq!(ApiError::bad_request("missing title").status_code(), 400);
        assert_eq!(ApiError::NotFound.status_code(), 404);
        assert_eq!(ApiError::MethodNotAllowed.status_code(), 405);
        let internal = ApiError::Internal(anyhow::anyhow!("connection reset"));
        assert_eq!(internal.status_code(), 500);
    }

    #[test]
    fn into_response_uses_carried_status() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
