//! Uniform JSON envelopes for every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Maps a status code and optional payload to the envelope body and the status line to set.
///
/// Codes outside the known set produce the generic "Unknown error" body and no explicit
/// status, leaving the transport default in place.
pub fn envelope(code: u16, payload: Option<Value>) -> (Option<StatusCode>, Value) {
    match code {
        200 => (
            Some(StatusCode::OK),
            json!({
                "status": 200,
                "data": payload,
            }),
        ),
        201 => (
            Some(StatusCode::CREATED),
            json!({
                "status": 201,
                "data": payload,
            }),
        ),
        204 => (
            Some(StatusCode::NO_CONTENT),
            json!({
                "status": 204,
                "message": "Availability resource deleted.",
            }),
        ),
        400 => (
            Some(StatusCode::BAD_REQUEST),
            json!({
                "status": 400,
                "message": "Bad Request",
                "description": "The request cannot be fulfilled due to bad syntax.",
            }),
        ),
        404 => (
            Some(StatusCode::NOT_FOUND),
            json!({
                "status": 404,
                "message": "Not Found",
                "description": "The requested resource could not be found.",
            }),
        ),
        405 => (
            Some(StatusCode::METHOD_NOT_ALLOWED),
            json!({
                "status": 405,
                "message": "Method Not Allowed",
                "description": "The requested method is not supported by this resource.",
            }),
        ),
        500 => (
            Some(StatusCode::INTERNAL_SERVER_ERROR),
            json!({
                "status": 500,
                "message": "Internal Error",
                "description": "An unexpected error occurred while processing the request.",
            }),
        ),
        _ => (
            None,
            json!({
                "message": "Unknown error",
                "description": "An unknow error occurred.",
            }),
        ),
    }
}

/// Builds the single response written for a request.
pub fn respond(code: u16, payload: Option<Value>) -> Response {
    match envelope(code, payload) {
        (Some(status), body) => (status, Json(body)).into_response(),
        (None, body) => Json(body).into_response(),
    }
}
