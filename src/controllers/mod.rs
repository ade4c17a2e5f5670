pub mod comment_controller;
pub mod home_controller;
pub mod movie_controller;

use mongodb::bson::Document;
use serde_json::Value;

use crate::error::ApiError;
use crate::utils::document_to_json;

/// Fallback for any method a route does not declare.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}
