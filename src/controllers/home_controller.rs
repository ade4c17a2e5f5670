use axum::response::Response;
use serde_json::json;

use crate::response::respond;

pub async fn index() -> Response {
    respond(
        200,
        Some(json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
