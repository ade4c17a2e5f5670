use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// Renders a stored document as API JSON: object ids as hex strings, datetimes as RFC 3339.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(text) => Value::String(text),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Converts a JSON request body into a BSON document, key by key.
pub fn json_to_document(body: Map<String, Value>) -> ApiResult<Document> {
    let mut doc = Document::new();
    for (key, value) in body {
        let bson_value = Bson::try_from(value)
            .map_err(|e| ApiError::bad_request(format!("field '{key}': {e}")))?;
        doc.insert(key, bson_value);
    }
    Ok(doc)
}
