use mongodb::bson::Document;

use crate::models::Collection;

/// True when `candidate` carries every key of the collection's canonical template.
///
/// Only key presence is checked, never value types. Unknown collection names are rejected.
pub fn has_all_properties(candidate: &Document, collection_name: &str) -> bool {
    match Collection::from_name(collection_name) {
        Some(collection) => collection
            .template()
            .keys()
            .all(|key| candidate.contains_key(key)),
        None => false,
    }
}
