use mongodb::bson::{doc, DateTime, Document};
use once_cell::sync::Lazy;

/// Field holding the owning movie's identifier.
pub const MOVIE_REF: &str = "movie_id";

/// Server-assigned creation timestamp.
pub const CREATED_AT: &str = "date";

pub static COMMENT_TEMPLATE: Lazy<Document> = Lazy::new(|| {
    doc! {
        "name": "test",
        "email": "test",
        "movie_id": "test",
        "text": "test",
        "date": DateTime::from_millis(946_684_800_000),
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_keys() {
        let keys: Vec<&str> = COMMENT_TEMPLATE.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "email", "movie_id", "text", "date"]);
    }
}
