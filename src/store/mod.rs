//! Document store collaborators the data access service talks to.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::error::{ApiError, ApiResult};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Equality filter on the identifier and/or the owning movie reference.
///
/// Identifiers stay opaque strings until a store turns the filter into a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub id: Option<String>,
    pub movie_id: Option<String>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            movie_id: None,
        }
    }

    pub fn by_movie(movie_id: impl Into<String>) -> Self {
        Self {
            id: None,
            movie_id: Some(movie_id.into()),
        }
    }

    pub fn and_movie(mut self, movie_id: impl Into<String>) -> Self {
        self.movie_id = Some(movie_id.into());
        self
    }

    /// Query document with identifiers parsed into object ids.
    pub fn to_document(&self) -> ApiResult<Document> {
        let mut query = Document::new();
        if let Some(id) = &self.id {
            query.insert("_id", parse_object_id(id)?);
        }
        if let Some(movie_id) = &self.movie_id {
            query.insert("movie_id", parse_object_id(movie_id)?);
        }
        Ok(query)
    }
}

/// Parses a 24-hex identifier, classifying malformed input as a bad request.
pub fn parse_object_id(raw: &str) -> ApiResult<ObjectId> {
    ObjectId::parse_str(raw)
        .map_err(|_| ApiError::bad_request(format!("malformed identifier '{raw}'")))
}

/// Primitive operations of the backing document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Round-trip to the backend, used once at startup.
    async fn ping(&self) -> ApiResult<()>;

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> ApiResult<Vec<Document>>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> ApiResult<Option<Document>>;

    /// Inserts `doc` and returns the identifier assigned to it.
    async fn insert_one(&self, collection: &str, doc: Document) -> ApiResult<Bson>;

    /// Applies `$set`-style assignments; returns the number of matched documents.
    async fn update_one(&self, collection: &str, filter: &Filter, patch: Document)
        -> ApiResult<u64>;

    /// Returns the number of deleted documents.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> ApiResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    const MOVIE: &str = "573a1390f29313caabcd4135";
    const COMMENT: &str = "5a9427648b0beebeb69579e7";

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(Filter::all().to_document().unwrap(), Document::new());
    }

    #[test]
    fn scoped_filter_parses_both_ids() {
        let query = Filter::by_id(COMMENT).and_movie(MOVIE).to_document().unwrap();
        assert_eq!(
            query,
            doc! {
                "_id": ObjectId::parse_str(COMMENT).unwrap(),
                "movie_id": ObjectId::parse_str(MOVIE).unwrap(),
            }
        );
    }

    #[test]
    fn malformed_identifier_is_bad_request() {
        let err = Filter::by_movie("not-an-id").to_document().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(matches!(parse_object_id(""), Err(ApiError::BadRequest(_))));
    }
}
