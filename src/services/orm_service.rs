use std::sync::Arc;

use mongodb::bson::{Bson, Document};

use super::format_validator;
use crate::error::{ApiError, ApiResult};
use crate::models::Collection;
use crate::store::{DocumentStore, Filter};

/// Maximum number of documents returned by an unscoped listing.
pub const LIST_LIMIT: i64 = 15;

/// Data access service: generic CRUD over named collections with existence checks.
#[derive(Clone)]
pub struct OrmService {
    store: Arc<dyn DocumentStore>,
}

impl OrmService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> ApiResult<()> {
        self.store.ping().await
    }

    /// Lists a collection, or the comments of one movie when `movie_id` is given.
    pub async fn find(
        &self,
        collection: Collection,
        movie_id: Option<&str>,
    ) -> ApiResult<Vec<Document>> {
        match movie_id {
            None => self.find_all(collection).await,
            Some(movie_id) => self.find_for_movie(collection, movie_id).await,
        }
    }

    /// Up to [`LIST_LIMIT`] documents in store order.
    pub async fn find_all(&self, collection: Collection) -> ApiResult<Vec<Document>> {
        tracing::debug!(%collection, "find");
        self.store
            .find(collection.name(), &Filter::all(), Some(LIST_LIMIT))
            .await
    }

    /// Every document referencing `movie_id`; an empty result is reported as not found.
    pub async fn find_for_movie(
        &self,
        collection: Collection,
        movie_id: &str,
    ) -> ApiResult<Vec<Document>> {
        tracing::debug!(%collection, movie_id, "find by movie");
        let docs = self
            .store
            .find(collection.name(), &Filter::by_movie(movie_id), None)
            .await?;
        if docs.is_empty() {
            return Err(ApiError::NotFound);
        }
        Ok(docs)
    }

    /// Looks a document up by id, optionally requiring it to belong to `movie_id`.
    pub async fn find_one(
        &self,
        collection: Collection,
        id: &str,
        movie_id: Option<&str>,
    ) -> ApiResult<Document> {
        tracing::debug!(%collection, id, movie_id, "find one");
        let mut filter = Filter::by_id(id);
        if let Some(movie_id) = movie_id {
            filter = filter.and_movie(movie_id);
        }
        self.store
            .find_one(collection.name(), &filter)
            .await?
            .ok_or(ApiError::NotFound)
    }

    /// Validates, inserts and returns the stored document as re-read from the store.
    pub async fn insert_one(
        &self,
        collection: Collection,
        mut candidate: Document,
    ) -> ApiResult<Document> {
        candidate.remove("_id");
        if !format_validator::has_all_properties(&candidate, collection.name()) {
            return Err(ApiError::bad_request(format!(
                "document does not match the {collection} format"
            )));
        }

        let inserted_id = self.store.insert_one(collection.name(), candidate).await?;
        let id = match inserted_id {
            Bson::ObjectId(id) => id.to_hex(),
            other => {
                return Err(ApiError::Internal(anyhow::anyhow!(
                    "unexpected inserted id {other}"
                )))
            }
        };
        tracing::debug!(%collection, id = %id, "inserted");
        self.find_one(collection, &id, None).await
    }

    /// Sets every key of `patch` on the document and returns it re-read.
    ///
    /// Existence is not checked beforehand; the re-read reports a missing document.
    pub async fn update_one(
        &self,
        collection: Collection,
        mut patch: Document,
        id: &str,
    ) -> ApiResult<Document> {
        patch.remove("_id");
        if !patch.is_empty() {
            let matched = self
                .store
                .update_one(collection.name(), &Filter::by_id(id), patch)
                .await?;
            tracing::debug!(%collection, id, matched, "updated");
        }
        self.find_one(collection, id, None).await
    }

    pub async fn delete_one(&self, collection: Collection, id: &str) -> ApiResult<()> {
        let deleted = self
            .store
            .delete_one(collection.name(), &Filter::by_id(id))
            .await?;
        tracing::debug!(%collection, id, deleted, "delete");
        if deleted == 0 {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
