use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::{DocumentStore, Filter};
use crate::error::{ApiError, ApiResult};

/// In-process store for local runs and tests.
///
/// Queries are equality matches on top-level fields. Updates follow `$set`: dotted paths write
/// into nested documents, creating them as needed, and the whole patch is rejected when a field
/// name starts with `$` or a path crosses a non-document value. Array index paths are not
/// supported. Documents keep insertion order within a collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn matches(doc: &Document, query: &Document) -> bool {
    query.iter().all(|(key, value)| doc.get(key) == Some(value))
}

fn set_path(doc: &mut Document, path: &str, value: Bson) -> ApiResult<()> {
    let Some((head, rest)) = path.split_once('.') else {
        doc.insert(path, value);
        return Ok(());
    };
    if !doc.contains_key(head) {
        doc.insert(head, Document::new());
    }
    match doc.get_mut(head) {
        Some(Bson::Document(inner)) => set_path(inner, rest, value),
        _ => Err(ApiError::Internal(anyhow::anyhow!(
            "cannot create field '{rest}' in non-document '{head}'"
        ))),
    }
}

fn apply_set(doc: &Document, patch: Document) -> ApiResult<Document> {
    if let Some(key) = patch
        .keys()
        .find(|key| key.split('.').any(|part| part.is_empty() || part.starts_with('$')))
    {
        return Err(ApiError::Internal(anyhow::anyhow!(
            "invalid field name '{key}' in $set"
        )));
    }
    let mut updated = doc.clone();
    for (key, value) in patch {
        set_path(&mut updated, &key, value)?;
    }
    Ok(updated)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> ApiResult<Vec<Document>> {
        let query = filter.to_document()?;
        let limit = limit
            .filter(|limit| *limit > 0)
            .map_or(usize::MAX, |limit| limit as usize);
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &query))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> ApiResult<Option<Document>> {
        let query = filter.to_document()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, &query)))
            .cloned())
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> ApiResult<Bson> {
        let id = match doc.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                doc.insert("_id", id.clone());
                id
            }
        };
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Document,
    ) -> ApiResult<u64> {
        let query = filter.to_document()?;
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| matches(doc, &query)));
        match target {
            Some(doc) => {
                *doc = apply_set(doc, patch)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> ApiResult<u64> {
        let query = filter.to_document()?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|doc| matches(doc, &query)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_object_id() {
        let store = MemoryStore::new();
        let id = store.insert_one("movies", doc! { "title": "Metropolis" }).await.unwrap();
        let id = id.as_object_id().expect("object id").to_hex();

        let found = store.find_one("movies", &Filter::by_id(&id)).await.unwrap();
        assert_eq!(found.unwrap().get_str("title").unwrap(), "Metropolis");
        assert_eq!(store.count("movies").await, 1);
    }

    #[tokio::test]
    async fn find_respects_limit_and_filter() {
        let store = MemoryStore::new();
        let movie = ObjectId::new();
        let other = ObjectId::new();
        for n in 0..4 {
            store
                .insert_one("comments", doc! { "n": n, "movie_id": movie })
                .await
                .unwrap();
        }
        store
            .insert_one("comments", doc! { "n": 9, "movie_id": other })
            .await
            .unwrap();

        let all = store.find("comments", &Filter::all(), Some(2)).await.unwrap();
        assert_eq!(all.len(), 2);

        let scoped = store
            .find("comments", &Filter::by_movie(movie.to_hex()), None)
            .await
            .unwrap();
        assert_eq!(scoped.len(), 4);
        assert!(scoped.iter().all(|c| c.get_object_id("movie_id").unwrap() == movie));
    }

    #[tokio::test]
    async fn update_and_delete_report_counts() {
        let store = MemoryStore::new();
        let id = store.insert_one("movies", doc! { "title": "Nosferatu", "year": 1922 }).await.unwrap();
        let filter = Filter::by_id(id.as_object_id().unwrap().to_hex());

        let matched = store
            .update_one("movies", &filter, doc! { "year": 1923 })
            .await
            .unwrap();
        assert_eq!(matched, 1);
        let doc = store.find_one("movies", &filter).await.unwrap().unwrap();
        assert_eq!(doc.get_i32("year").unwrap(), 1923);
        assert_eq!(doc.get_str("title").unwrap(), "Nosferatu");

        assert_eq!(store.delete_one("movies", &filter).await.unwrap(), 1);
        assert_eq!(store.delete_one("movies", &filter).await.unwrap(), 0);
        assert_eq!(store.update_one("movies", &filter, doc! {}).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn dotted_keys_update_nested_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert_one("movies", doc! { "imdb": { "rating": 7.3, "votes": 1034 } })
            .await
            .unwrap();
        let filter = Filter::by_id(id.as_object_id().unwrap().to_hex());

        store
            .update_one(
                "movies",
                &filter,
                doc! { "imdb.rating": 8.1, "tomatoes.viewer.meter": 90 },
            )
            .await
            .unwrap();

        let doc = store.find_one("movies", &filter).await.unwrap().unwrap();
        let imdb = doc.get_document("imdb").unwrap();
        assert_eq!(imdb.get_f64("rating").unwrap(), 8.1);
        assert_eq!(imdb.get_i32("votes").unwrap(), 1034);
        assert!(!doc.contains_key("imdb.rating"));
        let viewer = doc
            .get_document("tomatoes")
            .and_then(|t| t.get_document("viewer"))
            .unwrap();
        assert_eq!(viewer.get_i32("meter").unwrap(), 90);
    }

    #[tokio::test]
    async fn invalid_set_paths_leave_document_untouched() {
        let store = MemoryStore::new();
        let id = store
            .insert_one("movies", doc! { "title": "Sunrise", "year": 1927 })
            .await
            .unwrap();
        let filter = Filter::by_id(id.as_object_id().unwrap().to_hex());
        let before = store.find_one("movies", &filter).await.unwrap().unwrap();

        for patch in [
            doc! { "title": "Changed", "$inc": { "year": 1 } },
            doc! { "title": "Changed", "year.month": 9 },
        ] {
            let err = store.update_one("movies", &filter, patch).await.unwrap_err();
            assert_eq!(err.status_code(), 500);
        }

        let after = store.find_one("movies", &filter).await.unwrap().unwrap();
        assert_eq!(after, before);
    }
}
