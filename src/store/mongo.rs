use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{ClientOptions, FindOptions},
    Client, Database,
};

use super::{DocumentStore, Filter};
use crate::error::ApiResult;

/// MongoDB-backed store. Connection pooling is left to the driver's `Client`.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: String,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: impl Into<String>) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(client_options)?;
        Ok(Self {
            client,
            database: database.into(),
        })
    }

    /// Fresh logical handle on the configured database.
    fn db(&self) -> Database {
        self.client.database(&self.database)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> ApiResult<()> {
        self.db().run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> ApiResult<Vec<Document>> {
        let query = filter.to_document()?;
        let mut options = FindOptions::default();
        options.limit = limit;
        let cursor = self
            .db()
            .collection::<Document>(collection)
            .find(query, options)
            .await?;
        Ok(cursor.try_collect::<Vec<Document>>().await?)
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> ApiResult<Option<Document>> {
        let query = filter.to_document()?;
        Ok(self
            .db()
            .collection::<Document>(collection)
            .find_one(query, None)
            .await?)
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> ApiResult<Bson> {
        let result = self
            .db()
            .collection::<Document>(collection)
            .insert_one(doc, None)
            .await?;
        Ok(result.inserted_id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Document,
    ) -> ApiResult<u64> {
        let query = filter.to_document()?;
        let result = self
            .db()
            .collection::<Document>(collection)
            .update_one(query, doc! { "$set": patch }, None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> ApiResult<u64> {
        let query = filter.to_document()?;
        let result = self
            .db()
            .collection::<Document>(collection)
            .delete_one(query, None)
            .await?;
        Ok(result.deleted_count)
    }
}
