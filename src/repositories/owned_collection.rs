use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
};

/// A collection whose documents carry `id` and `user_id`; every query is
/// scoped to the owning user.
pub struct OwnedCollection<T: Send + Sync> {
    collection: Collection<T>,
    label: &'static str,
}

impl<T> OwnedCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(db: &Database, collection_name: &str, label: &'static str) -> Self {
        Self {
            collection: db.get_collection(collection_name),
            label,
        }
    }

    fn owned(user_id: &str, id: &str) -> Document {
        doc! { "id": id, "user_id": user_id }
    }

    fn not_found(&self, id: &str) -> AppError {
        AppError::NotFound(format!("{} with id '{}' not found", self.label, id))
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for {} collection", self.collection.name());

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        let owner_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("owner_recent".to_string()).build())
            .build();

        self.collection.create_indexes([id_index, owner_index]).await?;
        Ok(())
    }

    pub async fn insert(&self, item: &T) -> AppResult<()> {
        self.collection.insert_one(item).await?;
        Ok(())
    }

    pub async fn find(&self, user_id: &str, id: &str) -> AppResult<Option<T>> {
        let item = self.collection.find_one(Self::owned(user_id, id)).await?;
        Ok(item)
    }

    /// Newest first.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<T>> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        let items: Vec<T> = cursor.try_collect().await?;
        Ok(items)
    }

    pub async fn replace(&self, user_id: &str, id: &str, item: &T) -> AppResult<()> {
        let result = self
            .collection
            .replace_one(Self::owned(user_id, id), item)
            .await?;

        if result.matched_count == 0 {
            return Err(self.not_found(id));
        }
        Ok(())
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(Self::owned(user_id, id)).await?;

        if result.deleted_count == 0 {
            return Err(self.not_found(id));
        }
        Ok(())
    }
}
