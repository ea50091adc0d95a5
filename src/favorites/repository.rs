use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{FindOptions, IndexOptions},
    IndexModel,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{db::MongoDb, error::AppError, favorites::model::Favorite};

const FAVORITES_COLLECTION: &str = "favorites";

/// Persistence for favorite records. Records are insert/delete only.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Stores a new favorite and returns it with its assigned id. Fails with
    /// `ConflictError` when a favorite with the same name already exists.
    async fn insert(&self, favorite: Favorite) -> Result<Favorite, AppError>;

    /// All favorites in insertion order.
    async fn find_all(&self) -> Result<Vec<Favorite>, AppError>;

    /// Removes the favorite with `id`. Returns whether a record was removed.
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct MongoFavoriteRepository {
    pub db: MongoDb,
}

impl MongoFavoriteRepository {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    /// Creates the unique index on `name` backing the store-side duplicate check.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.db
            .collection(FAVORITES_COLLECTION)
            .create_index(index, None)
            .await?;

        info!("Ensured unique index on {}.name", FAVORITES_COLLECTION);
        Ok(())
    }
}

#[async_trait]
impl FavoriteRepository for MongoFavoriteRepository {
    async fn insert(&self, favorite: Favorite) -> Result<Favorite, AppError> {
        let collection = self.db.collection(FAVORITES_COLLECTION);

        // Check if a favorite with the same name already exists
        let existing = collection
            .find_one(doc! { "name": &favorite.name }, None)
            .await?;

        if existing.is_some() {
            return Err(AppError::ConflictError(format!(
                "{} is already in favorites",
                favorite.name
            )));
        }

        let favorite_doc = bson::to_document(&favorite)?;

        // A concurrent insert of the same name is caught by the unique index
        let insert_result = collection.insert_one(favorite_doc, None).await?;

        let id = insert_result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::StorageError("Failed to get inserted favorite ID".to_string()))?;

        let mut favorite_with_id = favorite;
        favorite_with_id.id = Some(id);

        Ok(favorite_with_id)
    }

    async fn find_all(&self) -> Result<Vec<Favorite>, AppError> {
        let collection = self.db.collection(FAVORITES_COLLECTION);

        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = collection.find(None, options).await?;

        let favorites: Vec<Document> = cursor.try_collect().await?;

        let favorites = favorites
            .into_iter()
            .map(|doc| bson::from_document::<Favorite>(doc).map_err(AppError::from))
            .collect::<Result<Vec<Favorite>, AppError>>()?;

        Ok(favorites)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let collection = self.db.collection(FAVORITES_COLLECTION);

        let delete_result = collection.delete_one(doc! { "_id": id }, None).await?;

        debug!("Deleted {} favorite(s) with id {}", delete_result.deleted_count, id);
        Ok(delete_result.deleted_count > 0)
    }
}

/// Process-local store used by tests and `--in-memory` runs.
#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    favorites: RwLock<Vec<Favorite>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn insert(&self, favorite: Favorite) -> Result<Favorite, AppError> {
        let mut favorites = self.favorites.write().await;

        if favorites.iter().any(|f| f.name == favorite.name) {
            return Err(AppError::ConflictError(format!(
                "{} is already in favorites",
                favorite.name
            )));
        }

        let stored = Favorite {
            id: Some(ObjectId::new()),
            ..favorite
        };
        favorites.push(stored.clone());

        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Favorite>, AppError> {
        Ok(self.favorites.read().await.clone())
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut favorites = self.favorites.write().await;
        let before = favorites.len();
        favorites.retain(|f| f.id.as_ref() != Some(id));

        Ok(favorites.len() < before)
    }
}
