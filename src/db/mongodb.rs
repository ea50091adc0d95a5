use mongodb::{
  bson::{self, Document},
  options::ClientOptions,
  Client, Database,
};

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct MongoDb {
  pub client: Client,
  pub db: Database,
}

pub async fn connect(uri: &str, db_name: &str) -> Result<MongoDb, AppError> {
  // Parse connection string
  let client_options = ClientOptions::parse(uri)
      .await
      .map_err(|e| AppError::StorageError(format!("Failed to parse MongoDB connection string: {}", e)))?;

  let client = Client::with_options(client_options)
      .map_err(|e| AppError::StorageError(format!("Failed to create MongoDB client: {}", e)))?;

  // The driver connects lazily, so ping to fail fast on an unreachable server
  client
      .database("admin")
      .run_command(bson::doc! { "ping": 1 }, None)
      .await
      .map_err(|e| AppError::StorageError(format!("Failed to connect to MongoDB: {}", e)))?;

  let db = client.database(db_name);

  Ok(MongoDb { client, db })
}

impl MongoDb {
  pub fn collection(&self, name: &str) -> mongodb::Collection<Document> {
      self.db.collection(name)
  }
}
