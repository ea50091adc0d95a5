pub mod mongodb;

pub use self::mongodb::MongoDb;
