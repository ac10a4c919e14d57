//! Database connection management

use mongodb::{
    Client, Collection, Database,
    bson::doc,
    error::Error,
};

#[derive(Debug, Clone)]
pub struct Db {
    database: Database,
}

impl Db {
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Typed handle to a named collection.
    #[must_use]
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    /// Round trip to the server.
    ///
    /// # Errors
    ///
    /// Returns an error when the server cannot be reached.
    pub async fn ping(&self) -> Result<(), Error> {
        self.database.run_command(doc! { "ping": 1 }).await?;

        Ok(())
    }
}

/// Connect to `MongoDB` and select a database.
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed.
pub async fn connect(url: &str, database: &str) -> Result<Db, Error> {
    let client = Client::with_uri_str(url).await?;

    Ok(Db::new(client.database(database)))
}
