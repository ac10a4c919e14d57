//! Service health

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::database::Db;

#[derive(Debug, Error)]
pub enum HealthServiceError {
    #[error("database unreachable")]
    Database(#[source] mongodb::error::Error),
}

#[derive(Debug, Clone)]
pub struct MongoHealthService {
    db: Db,
}

impl MongoHealthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthService for MongoHealthService {
    async fn check(&self) -> Result<(), HealthServiceError> {
        self.db.ping().await.map_err(HealthServiceError::Database)
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Round trip to every backing store.
    async fn check(&self) -> Result<(), HealthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    #[tokio::test]
    async fn reachable_database_is_healthy() -> TestResult {
        let test_db = TestDb::new().await;

        MongoHealthService::new(test_db.db.clone()).check().await?;

        Ok(())
    }
}
