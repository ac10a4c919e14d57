//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, JwtAuthService},
    database,
    health::{HealthService, MongoHealthService},
    products::{MongoProductsService, ProductsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] mongodb::error::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub auth: Arc<dyn AuthService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be reached.
    pub async fn from_database_url(
        url: &str,
        database_name: &str,
        auth: JwtAuthService,
    ) -> Result<Self, AppInitError> {
        let db = database::connect(url, database_name)
            .await
            .map_err(AppInitError::Database)?;

        db.ping().await.map_err(AppInitError::Database)?;

        Ok(Self {
            products: Arc::new(MongoProductsService::new(&db)),
            auth: Arc::new(auth),
            health: Arc::new(MongoHealthService::new(db)),
        })
    }
}
