//! Products service errors.

use mongodb::{bson::de::Error as DecodeError, error::Error};
use thiserror::Error;

use crate::object_ids::InvalidObjectId;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("invalid product id")]
    InvalidIdentifier(#[from] InvalidObjectId),

    #[error("product not found")]
    NotFound,

    /// The product is absent or the caller neither owns it nor is an admin.
    #[error("product not found or not owned by caller")]
    NotOwnedOrNotFound,

    #[error("stored product is malformed")]
    MalformedDocument(#[from] DecodeError),

    #[error("storage error")]
    Storage(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        Self::Storage(error)
    }
}
