//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use kiosk_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::InvalidIdentifier(_) => {
            StatusError::bad_request().brief("Invalid product id")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::NotOwnedOrNotFound => {
            StatusError::forbidden().brief("Product not found or not owned by caller")
        }
        ProductsServiceError::MalformedDocument(source) => {
            error!("stored product could not be decoded: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::Storage(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
