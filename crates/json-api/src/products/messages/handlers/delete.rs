//! Remove Product Message Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Message Removed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageRemovedResponse {
    /// Removed message id
    pub id: String,
}

/// Remove Product Message Handler
///
/// Removing a message id the product does not carry still succeeds.
#[endpoint(
    tags("products"),
    summary = "Remove Product Message",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Message removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    message: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageRemovedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.logged_in_user_or_401()?;

    let id = state
        .app
        .products
        .remove_product_msg(&product.into_inner(), &message.into_inner())
        .await
        .map_err(into_status_error)?;

    tracing::info!(message_id = %id, user_id = %user.id, "product message removed");

    Ok(Json(MessageRemovedResponse { id: id.to_string() }))
}
