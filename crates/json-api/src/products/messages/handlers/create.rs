//! Add Product Message Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde_json::{Map, Value};

use kiosk_app::domain::products::data::NewMessage;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{MessageResponse, into_document},
    },
    state::State,
};

/// Add Product Message Handler
///
/// Appends a message to the product. The message id is assigned by the server.
#[endpoint(
    tags("products"),
    summary = "Add Product Message",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Message added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<Map<String, Value>>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.logged_in_user_or_401()?;

    let message = NewMessage {
        fields: into_document(&json.into_inner())?,
    };

    let message = state
        .app
        .products
        .add_product_msg(&product.into_inner(), message)
        .await
        .map_err(into_status_error)?;

    tracing::info!(message_id = %message.id, user_id = %user.id, "product message added");

    res.status_code(StatusCode::CREATED);

    Ok(Json(message.into()))
}
