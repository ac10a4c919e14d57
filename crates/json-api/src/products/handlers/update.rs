//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use kiosk_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::into_document},
    state::State,
};

/// Update Product Request
///
/// Only `vendor` and `speed` are stored. Other fields are echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub vendor: String,

    pub speed: f64,

    /// Any other fields, echoed back unchanged
    #[serde(flatten)]
    #[salvo(schema(value_type = Object))]
    pub fields: Map<String, Value>,
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<UpdateProductRequest>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.logged_in_user_or_401()?;

    let product = product.into_inner();
    let request = json.into_inner();

    let update = ProductUpdate {
        vendor: request.vendor.clone(),
        speed: request.speed,
        fields: into_document(&request.fields)?,
    };

    state
        .app
        .products
        .update_product(&product, update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_id = %product, user_id = %user.id, "product updated");

    Ok(Json(request))
}
