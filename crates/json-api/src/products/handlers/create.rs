//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use kiosk_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductResponse, into_document},
    },
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub vendor: String,

    pub speed: f64,

    /// Any other fields to store with the product
    #[serde(flatten)]
    #[salvo(schema(value_type = Object))]
    pub fields: Map<String, Value>,
}

/// Create Product Handler
///
/// The authenticated user becomes the product owner.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.logged_in_user_or_401()?;

    let request = json.into_inner();

    let product = state
        .app
        .products
        .create_product(NewProduct {
            vendor: request.vendor,
            speed: request.speed,
            owner: user.id.clone(),
            fields: into_document(&request.fields)?,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
