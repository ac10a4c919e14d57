//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use kiosk_app::products::filter::{ProductFilter, SortDirection};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

fn product_filter(req: &Request) -> Result<ProductFilter, StatusError> {
    Ok(ProductFilter {
        txt: req.query::<String>("txt").unwrap_or_default(),
        min_speed: req.parse_query::<f64>("minSpeed")?,
        sort_field: req
            .query::<String>("sortField")
            .filter(|field| !field.trim().is_empty()),
        sort_dir: req
            .parse_query::<SortDirection>("sortDir")?
            .unwrap_or_default(),
        page_idx: req.parse_query::<u64>("pageIdx")?,
    })
}

/// Product Index Handler
///
/// Lists products, filtered by the `txt`, `minSpeed`, `sortField`,
/// `sortDir` and `pageIdx` query parameters.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filter = product_filter(req)?;

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
