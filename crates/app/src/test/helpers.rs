//! Test Helpers

use mongodb::bson::Document;

use crate::{
    auth::{LoggedInUser, UserId},
    domain::products::{
        ProductsService, ProductsServiceError, data::NewProduct, records::ProductRecord,
    },
    test::TestContext,
};

pub(crate) fn user(id: &str) -> LoggedInUser {
    LoggedInUser {
        id: UserId::from(id),
        is_admin: false,
    }
}

pub(crate) fn admin(id: &str) -> LoggedInUser {
    LoggedInUser {
        id: UserId::from(id),
        is_admin: true,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    owner: &LoggedInUser,
    vendor: &str,
    speed: f64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            vendor: vendor.to_string(),
            speed,
            owner: owner.id.clone(),
            fields: Document::new(),
        })
        .await
}
