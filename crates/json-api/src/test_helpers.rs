//! Test helpers.

use std::sync::Arc;

use kiosk_app::{
    auth::{LoggedInUser, MockAuthService, UserId},
    bson::{doc, oid::ObjectId},
    context::AppContext,
    health::MockHealthService,
    products::{
        MockProductsService,
        records::{MessageId, MessageRecord, Owner, ProductId, ProductRecord},
    },
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_PRODUCT_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";
pub(crate) const TEST_USER_ID: &str = "u1";

pub(crate) fn test_user() -> LoggedInUser {
    LoggedInUser {
        id: UserId::from(TEST_USER_ID),
        is_admin: false,
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_logged_in_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn test_product_id() -> ProductId {
    ProductId::from_object_id(ObjectId::from_bytes([
        0x65, 0xa1, 0xf0, 0xc2, 0xe4, 0xb0, 0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6,
    ]))
}

pub(crate) fn make_product(id: ProductId) -> ProductRecord {
    ProductRecord {
        id,
        vendor: "Dell".to_string(),
        speed: 500.0,
        owner: Owner {
            id: UserId::from(TEST_USER_ID),
        },
        msgs: vec![MessageRecord {
            id: MessageId::from("m1"),
            fields: doc! { "txt": "hello" },
        }],
        fields: doc! { "color": "red" },
        created_at: id.created_at(),
    }
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_health_mock() -> MockHealthService {
    let mut health = MockHealthService::new();

    health.expect_check().never();

    health
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_add_product_msg().never();
    products.expect_remove_product_msg().never();

    products
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        auth: Arc::new(strict_auth_mock()),
        health: Arc::new(strict_health_mock()),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(strict_products_mock()),
        auth: Arc::new(auth),
        health: Arc::new(strict_health_mock()),
    })
}

pub(crate) fn state_with_health(health: MockHealthService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(strict_products_mock()),
        auth: Arc::new(strict_auth_mock()),
        health: Arc::new(health),
    })
}

/// Public route with mocked products.
pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

/// Authenticated route with mocked products and [`test_user`] logged in.
pub(crate) fn authed_products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .hoop(inject_user)
            .push(route),
    )
}
