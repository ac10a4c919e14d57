//! App Router

use salvo::Router;

use crate::{auth, products};

pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("products")
                .hoop(auth::middleware::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(
                            Router::with_path("msg")
                                .post(products::messages::create::handler)
                                .push(
                                    Router::with_path("{message}")
                                        .delete(products::messages::delete::handler),
                                ),
                        ),
                ),
        )
}
