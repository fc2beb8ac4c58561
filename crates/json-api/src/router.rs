//! App Router

use salvo::Router;

use crate::{albums, auth, carts, categories, favorites, orders, session, users};

/// Every API route, behind the bearer token middleware.
///
/// The middleware only identifies the caller; each handler decides whether an
/// anonymous caller, a customer or an administrator may proceed.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("albums")
                .get(albums::index::handler)
                .post(albums::create::handler)
                .push(
                    Router::with_path("{album}")
                        .get(albums::get::handler)
                        .put(albums::update::handler)
                        .delete(albums::delete::handler),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{category}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{album}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(Router::with_path("session").post(session::handler))
        .push(
            Router::with_path("profile")
                .get(users::profile::handler)
                .put(users::update_profile::handler),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::checkout::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("payment").post(orders::pay::handler))
                        .push(Router::with_path("receipt").get(orders::receipt::handler))
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
        .push(
            Router::with_path("favorites")
                .get(favorites::index::handler)
                .push(
                    Router::with_path("{album}")
                        .put(favorites::create::handler)
                        .delete(favorites::delete::handler),
                ),
        )
        .push(
            Router::with_path("admin")
                .push(Router::with_path("orders").get(orders::admin_index::handler))
                .push(
                    Router::with_path("users")
                        .get(users::index::handler)
                        .push(Router::with_path("{user}/blocked").put(users::blocked::handler)),
                ),
        )
}
