//! Platter JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use platter_app::context::AppContext;

use crate::{cart_cookie::CartCookie, config::ServerConfig, state::State};

mod albums;
mod auth;
mod cart_cookie;
mod carts;
mod categories;
mod config;
mod errors;
mod extensions;
mod favorites;
mod healthcheck;
mod observability;
mod orders;
mod router;
mod session;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;

/// Platter JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_logging(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.run_migrations,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let state = State::shared(
        app,
        CartCookie::new(config.cart.cart_cookie_name.clone(), config.cart.cart_cookie_secure),
    );

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Platter API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
