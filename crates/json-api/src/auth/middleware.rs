//! Auth middleware.
//!
//! Requests without an `Authorization` header continue anonymously. A header that is
//! present but not a usable bearer token, or a token that does not resolve to a user,
//! is rejected with 401.

use std::sync::Arc;

use platter_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    let Some(token) = header.to_str().ok().and_then(extract_bearer_token) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let principal = match state.app.auth.authenticate_bearer(token).await {
        Ok(principal) => principal,
        Err(AuthServiceError::NotFound | AuthServiceError::InvalidReference) => {
            res.render(StatusError::unauthorized().brief("Invalid API token"));

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate api token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_principal(principal);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
