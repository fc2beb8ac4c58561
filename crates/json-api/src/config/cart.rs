//! Cart Cookie Config

use clap::{ArgAction, Args};

/// Anonymous cart cookie settings.
#[derive(Debug, Args)]
pub struct CartCookieConfig {
    /// Name of the cookie carrying the anonymous cart token
    #[arg(long, env = "CART_COOKIE_NAME", default_value = "cart_id")]
    pub cart_cookie_name: String,

    /// Only send the cart cookie over HTTPS
    #[arg(long, env = "CART_COOKIE_SECURE", default_value_t = false, action = ArgAction::Set)]
    pub cart_cookie_secure: bool,
}
