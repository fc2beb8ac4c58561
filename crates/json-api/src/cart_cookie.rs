//! Anonymous cart cookie.
//!
//! Shoppers who have not signed in are identified by an opaque token kept in a cookie.
//! The token is minted on the first cart-touching request and dropped once the cart has
//! been merged into a user's cart.

use salvo::{
    http::cookie::{Cookie, SameSite},
    prelude::{Request, Response},
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub(crate) struct CartCookie {
    name: String,
    secure: bool,
}

impl CartCookie {
    #[must_use]
    pub(crate) fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    /// The token sent by the client, if any.
    pub(crate) fn token(&self, req: &Request) -> Option<String> {
        req.cookie(&self.name)
            .map(|cookie| cookie.value().trim().to_owned())
            .filter(|token| !token.is_empty())
    }

    /// The client's token, or a new one that is also set on the response.
    pub(crate) fn get_or_create(&self, req: &Request, res: &mut Response) -> String {
        if let Some(token) = self.token(req) {
            return token;
        }

        let token = Uuid::now_v7().simple().to_string();

        res.add_cookie(self.build(token.clone()));

        token
    }

    /// Tell the client to forget its token.
    pub(crate) fn discard(&self, res: &mut Response) {
        let mut cookie = self.build(String::new());

        cookie.make_removal();

        res.add_cookie(cookie);
    }

    fn build(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}

impl Default for CartCookie {
    fn default() -> Self {
        Self::new("cart_id", false)
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service, handler,
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn touch_cart(req: &mut Request, res: &mut Response) {
        let token = CartCookie::default().get_or_create(req, res);

        res.render(token);
    }

    #[handler]
    async fn forget_cart(res: &mut Response) {
        CartCookie::default().discard(res);

        res.render("forgotten");
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("touch").get(touch_cart))
                .push(Router::with_path("forget").get(forget_cart)),
        )
    }

    #[tokio::test]
    async fn first_touch_mints_an_http_only_cookie() -> TestResult {
        let mut res = TestClient::get("http://example.com/touch")
            .send(&make_service())
            .await;

        let token = res.take_string().await?;
        let cookie = res.cookie("cart_id").cloned();

        assert!(!token.is_empty(), "expected a minted token");
        assert_eq!(cookie.as_ref().map(Cookie::value), Some(token.as_str()));
        assert_eq!(cookie.as_ref().and_then(Cookie::http_only), Some(true));
        assert_eq!(
            cookie.as_ref().and_then(Cookie::same_site),
            Some(SameSite::Lax)
        );

        Ok(())
    }

    #[tokio::test]
    async fn existing_cookie_is_reused() -> TestResult {
        let mut res = TestClient::get("http://example.com/touch")
            .add_header(COOKIE, "cart_id=abc123", true)
            .send(&make_service())
            .await;

        assert_eq!(res.take_string().await?, "abc123");
        assert!(res.cookie("cart_id").is_none(), "no new cookie expected");

        Ok(())
    }

    #[tokio::test]
    async fn blank_cookie_is_replaced() -> TestResult {
        let mut res = TestClient::get("http://example.com/touch")
            .add_header(COOKIE, "cart_id=", true)
            .send(&make_service())
            .await;

        let token = res.take_string().await?;

        assert!(!token.is_empty(), "expected a minted token");

        Ok(())
    }

    #[tokio::test]
    async fn discard_expires_the_cookie() {
        let res = TestClient::get("http://example.com/forget")
            .send(&make_service())
            .await;

        let cookie = res.cookie("cart_id");

        assert_eq!(cookie.map(Cookie::value), Some(""));
        assert!(
            cookie.and_then(Cookie::max_age).is_some(),
            "expected an expiring cookie"
        );
    }
}
