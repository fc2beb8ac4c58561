//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use platter_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        albums::{
            MockAlbumsService,
            records::{AlbumRecord, AlbumUuid},
        },
        carts::MockCartsService,
        categories::MockCategoriesService,
        favorites::MockFavoritesService,
        identity::MockIdentityMergeService,
        orders::{
            MockOrdersService,
            records::{OrderRecord, OrderStatus, OrderUuid, ShippingInfo},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
};

use crate::{cart_cookie::CartCookie, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));

pub(crate) const CUSTOMER: Principal = Principal {
    user: TEST_USER_UUID,
    is_admin: false,
};

pub(crate) const ADMIN: Principal = Principal {
    user: TEST_ADMIN_UUID,
    is_admin: true,
};

/// Service mocks backing a test state. Mocks that are not replaced reject every call.
#[derive(Default)]
pub(crate) struct TestServices {
    pub(crate) albums: MockAlbumsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) users: MockUsersService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) favorites: MockFavoritesService,
    pub(crate) identity: MockIdentityMergeService,
    pub(crate) auth: MockAuthService,
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::shared(
            AppContext {
                albums: Arc::new(self.albums),
                categories: Arc::new(self.categories),
                users: Arc::new(self.users),
                carts: Arc::new(self.carts),
                orders: Arc::new(self.orders),
                favorites: Arc::new(self.favorites),
                identity: Arc::new(self.identity),
                auth: Arc::new(self.auth),
            },
            CartCookie::default(),
        )
    }

    /// A service answering `route` as `caller`, or anonymously.
    pub(crate) fn serve(self, caller: Option<Principal>, route: Router) -> Service {
        let router = Router::new().hoop(inject(self.into_state()));

        let router = match caller {
            Some(principal) => router.hoop(InjectPrincipal(principal)),
            None => router,
        };

        Service::new(router.push(route))
    }
}

/// Stands in for the auth middleware.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InjectPrincipal(pub(crate) Principal);

#[handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn make_album(uuid: AlbumUuid, price: Decimal, stock: u32) -> AlbumRecord {
    AlbumRecord {
        uuid,
        title: "Blue Train".to_string(),
        artist: "John Coltrane".to_string(),
        price,
        cover_url: None,
        stock,
        description: None,
        category_uuid: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(uuid: UserUuid, is_blocked: bool) -> UserRecord {
    UserRecord {
        uuid,
        display_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: None,
        delivery_address: None,
        is_admin: false,
        is_blocked,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_shipping() -> ShippingInfo {
    ShippingInfo {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        address: "12 Analytical Row".to_string(),
        phone: "555-0100".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid, total: Decimal) -> OrderRecord {
    OrderRecord {
        uuid,
        number: 7,
        user_uuid: user,
        shipping: make_shipping(),
        total,
        status: OrderStatus::Pending,
        is_paid: false,
        delivered_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
