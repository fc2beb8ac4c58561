//! Test Helpers

use rust_decimal::Decimal;

use crate::domain::{
    albums::data::AlbumDetails,
    orders::records::ShippingInfo,
    users::{data::NewUser, records::UserUuid},
};

pub(crate) fn album_details(title: &str, price: Decimal, stock: u32) -> AlbumDetails {
    AlbumDetails {
        title: title.to_string(),
        artist: "Test Artist".to_string(),
        price,
        cover_url: None,
        stock,
        description: None,
        category_uuid: None,
    }
}

pub(crate) fn new_user(email: &str, is_admin: bool) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        display_name: "Test Shopper".to_string(),
        email: email.to_string(),
        phone: Some("+48 500 100 200".to_string()),
        delivery_address: Some("ul. Testowa 1, Kraków".to_string()),
        is_admin,
    }
}

pub(crate) fn shipping() -> ShippingInfo {
    ShippingInfo {
        first_name: "Test".to_string(),
        last_name: "Shopper".to_string(),
        address: "ul. Testowa 1, Kraków".to_string(),
        phone: "+48 500 100 200".to_string(),
        email: "shopper@example.com".to_string(),
    }
}
