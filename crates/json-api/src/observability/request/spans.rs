//! Route labels for spans and metrics.

use uuid::Uuid;

/// Collapse identifiers in a request path so every album, order or user shares one
/// label: `/orders/0190.../payment` becomes `/orders/{uuid}/payment`.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_stays_root() {
        assert_eq!(route_label("/"), "/");
    }

    #[test]
    fn identifiers_are_collapsed() {
        let order = Uuid::now_v7();

        assert_eq!(
            route_label(&format!("/orders/{order}/payment")),
            "/orders/{uuid}/payment"
        );
        assert_eq!(route_label("/cart/items/"), "/cart/items");
    }
}
