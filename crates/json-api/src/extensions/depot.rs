//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use platter_app::auth::Principal;

/// Helpers for request-scoped values and the HTTP errors raised when they are missing.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated caller, if any.
    fn principal(&self) -> Option<Principal>;

    /// The authenticated caller, or 401 for anonymous requests.
    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    /// An authenticated administrator; 401 when anonymous, 403 otherwise.
    fn admin_or_403(&self) -> Result<Principal, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal(&self) -> Option<Principal> {
        self.obtain::<Principal>().ok().copied()
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.principal()
            .ok_or_else(|| StatusError::unauthorized().brief("Sign in to continue"))
    }

    fn admin_or_403(&self) -> Result<Principal, StatusError> {
        let principal = self.principal_or_401()?;

        if !principal.is_admin {
            return Err(StatusError::forbidden().brief("Administrator access required"));
        }

        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use uuid::Uuid;

    use platter_app::domain::users::records::UserUuid;

    use super::*;

    fn principal(is_admin: bool) -> Principal {
        Principal {
            user: UserUuid::from_uuid(Uuid::nil()),
            is_admin,
        }
    }

    #[test]
    fn anonymous_depot_has_no_principal() {
        let depot = Depot::new();

        assert_eq!(depot.principal(), None);
        assert_eq!(
            depot.principal_or_401().err().map(|error| error.code),
            Some(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(
            depot.admin_or_403().err().map(|error| error.code),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn customers_are_not_admins() {
        let mut depot = Depot::new();

        depot.insert_principal(principal(false));

        assert_eq!(depot.principal_or_401().ok(), Some(principal(false)));
        assert_eq!(
            depot.admin_or_403().err().map(|error| error.code),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn admins_pass_the_admin_check() {
        let mut depot = Depot::new();

        depot.insert_principal(principal(true));

        assert_eq!(depot.admin_or_403().ok(), Some(principal(true)));
    }
}
