//! Commerce capability check shared by the cart and order engines.

use sqlx::{Postgres, Transaction};

use crate::domain::users::{records::UserUuid, repository::PgUsersRepository};

/// Whether `user` may mutate commerce state (grow a cart, check out, pay).
///
/// Unknown users are treated like blocked ones. Runs inside the caller's transaction
/// so the answer is consistent with the rest of the operation.
pub(crate) async fn can_mutate_commerce(
    tx: &mut Transaction<'_, Postgres>,
    user: UserUuid,
) -> Result<bool, sqlx::Error> {
    let blocked = PgUsersRepository::new().is_blocked(tx, user).await?;

    Ok(blocked == Some(false))
}
