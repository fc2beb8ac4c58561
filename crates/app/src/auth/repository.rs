//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::records::{Principal, UserTokenRecord, UserTokenUuid},
    domain::users::records::UserUuid,
};

const CREATE_TOKEN_SQL: &str = include_str!("sql/create_token.sql");
const FIND_PRINCIPAL_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_principal_by_token_hash.sql");
const REVOKE_TOKEN_SQL: &str = include_str!("sql/revoke_token.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: UserTokenUuid,
        user: UserUuid,
        token_hash: &str,
    ) -> Result<UserTokenRecord, sqlx::Error> {
        query_as::<Postgres, UserTokenRecord>(CREATE_TOKEN_SQL)
            .bind(token.into_uuid())
            .bind(user.into_uuid())
            .bind(token_hash)
            .fetch_one(&mut **tx)
            .await
    }

    /// Resolve an active token digest to its user.
    pub(crate) async fn find_principal_by_token_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<Principal>, sqlx::Error> {
        query_as::<Postgres, Principal>(FIND_PRINCIPAL_BY_TOKEN_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn revoke_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: UserTokenUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_TOKEN_SQL)
            .bind(token.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserTokenRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserTokenUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Principal {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            is_admin: row.try_get("is_admin")?,
        })
    }
}
