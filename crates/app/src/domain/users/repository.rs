//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::users::{
    data::{NewUser, ProfileUpdate},
    records::{UserRecord, UserUuid},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const SET_BLOCKED_SQL: &str = include_str!("sql/set_blocked.sql");
const TOGGLE_BLOCKED_SQL: &str = include_str!("sql/toggle_blocked.sql");
const IS_BLOCKED_SQL: &str = include_str!("sql/is_blocked.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.display_name)
            .bind(user.email)
            .bind(user.phone)
            .bind(user.delivery_address)
            .bind(user.is_admin)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        profile: ProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(profile.display_name)
            .bind(profile.email)
            .bind(profile.phone)
            .bind(profile.delivery_address)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_blocked(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        blocked: bool,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_BLOCKED_SQL)
            .bind(user.into_uuid())
            .bind(blocked)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn toggle_blocked(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(TOGGLE_BLOCKED_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// `None` when the user does not exist.
    pub(crate) async fn is_blocked(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<bool>, sqlx::Error> {
        query_scalar::<Postgres, bool>(IS_BLOCKED_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            display_name: row.try_get("display_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            delivery_address: row.try_get("delivery_address")?,
            is_admin: row.try_get("is_admin")?,
            is_blocked: row.try_get("is_blocked")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
