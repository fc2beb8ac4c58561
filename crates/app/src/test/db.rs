//! Per-test PostgreSQL databases.
//!
//! One container is started per test binary. Every [`TestDb`] creates its own database in
//! it and applies the migrations, so tests never share rows. Databases are left in place
//! and disappear with the container.

use std::{
    env, process,
    sync::atomic::{AtomicU32, Ordering},
};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;

use crate::database::Db;

const USER: &str = "platter_test";
const PASSWORD: &str = "platter_test_password";

static HOST: Lazy<String> = Lazy::new(|| {
    env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string())
});

static NEXT_DATABASE: AtomicU32 = AtomicU32::new(1);

/// The running container and its mapped port.
///
/// The port is resolved once so later tests, which run on their own runtimes, never talk
/// to the Docker API.
static SERVER: OnceCell<(ContainerAsync<PostgresImage>, u16)> = OnceCell::const_new();

async fn start_server() -> (ContainerAsync<PostgresImage>, u16) {
    let container = PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("platter_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("failed to start the postgres container");

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("postgres port is not mapped");

    (container, port)
}

fn url(port: u16, database: &str) -> String {
    format!("postgresql://{USER}:{PASSWORD}@{}:{port}/{database}", *HOST)
}

/// A freshly migrated database of its own.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let (_, port) = SERVER.get_or_init(start_server).await;

        let name = format!(
            "platter_{}_{}",
            process::id(),
            NEXT_DATABASE.fetch_add(1, Ordering::Relaxed)
        );

        let mut admin = PgConnection::connect(&url(*port, "postgres"))
            .await
            .expect("failed to connect to the postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("failed to create the test database");

        admin.close().await.expect("failed to close the admin connection");

        let pool = PgPool::connect(&url(*port, &name))
            .await
            .expect("failed to connect to the test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("failed to migrate the test database");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A [`Db`] handle sharing this database's pool.
    pub fn db(&self) -> Db {
        Db::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn each_test_db_is_a_separate_database() -> TestResult {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        assert_ne!(first.name(), second.name());

        let current: String = sqlx::query_scalar("SELECT current_database()")
            .fetch_one(second.pool())
            .await?;

        assert_eq!(current, second.name());

        Ok(())
    }

    #[tokio::test]
    async fn migrations_are_applied() -> TestResult {
        let test_db = TestDb::new().await;

        let albums: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums")
            .fetch_one(test_db.pool())
            .await?;

        assert_eq!(albums, 0);

        Ok(())
    }
}
