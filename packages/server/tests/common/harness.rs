//! Test harness with testcontainers for integration testing.
//!
//! Uses one shared Postgres container across all tests. The container and
//! migrations are initialized on first use, then reused; tests keep their
//! data apart with unique emails, codes and programs.

use anyhow::{Context, Result};
use campus_core::common::AccountId;
use campus_core::domains::auth::{Account, JwtService};
use campus_core::kernel::{RollNumberSequence, ServerDeps};
use campus_core::server::{build_app, AppOptions};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::ApiClient;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";
pub const TEST_PREFIX: &str = "AMU";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let response = ctx.client().get("/api").await;
///     // ...
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
    pub deps: ServerDeps,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let deps = ServerDeps::new(
            db_pool.clone(),
            Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())),
            RollNumberSequence::new(TEST_PREFIX),
        );

        Ok(Self { db_pool, deps })
    }

    /// Unauthenticated client against a fresh router
    pub fn client(&self) -> ApiClient {
        ApiClient::new(build_app(self.deps.clone(), AppOptions::default()))
    }

    /// Client carrying a valid token for `account`
    pub fn client_as(&self, account: &Account) -> ApiClient {
        self.client().with_token(self.token_for(account))
    }

    pub fn token_for(&self, account: &Account) -> String {
        self.deps
            .jwt_service
            .create_token(account.id, account.email.clone(), account.role)
            .expect("Failed to create test token")
    }

    pub async fn account_count(&self, email: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count accounts")
    }

    pub async fn account(&self, id: AccountId) -> Account {
        Account::find_by_id(id, &self.db_pool)
            .await
            .expect("Failed to load account")
            .expect("Account missing")
    }
}
