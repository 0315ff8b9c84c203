use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

const CONNECT_ATTEMPTS: u32 = 3;
/// Stand-in for "never" on pools whose single connection holds the database.
const PINNED_CONNECTION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 100);

/// Pool settings resolved into `Duration`s for sea-orm.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from_settings(&configs::DatabaseConfig::default())
    }
}

impl DatabaseConfig {
    pub fn from_settings(s: &configs::DatabaseConfig) -> Self {
        Self {
            url: s.url.clone(),
            max_connections: s.max_connections,
            min_connections: s.min_connections,
            connect_timeout: Duration::from_secs(s.connect_timeout_secs),
            acquire_timeout: Duration::from_secs(s.acquire_timeout_secs),
            idle_timeout: Duration::from_secs(s.idle_timeout_secs),
            max_lifetime: Duration::from_secs(s.max_lifetime_secs),
            sqlx_logging: s.sqlx_logging,
        }
    }

    /// A private in-memory SQLite database.
    pub fn in_memory() -> Self {
        Self { url: configs::DEFAULT_DATABASE_URL.to_string(), ..Self::default() }
    }

    fn is_in_memory(&self) -> bool {
        self.url.starts_with("sqlite:") && (self.url.contains(":memory:") || self.url.contains("mode=memory"))
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.connect_timeout(self.connect_timeout)
            .acquire_timeout(self.acquire_timeout)
            .sqlx_logging(self.sqlx_logging);
        if self.is_in_memory() {
            // every pooled connection would open its own empty database
            opt.max_connections(1)
                .min_connections(1)
                .idle_timeout(PINNED_CONNECTION_TTL)
                .max_lifetime(PINNED_CONNECTION_TTL);
        } else {
            opt.max_connections(self.max_connections)
                .min_connections(self.min_connections)
                .idle_timeout(self.idle_timeout)
                .max_lifetime(self.max_lifetime);
        }
        opt
    }
}

/// Connect with a bounded number of retries and linear backoff.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut last_err: Option<DbErr> = None;
    for attempt in 1..=CONNECT_ATTEMPTS {
        match Database::connect(cfg.connect_options()).await {
            Ok(db) => {
                info!(attempt, backend = ?db.get_database_backend(), "database connected");
                return Ok(db);
            }
            Err(e) => {
                warn!(attempt, error = %e, "database connection failed");
                last_err = Some(e);
                if attempt < CONNECT_ATTEMPTS {
                    tokio::time::sleep(Duration::from_millis(100 * u64::from(attempt))).await;
                }
            }
        }
    }
    Err(anyhow::anyhow!(
        "cannot connect to database after {CONNECT_ATTEMPTS} attempts: {}",
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Apply all pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    migration::Migrator::up(db, None).await?;
    Ok(())
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(cfg).await?;
    migrate(&db).await?;
    Ok(db)
}

/// Verify the connection is usable.
pub async fn ping(db: &DatabaseConnection) -> anyhow::Result<()> {
    db.ping().await?;
    Ok(())
}
