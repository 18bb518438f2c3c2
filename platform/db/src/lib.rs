//! Database primitives: pool settings and wiring, table provisioning, and the
//! statements behind each employee operation.

mod employees;
mod settings;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use thiserror::Error;
use tracing::info;

pub use employees::{
    delete_employee, employee_count, employee_exists, insert_employee, list_employees,
    update_employee,
};
pub use settings::DatabaseSettings;

/// Shared connection pool. Each query checks a connection out for its own
/// duration and returns it afterwards.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid value {value:?} for {key}")]
    InvalidSetting { key: &'static str, value: String },
    #[error("failed to connect to database: {0}")]
    Connect(#[source] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .sqlx_logging(false);
    let pool = Database::connect(options).await.map_err(DbError::Connect)?;
    info!(
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Trivial liveness query.
pub async fn ping<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        "SELECT 1".to_string(),
    ))
    .await
    .map(|_| ())
}

/// Create the `employees` table when it does not exist yet.
pub async fn ensure_schema<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    let mut create = Schema::new(backend).create_table_from_entity(entity::employees::Entity);
    create.if_not_exists();
    conn.execute(backend.build(&create)).await.map(|_| ())
}
