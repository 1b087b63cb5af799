use anyhow::Context;
use sqlx::{
    error::ErrorKind,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

// SQLite primary result codes (the low byte of an extended code).
const SQLITE_ERROR: i32 = 1;
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_READONLY: i32 = 8;
const SQLITE_IOERR: i32 = 10;
const SQLITE_CORRUPT: i32 = 11;
const SQLITE_FULL: i32 = 13;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_SCHEMA: i32 = 17;
const SQLITE_CONSTRAINT: i32 = 19;

const OPERATIONAL_CODES: &[i32] = &[
    SQLITE_ERROR,
    SQLITE_BUSY,
    SQLITE_LOCKED,
    SQLITE_READONLY,
    SQLITE_IOERR,
    SQLITE_CORRUPT,
    SQLITE_FULL,
    SQLITE_CANTOPEN,
    SQLITE_SCHEMA,
];

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_EXPENSES: &str = r#"
    CREATE TABLE IF NOT EXISTS expenses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT,
        description TEXT NOT NULL,
        amount REAL NOT NULL,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users(id)
    )
"#;

/// Failures surfaced by the store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("integrity error: {0}")]
    Constraint(String),

    #[error("operational error: {0}")]
    Operational(String),

    #[error("database error ({code}): {detail}")]
    Database { code: String, detail: String },
}

impl StoreError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db_err) => {
                let detail = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => Self::Constraint(detail),
                    _ => {
                        let code = db_err
                            .code()
                            .map(|c| c.into_owned())
                            .unwrap_or_else(|| "UNKNOWN".into());
                        match code.parse::<i32>().ok().map(|c| c & 0xff) {
                            Some(SQLITE_CONSTRAINT) => Self::Constraint(detail),
                            Some(c) if OPERATIONAL_CODES.contains(&c) => Self::Operational(detail),
                            _ => Self::Database { code, detail },
                        }
                    }
                }
            }
            other if is_operational(&other) => Self::Operational(other.to_string()),
            other => Self::Database {
                code: "UNKNOWN".into(),
                detail: other.to_string(),
            },
        }
    }
}

fn is_operational(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
    )
}

/// Open a pool against the SQLite file at `path`, creating it if needed.
///
/// Foreign keys stay off: `expenses.user_id` is declared as a reference
/// but never enforced.
pub async fn connect(path: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("open sqlite database {}", path))?;
    Ok(pool)
}

/// Single-connection in-memory pool. The connection never idles out, so
/// the database lives as long as the pool.
#[cfg(test)]
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("open in-memory sqlite database")?;
    Ok(pool)
}

/// Create both tables if absent. Safe to call on every start.
pub async fn init_schema(db: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(CREATE_USERS).execute(db).await?;
    sqlx::query(CREATE_EXPENSES).execute(db).await?;
    tracing::debug!("schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let db = connect_in_memory().await.expect("pool");
        init_schema(&db).await.expect("first init");
        init_schema(&db).await.expect("second init");

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'expenses') ORDER BY name",
        )
        .fetch_all(&db)
        .await
        .expect("list tables");
        assert_eq!(tables, vec!["expenses".to_string(), "users".to_string()]);
    }

    #[tokio::test]
    async fn unique_violation_is_constraint() {
        let db = connect_in_memory().await.expect("pool");
        init_schema(&db).await.expect("init");
        let insert = "INSERT INTO users (name, email) VALUES ('a', 'dup@x.com')";
        sqlx::query(insert).execute(&db).await.expect("first insert");
        let err: StoreError = sqlx::query(insert).execute(&db).await.unwrap_err().into();
        assert!(matches!(err, StoreError::Constraint(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_table_is_operational() {
        let db = connect_in_memory().await.expect("pool");
        let err: StoreError = sqlx::query("SELECT id FROM nowhere")
            .execute(&db)
            .await
            .unwrap_err()
            .into();
        match err {
            StoreError::Operational(detail) => assert!(detail.contains("no such table")),
            other => panic!("expected operational error, got {other:?}"),
        }
    }

    #[test]
    fn protocol_error_is_generic_database_error() {
        let err = StoreError::from(sqlx::Error::Protocol("boom".into()));
        match err {
            StoreError::Database { code, detail } => {
                assert_eq!(code, "UNKNOWN");
                assert!(detail.contains("boom"));
            }
            other => panic!("expected database error, got {other:?}"),
        }
    }

    #[test]
    fn pool_timeout_is_operational() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Operational(_)));
    }
}
