use sqlx::SqlitePool;

use super::repo_types::UserSummary;
use crate::db::StoreError;

const ENTITY: &str = "User";

/// Insert a user and return the store-assigned id.
/// A duplicate email surfaces as `StoreError::Constraint`.
pub async fn insert(
    db: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<i64, StoreError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (name, email, password)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn list(db: &SqlitePool) -> Result<Vec<UserSummary>, StoreError> {
    let rows = sqlx::query_as::<_, UserSummary>("SELECT id, name FROM users ORDER BY id")
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn get(db: &SqlitePool, id: i64) -> Result<UserSummary, StoreError> {
    sqlx::query_as::<_, UserSummary>("SELECT id, name FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY))
}

/// Overwrite name, email and password. Updating a missing id is a no-op.
pub async fn update(
    db: &SqlitePool,
    id: i64,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        UPDATE users
           SET name = ?, email = ?, password = ?
         WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn delete(db: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let res = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    if res.rows_affected() == 0 {
        return Err(StoreError::not_found(ENTITY));
    }
    Ok(())
}

#[cfg(test)]
pub async fn count(db: &SqlitePool) -> Result<i64, StoreError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?;
    Ok(n)
}
