//! Session CRUD operations

use super::connection::db_err;
use crate::encryption::SealedToken;
use chrono::{DateTime, Utc};
use rewards_admin_core::{Error, Result, Session};
use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: i64,
    name: String,
    base_url: String,
    last_used: Option<DateTime<Utc>>,
    is_active: i32,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            name: row.name,
            base_url: row.base_url,
            last_used: row.last_used,
            is_active: row.is_active != 0,
        }
    }
}

const SESSION_COLUMNS: &str = "id, name, base_url, last_used, is_active";

/// Insert a session with its sealed token
pub async fn create_session(
    pool: &SqlitePool,
    name: &str,
    base_url: &str,
    token: &SealedToken,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO sessions (name, base_url, token_encrypted, nonce)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(base_url)
    .bind(&token.ciphertext)
    .bind(&token.nonce[..])
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(result.last_insert_rowid())
}

/// All sessions, most recently used first
pub async fn list_sessions(pool: &SqlitePool) -> Result<Vec<Session>> {
    let rows: Vec<SessionRow> = sqlx::query_as(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY last_used DESC NULLS LAST, name"
    ))
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    Ok(rows.into_iter().map(Session::from).collect())
}

pub async fn get_session_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Session>> {
    let row: Option<SessionRow> =
        sqlx::query_as(&format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE name = ?"))
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;

    Ok(row.map(Session::from))
}

pub async fn get_active_session(pool: &SqlitePool) -> Result<Option<Session>> {
    let row: Option<SessionRow> = sqlx::query_as(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions WHERE is_active = 1 LIMIT 1"
    ))
    .fetch_optional(pool)
    .await
    .map_err(db_err)?;

    Ok(row.map(Session::from))
}

/// The sealed token of a session
pub async fn get_session_token(pool: &SqlitePool, id: i64) -> Result<SealedToken> {
    let row: Option<(Vec<u8>, Vec<u8>)> =
        sqlx::query_as("SELECT token_encrypted, nonce FROM sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;

    match row {
        Some((ciphertext, nonce)) => SealedToken::from_parts(ciphertext, &nonce),
        None => Err(Error::SessionNotFound(format!("id {id}"))),
    }
}

/// Make one session active and every other inactive
pub async fn set_active_session(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    sqlx::query("UPDATE sessions SET is_active = 0")
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

    let updated = sqlx::query("UPDATE sessions SET is_active = 1 WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
    if updated.rows_affected() == 0 {
        return Err(Error::SessionNotFound(format!("id {id}")));
    }

    tx.commit().await.map_err(db_err)?;
    Ok(())
}

/// Replace the token and base URL of an existing session
pub async fn update_session(
    pool: &SqlitePool,
    id: i64,
    base_url: &str,
    token: &SealedToken,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE sessions
        SET base_url = ?, token_encrypted = ?, nonce = ?
        WHERE id = ?
        "#,
    )
    .bind(base_url)
    .bind(&token.ciphertext)
    .bind(&token.nonce[..])
    .bind(id)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

pub async fn touch_last_used(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("UPDATE sessions SET last_used = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(db_err)?;

    Ok(())
}

pub async fn delete_session(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(db_err)?;

    Ok(())
}

pub async fn session_exists(pool: &SqlitePool, name: &str) -> Result<bool> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(db_err)?;

    Ok(count.0 > 0)
}
