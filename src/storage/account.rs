//! Account queries against the `users` table.

use crate::models::Account;
use sqlx::PgPool;

/// Insert a new account and return the stored row.
///
/// `password_hash` must already be hashed; this layer never sees plaintext.
pub async fn insert_account(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id, username, password",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

/// Look up an account by username.
pub async fn get_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>("SELECT id, username, password FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}
