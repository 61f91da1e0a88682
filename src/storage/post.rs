//! Post queries against the `post` table.

use crate::models::Post;
use sqlx::PgPool;

/// List all posts.
pub async fn list_posts(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>("SELECT id, description, url FROM post ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Insert a post, with the image URL when one was uploaded.
pub async fn insert_post(
    pool: &PgPool,
    description: &str,
    url: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO post (description, url) VALUES ($1, $2)")
        .bind(description)
        .bind(url)
        .execute(pool)
        .await?;
    Ok(())
}

/// Update a post's description, and its image URL when a new one was uploaded.
pub async fn update_post(
    pool: &PgPool,
    id: i32,
    description: &str,
    url: Option<&str>,
) -> Result<(), sqlx::Error> {
    match url {
        Some(url) => {
            sqlx::query("UPDATE post SET description = $1, url = $2 WHERE id = $3")
                .bind(description)
                .bind(url)
                .bind(id)
                .execute(pool)
                .await?;
        }
        None => {
            sqlx::query("UPDATE post SET description = $1 WHERE id = $2")
                .bind(description)
                .bind(id)
                .execute(pool)
                .await?;
        }
    }
    Ok(())
}

/// Fetch a post's image URL, or `None` when the post doesn't exist.
///
/// The outer Option is row existence; the inner one is whether the post
/// has an image.
pub async fn get_post_url(
    pool: &PgPool,
    id: i32,
) -> Result<Option<Option<String>>, sqlx::Error> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT url FROM post WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(url,)| url))
}

/// Delete a post. Returns true if a row was removed.
pub async fn delete_post(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM post WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
