//! SQL data access for quotes. Each statement is its own implicit
//! transaction; failures propagate to the boundary as [`AppError::Database`].

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::quote::Quote;

/// List every quote in storage order.
pub async fn list(pool: &PgPool) -> Result<Vec<Quote>, AppError> {
    let quotes = sqlx::query_as::<_, Quote>("SELECT id, author, quote FROM quotes")
        .fetch_all(pool)
        .await?;
    Ok(quotes)
}

/// Insert a quote and return the stored row with its assigned id.
///
/// Caller is responsible for trimming and validating the fields first.
pub async fn create(pool: &PgPool, author: &str, quote: &str) -> Result<Quote, AppError> {
    let row = sqlx::query_as::<_, Quote>(
        "INSERT INTO quotes (author, quote) VALUES ($1, $2) RETURNING id, author, quote",
    )
    .bind(author)
    .bind(quote)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Delete a quote by id, returning the number of rows removed.
///
/// Deleting an absent id is not an error; the operation is idempotent.
pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
