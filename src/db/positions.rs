use sqlx::PgExecutor;

use crate::models::position::Position;

pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Position>, sqlx::Error> {
    sqlx::query_as::<_, Position>("SELECT * FROM positions ORDER BY id")
        .fetch_all(executor)
        .await
}

pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM positions WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await
}

/// Locks the row until the surrounding transaction ends. New join rows
/// pointing at it wait for the lock. False when the row does not exist.
pub async fn lock<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
    let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM positions WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(locked.is_some())
}

/// True when another position already uses `title`.
pub async fn title_taken<'e, E: PgExecutor<'e>>(
    executor: E,
    title: &str,
    except_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM positions WHERE title = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
    )
    .bind(title)
    .bind(except_id)
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    title: &str,
    description: &str,
) -> Result<Position, sqlx::Error> {
    sqlx::query_as::<_, Position>(
        "INSERT INTO positions (title, description) VALUES ($1, $2) RETURNING *",
    )
    .bind(title)
    .bind(description)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: PgExecutor<'e>>(
    executor: E,
    id: i64,
    title: &str,
    description: &str,
) -> Result<Option<Position>, sqlx::Error> {
    sqlx::query_as::<_, Position>(
        "UPDATE positions SET title = $1, description = $2 WHERE id = $3 RETURNING *",
    )
    .bind(title)
    .bind(description)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM positions WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
