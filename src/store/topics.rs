use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Topic, TopicItem};

/// Resolve a topic by name, creating it if absent. The insert-then-select
/// pair stays race-safe: a concurrent insert wins the conflict and the
/// select picks up whichever row landed.
pub async fn get_or_create(pool: &SqlitePool, name: &str) -> sqlx::Result<Topic> {
    sqlx::query("INSERT INTO topics (id, name) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
        .bind(Uuid::now_v7().to_string())
        .bind(name)
        .execute(pool)
        .await?;

    sqlx::query_as("SELECT id, name FROM topics WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn find(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<Topic>> {
    sqlx::query_as("SELECT id, name FROM topics WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Topics whose name contains `q` (every topic when `q` is empty), each with
/// its room count. `limit` of `None` means all; SQLite reads -1 as no limit.
pub async fn search(
    pool: &SqlitePool,
    q: &str,
    limit: Option<i64>,
) -> sqlx::Result<Vec<TopicItem>> {
    sqlx::query_as(
        "SELECT t.id, t.name, COUNT(r.id) AS room_count \
         FROM topics t LEFT JOIN rooms r ON r.topic_id = t.id \
         WHERE t.name LIKE ? ESCAPE '\\' \
         GROUP BY t.id ORDER BY room_count DESC, t.name ASC \
         LIMIT ?",
    )
    .bind(super::like_contains(q))
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await
}
