use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Room, RoomItem};

const ITEM_SELECT: &str = "SELECT r.id, r.name, r.description, t.name AS topic_name, \
     u.id AS host_id, u.username AS host_username, r.created_at \
     FROM rooms r \
     JOIN topics t ON t.id = r.topic_id \
     JOIN users u ON u.id = r.host_id";

pub async fn create(
    pool: &SqlitePool,
    host_id: &str,
    topic_id: &str,
    name: &str,
    description: &str,
) -> sqlx::Result<String> {
    let id = Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO rooms (id, host_id, topic_id, name, description) VALUES (?, ?, ?, ?, ?)")
        .bind(&id)
        .bind(host_id)
        .bind(topic_id)
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    tracing::info!(room = name, host = host_id, "created room");
    Ok(id)
}

pub async fn find(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<Room>> {
    sqlx::query_as("SELECT * FROM rooms WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    topic_id: &str,
    name: &str,
    description: &str,
) -> sqlx::Result<()> {
    sqlx::query("UPDATE rooms SET topic_id = ?, name = ?, description = ? WHERE id = ?")
        .bind(topic_id)
        .bind(name)
        .bind(description)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Messages and participant links go with the room via ON DELETE CASCADE.
pub async fn delete(pool: &SqlitePool, id: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM rooms WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    tracing::info!(room = id, "deleted room");
    Ok(())
}

/// Rooms whose topic name, room name, or description contains `q`,
/// newest first. An empty `q` matches everything.
pub async fn search(pool: &SqlitePool, q: &str) -> sqlx::Result<Vec<RoomItem>> {
    sqlx::query_as(&format!(
        "{ITEM_SELECT} \
         WHERE t.name LIKE ?1 ESCAPE '\\' \
            OR r.name LIKE ?1 ESCAPE '\\' \
            OR r.description LIKE ?1 ESCAPE '\\' \
         ORDER BY r.created_at DESC, r.id DESC"
    ))
    .bind(super::like_contains(q))
    .fetch_all(pool)
    .await
}

pub async fn hosted_by(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<RoomItem>> {
    sqlx::query_as(&format!(
        "{ITEM_SELECT} WHERE r.host_id = ? ORDER BY r.created_at DESC, r.id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
