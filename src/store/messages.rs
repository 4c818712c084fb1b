use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Message, MessageItem};

const ITEM_SELECT: &str = "SELECT m.id, m.body, m.created_at, \
     u.id AS user_id, u.username, r.id AS room_id, r.name AS room_name \
     FROM messages m \
     JOIN users u ON u.id = m.user_id \
     JOIN rooms r ON r.id = m.room_id";

const NEWEST_FIRST: &str = "ORDER BY m.created_at DESC, m.id DESC";

pub async fn create(
    pool: &SqlitePool,
    user_id: &str,
    room_id: &str,
    body: &str,
) -> sqlx::Result<String> {
    let id = Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO messages (id, user_id, room_id, body) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(user_id)
        .bind(room_id)
        .bind(body)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn find(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<Message>> {
    sqlx::query_as("SELECT * FROM messages WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM messages WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn recent(pool: &SqlitePool) -> sqlx::Result<Vec<MessageItem>> {
    sqlx::query_as(&format!("{ITEM_SELECT} {NEWEST_FIRST}"))
        .fetch_all(pool)
        .await
}

pub async fn in_room(pool: &SqlitePool, room_id: &str) -> sqlx::Result<Vec<MessageItem>> {
    sqlx::query_as(&format!("{ITEM_SELECT} WHERE m.room_id = ? {NEWEST_FIRST}"))
        .bind(room_id)
        .fetch_all(pool)
        .await
}

pub async fn by_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<MessageItem>> {
    sqlx::query_as(&format!("{ITEM_SELECT} WHERE m.user_id = ? {NEWEST_FIRST}"))
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Messages whose room's topic name contains `q`, for the home feed.
pub async fn matching_topic(pool: &SqlitePool, q: &str) -> sqlx::Result<Vec<MessageItem>> {
    sqlx::query_as(&format!(
        "{ITEM_SELECT} JOIN topics t ON t.id = r.topic_id \
         WHERE t.name LIKE ? ESCAPE '\\' {NEWEST_FIRST}"
    ))
    .bind(super::like_contains(q))
    .fetch_all(pool)
    .await
}
