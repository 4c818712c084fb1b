use sqlx::SqlitePool;

use crate::models::ParticipantItem;

/// Idempotent: posting twice in the same room keeps a single link.
pub async fn add(pool: &SqlitePool, room_id: &str, user_id: &str) -> sqlx::Result<()> {
    sqlx::query("INSERT OR IGNORE INTO participants (room_id, user_id) VALUES (?, ?)")
        .bind(room_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn in_room(pool: &SqlitePool, room_id: &str) -> sqlx::Result<Vec<ParticipantItem>> {
    sqlx::query_as(
        "SELECT u.id AS user_id, u.username \
         FROM participants p JOIN users u ON u.id = p.user_id \
         WHERE p.room_id = ? ORDER BY u.username",
    )
    .bind(room_id)
    .fetch_all(pool)
    .await
}
