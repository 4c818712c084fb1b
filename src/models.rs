use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

/// Topic joined with how many rooms carry it.
#[derive(Debug, Clone, FromRow)]
pub struct TopicItem {
    pub id: String,
    pub name: String,
    pub room_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: String,
    pub host_id: String,
    pub topic_id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

/// Room joined with its topic and host for listing pages.
#[derive(Debug, Clone, FromRow)]
pub struct RoomItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub topic_name: String,
    pub host_id: String,
    pub host_username: String,
    pub created_at: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub body: String,
    pub created_at: String,
}

/// Message joined with its author and room for listing pages.
#[derive(Debug, Clone, FromRow)]
pub struct MessageItem {
    pub id: String,
    pub body: String,
    pub created_at: String,
    pub user_id: String,
    pub username: String,
    pub room_id: String,
    pub room_name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ParticipantItem {
    pub user_id: String,
    pub username: String,
}
