use sqlx::SqlitePool;
use uuid::Uuid;

use crate::forms::ProfileFields;
use crate::models::User;

pub struct NewUser<'a> {
    pub name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

pub async fn create(pool: &SqlitePool, new: NewUser<'_>) -> sqlx::Result<User> {
    let id = Uuid::now_v7().to_string();
    sqlx::query(
        "INSERT INTO users (id, email, username, name, password_hash) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(new.email)
    .bind(new.username)
    .bind(new.name)
    .bind(new.password_hash)
    .execute(pool)
    .await?;

    tracing::info!(username = new.username, "registered user");
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(pool)
        .await
}

pub async fn find(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn username_taken(pool: &SqlitePool, username: &str) -> sqlx::Result<bool> {
    Ok(sqlx::query("SELECT 1 FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?
        .is_some())
}

pub async fn email_taken(pool: &SqlitePool, email: &str) -> sqlx::Result<bool> {
    Ok(sqlx::query("SELECT 1 FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?
        .is_some())
}

pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    fields: &ProfileFields,
    avatar: Option<&str>,
) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE users SET name = ?, username = ?, email = ?, bio = ?, \
         avatar = COALESCE(?, avatar) WHERE id = ?",
    )
    .bind(&fields.name)
    .bind(&fields.username)
    .bind(&fields.email)
    .bind(&fields.bio)
    .bind(avatar)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
