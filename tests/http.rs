use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use campfire::{db, store, AppState};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower::ServiceExt;

fn temp_static_dir() -> PathBuf {
    std::env::temp_dir().join(format!("campfire-test-{}", uuid::Uuid::now_v7()))
}

async fn app() -> (Router, SqlitePool) {
    app_with_static(temp_static_dir()).await
}

async fn app_with_static(static_dir: PathBuf) -> (Router, SqlitePool) {
    let db_pool = db::connect("sqlite::memory:").await.unwrap();
    db::migrate(&db_pool).await.unwrap();
    let router = campfire::router(AppState {
        db_pool: db_pool.clone(),
        static_dir,
    });
    (router, db_pool)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, String) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_owned);
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8_lossy(&bytes).into_owned();
    (status, cookie, location.unwrap_or(body))
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

const BOUNDARY: &str = "campfire-test-boundary";

fn multipart_form(
    fields: &[(&str, &str)],
    avatar: Option<(&str, &str)>,
    cookie: &str,
) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    if let Some((file_name, bytes)) = avatar {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"avatar\"; \
             filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n{bytes}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/update-user/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .unwrap()
}

/// Registers a user and returns their session cookie.
async fn register(app: &Router, username: &str) -> String {
    let body = format!(
        "name={username}&username={username}&email={username}%40example.com\
         &password1=hunter2hunter2&password2=hunter2hunter2"
    );
    let (status, cookie, location) = send(app, post_form("/register/", &body, None)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");
    cookie.expect("registration should establish a session")
}

async fn create_room(app: &Router, cookie: &str, name: &str, topic: &str, desc: &str) {
    let body = format!("name={name}&topic={topic}&description={desc}");
    let (status, _, location) = send(app, post_form("/create-room/", &body, Some(cookie))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");
}

#[tokio::test]
async fn register_establishes_a_session() {
    let (app, _pool) = app().await;
    let cookie = register(&app, "ada").await;

    let (status, _, body) = send(&app, get("/", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ada"));
    assert!(body.contains("/logout/"));
}

#[tokio::test]
async fn register_rejects_taken_username() {
    let (app, _pool) = app().await;
    register(&app, "ada").await;

    let body = "name=Imposter&username=ada&email=imposter%40example.com\
                &password1=hunter2hunter2&password2=hunter2hunter2";
    let (status, _, page) = send(&app, post_form("/register/", body, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("already taken"));
}

#[tokio::test]
async fn login_with_unknown_email_shows_both_notices() {
    let (app, _pool) = app().await;

    let (status, _, page) = send(
        &app,
        post_form("/login/", "email=ghost%40example.com&password=whatever", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("User does not exist."));
    assert!(page.contains("Username or Password does not match"));
}

#[tokio::test]
async fn login_round_trip() {
    let (app, _pool) = app().await;
    register(&app, "ada").await;

    let (status, _, page) = send(
        &app,
        post_form("/login/", "email=ada%40example.com&password=wrong-password", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Username or Password does not match"));
    assert!(!page.contains("User does not exist."));

    let (status, cookie, location) = send(
        &app,
        post_form(
            "/login/",
            "email=Ada%40Example.com&password=hunter2hunter2",
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");
    assert!(cookie.is_some());
}

#[tokio::test]
async fn logout_clears_the_session() {
    let (app, _pool) = app().await;
    let cookie = register(&app, "ada").await;

    let (status, _, location) = send(&app, get("/logout/", Some(&cookie))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");

    let (_, _, body) = send(&app, get("/", Some(&cookie))).await;
    assert!(body.contains("/login/"));
}

#[tokio::test]
async fn gated_routes_redirect_anonymous_visitors_to_login() {
    let (app, _pool) = app().await;

    for uri in ["/create-room/", "/update-user/"] {
        let (status, _, location) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location, "/login/", "{uri}");
    }
}

#[tokio::test]
async fn create_room_reuses_the_topic() {
    let (app, pool) = app().await;
    let cookie = register(&app, "ada").await;

    create_room(&app, &cookie, "vinyl+corner", "Music", "all+about+records").await;
    create_room(&app, &cookie, "sheet+swap", "Music", "").await;

    let topics = store::topics::search(&pool, "", None).await.unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].name, "Music");
    assert_eq!(topics[0].room_count, 2);
}

#[tokio::test]
async fn home_search_filters_rooms() {
    let (app, _pool) = app().await;
    let cookie = register(&app, "ada").await;
    create_room(&app, &cookie, "lab+notes", "Science", "").await;
    create_room(&app, &cookie, "knife+skills", "Cooking", "chopping").await;

    let (_, _, everything) = send(&app, get("/", None)).await;
    assert!(everything.contains("lab notes"));
    assert!(everything.contains("knife skills"));
    assert!(everything.contains("2 rooms"));

    let (_, _, filtered) = send(&app, get("/?q=science", None)).await;
    assert!(filtered.contains("lab notes"));
    assert!(!filtered.contains("knife skills"));
    assert!(filtered.contains("1 rooms"));
}

#[tokio::test]
async fn topics_page_filters_by_query() {
    let (app, _pool) = app().await;
    let cookie = register(&app, "ada").await;
    create_room(&app, &cookie, "lab+notes", "Science", "").await;
    create_room(&app, &cookie, "vinyl+corner", "Music", "").await;

    let (_, _, every) = send(&app, get("/topics/", None)).await;
    assert!(every.contains("Science"));
    assert!(every.contains("Music"));

    let (_, _, filtered) = send(&app, get("/topics/?q=science", None)).await;
    assert!(filtered.contains("Science"));
    assert!(!filtered.contains("Music"));
}

#[tokio::test]
async fn posting_joins_the_room_once() {
    let (app, pool) = app().await;
    let cookie = register(&app, "ada").await;
    create_room(&app, &cookie, "lab+notes", "Science", "").await;
    let room_id = store::rooms::search(&pool, "").await.unwrap()[0].id.clone();

    // anonymous posters get bounced to login
    let (status, _, location) =
        send(&app, post_form(&format!("/room/{room_id}/"), "body=hi", None)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/login/");

    for body in ["body=first", "body=second"] {
        let (status, _, location) =
            send(&app, post_form(&format!("/room/{room_id}/"), body, Some(&cookie))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, format!("/room/{room_id}/"));
    }

    // a blank composer submit redirects without storing anything
    let (status, _, location) =
        send(&app, post_form(&format!("/room/{room_id}/"), "body=+++", Some(&cookie))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, format!("/room/{room_id}/"));

    assert_eq!(store::messages::in_room(&pool, &room_id).await.unwrap().len(), 2);
    assert_eq!(store::participants::in_room(&pool, &room_id).await.unwrap().len(), 1);

    let (_, _, page) = send(&app, get(&format!("/room/{room_id}/"), None)).await;
    assert!(page.contains("first"));
    assert!(page.contains("second"));
}

#[tokio::test]
async fn only_the_host_may_update_or_delete_a_room() {
    let (app, pool) = app().await;
    let host = register(&app, "ada").await;
    let guest = register(&app, "grace").await;
    create_room(&app, &host, "lab+notes", "Science", "").await;
    let room_id = store::rooms::search(&pool, "").await.unwrap()[0].id.clone();

    for uri in [
        format!("/update-room/{room_id}/"),
        format!("/delete-room/{room_id}/"),
    ] {
        let (status, _, page) = send(&app, get(&uri, Some(&guest))).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(page, "You are not allowed here!!", "{uri}");

        let (status, _, location) = send(&app, get(&uri, None)).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location, "/login/", "{uri}");
    }

    let (status, _, page) = send(&app, get(&format!("/update-room/{room_id}/"), Some(&host))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("lab notes"));
}

#[tokio::test]
async fn host_updates_room_name_and_topic() {
    let (app, pool) = app().await;
    let host = register(&app, "ada").await;
    create_room(&app, &host, "lab+notes", "Science", "").await;
    let room_id = store::rooms::search(&pool, "").await.unwrap()[0].id.clone();

    let (status, _, location) = send(
        &app,
        post_form(
            &format!("/update-room/{room_id}/"),
            "name=field+notes&topic=Biology&description=outdoors",
            Some(&host),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");

    let room = store::rooms::find(&pool, &room_id).await.unwrap().unwrap();
    assert_eq!(room.name, "field notes");
    assert_eq!(room.description, "outdoors");
    let topics = store::topics::search(&pool, "Biology", None).await.unwrap();
    assert_eq!(topics.len(), 1);
}

#[tokio::test]
async fn deleting_a_room_removes_its_messages() {
    let (app, pool) = app().await;
    let host = register(&app, "ada").await;
    create_room(&app, &host, "lab+notes", "Science", "").await;
    let room_id = store::rooms::search(&pool, "").await.unwrap()[0].id.clone();
    send(&app, post_form(&format!("/room/{room_id}/"), "body=hi", Some(&host))).await;

    // GET is the confirmation page, POST commits
    let (status, _, page) = send(&app, get(&format!("/delete-room/{room_id}/"), Some(&host))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("lab notes"));

    let (status, _, location) =
        send(&app, post_form(&format!("/delete-room/{room_id}/"), "", Some(&host))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");

    assert!(store::rooms::find(&pool, &room_id).await.unwrap().is_none());
    assert!(store::messages::in_room(&pool, &room_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn only_the_author_may_delete_a_message() {
    let (app, pool) = app().await;
    let host = register(&app, "ada").await;
    let guest = register(&app, "grace").await;
    create_room(&app, &host, "lab+notes", "Science", "").await;
    let room_id = store::rooms::search(&pool, "").await.unwrap()[0].id.clone();
    send(&app, post_form(&format!("/room/{room_id}/"), "body=mine", Some(&host))).await;
    let message_id = store::messages::in_room(&pool, &room_id).await.unwrap()[0].id.clone();

    let (status, _, page) =
        send(&app, get(&format!("/delete-message/{message_id}/"), Some(&guest))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page, "You are not allowed here!!");

    let (status, _, location) = send(
        &app,
        post_form(&format!("/delete-message/{message_id}/"), "", Some(&host)),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");
    assert!(store::messages::find(&pool, &message_id).await.unwrap().is_none());
}

#[tokio::test]
async fn profile_page_lists_hosted_rooms_and_messages() {
    let (app, pool) = app().await;
    let cookie = register(&app, "ada").await;
    create_room(&app, &cookie, "lab+notes", "Science", "").await;
    let room_id = store::rooms::search(&pool, "").await.unwrap()[0].id.clone();
    send(&app, post_form(&format!("/room/{room_id}/"), "body=welcome", Some(&cookie))).await;
    let user_id = store::rooms::search(&pool, "").await.unwrap()[0].host_id.clone();

    let (status, _, page) = send(&app, get(&format!("/profile/{user_id}/"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("@ada"));
    assert!(page.contains("lab notes"));
    assert!(page.contains("welcome"));
}

#[tokio::test]
async fn activity_page_lists_messages_newest_first() {
    let (app, pool) = app().await;
    let cookie = register(&app, "ada").await;
    create_room(&app, &cookie, "lab+notes", "Science", "").await;
    let room_id = store::rooms::search(&pool, "").await.unwrap()[0].id.clone();
    send(&app, post_form(&format!("/room/{room_id}/"), "body=older", Some(&cookie))).await;
    send(&app, post_form(&format!("/room/{room_id}/"), "body=newer", Some(&cookie))).await;

    let (status, _, page) = send(&app, get("/activity/", None)).await;
    assert_eq!(status, StatusCode::OK);
    let newer = page.find("newer").unwrap();
    let older = page.find("older").unwrap();
    assert!(newer < older);
}

#[tokio::test]
async fn missing_ids_render_not_found() {
    let (app, _pool) = app().await;
    let ghost = uuid::Uuid::now_v7();

    let (status, _, _) = send(&app, get(&format!("/room/{ghost}/"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, get(&format!("/profile/{ghost}/"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_persists_profile_fields_and_avatar() {
    let static_dir = temp_static_dir();
    let (app, pool) = app_with_static(static_dir.clone()).await;
    let cookie = register(&app, "ada").await;

    let req = multipart_form(
        &[
            ("name", "Ada Lovelace"),
            ("username", "ada"),
            ("email", "ada@example.com"),
            ("bio", "first programmer"),
        ],
        Some(("me.png", "not-really-a-png")),
        &cookie,
    );
    let (status, _, location) = send(&app, req).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.starts_with("/profile/"));

    let user = store::users::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.bio, "first programmer");
    assert_eq!(user.avatar, format!("/static/avatars/{}.png", user.id));
    assert!(static_dir.join("avatars").join(format!("{}.png", user.id)).exists());
}

#[tokio::test]
async fn rejected_profile_update_does_not_write_the_avatar() {
    let static_dir = temp_static_dir();
    let (app, pool) = app_with_static(static_dir.clone()).await;
    register(&app, "ada").await;
    let grace = register(&app, "grace").await;

    let req = multipart_form(
        &[
            ("name", "Grace"),
            ("username", "ada"),
            ("email", "grace@example.com"),
            ("bio", ""),
        ],
        Some(("me.png", "not-really-a-png")),
        &grace,
    );
    let (status, _, page) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("already taken"));

    let user = store::users::find_by_email(&pool, "grace@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.username, "grace");
    assert!(!static_dir.join("avatars").join(format!("{}.png", user.id)).exists());
}
