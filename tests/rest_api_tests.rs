//! End-to-end tests exercising the HTTP surface
//!
//! Every test spins up a fresh in-memory server and drives it the way a
//! client would, checking status codes and response bodies.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use quill::server::{AppState, build_router};
use quill::store::MemoryStore;

fn server() -> TestServer {
    let app = build_router(AppState::new(MemoryStore::new()));
    TestServer::new(app)
}

async fn create_user(server: &TestServer, email: &str, username: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({
            "email": email,
            "username": username,
            "password": "hunter2hunter2",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn create_post(server: &TestServer, user_id: i64, title: &str) -> Value {
    let response = server
        .post("/posts")
        .json(&json!({
            "title": title,
            "content": "body",
            "user_id": user_id,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn user_creation_returns_201_without_the_password_hash() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;

    assert_eq!(user["id"], 1);
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["is_active"], true);
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn duplicate_user_is_409_with_a_stable_error_code() {
    let server = server();
    create_user(&server, "a@x.com", "alice").await;

    let response = server
        .post("/users")
        .json(&json!({
            "email": "a@x.com",
            "username": "someone-else",
            "password": "hunter2hunter2",
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let body = response.json::<Value>();
    assert_eq!(body["code"], "CONFLICT");
    assert!(body["message"].as_str().unwrap().contains("a@x.com"));
}

#[tokio::test]
async fn malformed_email_is_422() {
    let server = server();
    let response = server
        .post("/users")
        .json(&json!({
            "email": "not-an-email",
            "username": "alice",
            "password": "hunter2hunter2",
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn missing_records_are_404() {
    let server = server();
    let response = server.get("/users/99").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body = response.json::<Value>();
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "User with id 99 not found");
}

#[tokio::test]
async fn deleting_a_user_cascades_over_http() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;
    let user_id = user["id"].as_i64().unwrap();
    let post = create_post(&server, user_id, "T").await;
    let post_id = post["id"].as_i64().unwrap();

    let response = server.delete(&format!("/users/{user_id}")).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/posts/{post_id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_detail_embeds_author_and_categories() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;
    let user_id = user["id"].as_i64().unwrap();
    let post = create_post(&server, user_id, "T").await;
    let post_id = post["id"].as_i64().unwrap();

    let response = server
        .post("/categories")
        .json(&json!({ "name": "rust" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let category_id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = server
        .post(&format!("/posts/{post_id}/categories/{category_id}"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let detail = server.get(&format!("/posts/{post_id}")).await.json::<Value>();
    assert_eq!(detail["author"]["username"], "alice");
    assert_eq!(detail["categories"][0]["name"], "rust");

    // Pairing the same category twice is a conflict.
    let response = server
        .post(&format!("/posts/{post_id}/categories/{category_id}"))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn comment_replies_flow_through_the_nested_route() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;
    let user_id = user["id"].as_i64().unwrap();
    let post = create_post(&server, user_id, "T").await;
    let post_id = post["id"].as_i64().unwrap();

    let response = server
        .post("/comments")
        .json(&json!({
            "content": "root",
            "user_id": user_id,
            "post_id": post_id,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let root_id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = server
        .post(&format!("/comments/{root_id}/replies"))
        .json(&json!({ "content": "child", "user_id": user_id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let reply = response.json::<Value>();
    assert_eq!(reply["parent_id"].as_i64(), Some(root_id));
    assert_eq!(reply["post_id"].as_i64(), Some(post_id));

    let replies = server
        .get(&format!("/comments/{root_id}/replies"))
        .await
        .json::<Value>();
    assert_eq!(replies.as_array().unwrap().len(), 1);

    // Replying to a comment that does not exist is a 404.
    let response = server
        .post("/comments/999/replies")
        .json(&json!({ "content": "orphan", "user_id": user_id }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn role_assignment_roundtrip() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;
    let user_id = user["id"].as_i64().unwrap();

    let response = server
        .post("/roles")
        .json(&json!({ "name": "admin" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let role_id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = server
        .post(&format!("/roles/{role_id}/users/{user_id}"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let detail = server.get(&format!("/roles/{role_id}")).await.json::<Value>();
    assert_eq!(detail["users"][0]["username"], "alice");

    let roles = server
        .get(&format!("/users/{user_id}/roles"))
        .await
        .json::<Value>();
    assert_eq!(roles[0]["name"], "admin");

    let response = server
        .delete(&format!("/roles/{role_id}/users/{user_id}"))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    // Removal is idempotent at the HTTP level too.
    let response = server
        .delete(&format!("/roles/{role_id}/users/{user_id}"))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn pagination_is_honoured_on_list_routes() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;
    let user_id = user["id"].as_i64().unwrap();
    for n in 0..5 {
        create_post(&server, user_id, &format!("post {n}")).await;
    }

    let page = server.get("/posts?skip=2&limit=2").await.json::<Value>();
    let titles: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["post 2", "post 3"]);
}

#[tokio::test]
async fn search_route_filters_by_term() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;
    let user_id = user["id"].as_i64().unwrap();
    create_post(&server, user_id, "Rust patterns").await;
    create_post(&server, user_id, "Garden notes").await;

    let hits = server.get("/posts/search?q=rust").await.json::<Value>();
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["title"], "Rust patterns");
}

#[tokio::test]
async fn profile_routes_by_user_and_username() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;
    let user_id = user["id"].as_i64().unwrap();

    let response = server
        .post("/profiles")
        .json(&json!({
            "user_id": user_id,
            "bio": "writer",
            "location": "Lisbon",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let profile = server
        .get(&format!("/profiles/users/{user_id}"))
        .await
        .json::<Value>();
    assert_eq!(profile["bio"], "writer");

    let by_username = server
        .get("/profiles/username/alice")
        .await
        .json::<Value>();
    assert_eq!(by_username["user_id"].as_i64(), Some(user_id));

    let response = server
        .put(&format!("/profiles/users/{user_id}"))
        .json(&json!({ "bio": "novelist" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["bio"], "novelist");

    // A second profile for the same user conflicts.
    let response = server
        .post("/profiles")
        .json(&json!({ "user_id": user_id }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn deactivation_routes_flip_the_active_flag() {
    let server = server();
    let user = create_user(&server, "a@x.com", "alice").await;
    let user_id = user["id"].as_i64().unwrap();

    let response = server.post(&format!("/users/{user_id}/deactivate")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["is_active"], false);

    let active = server.get("/users/active").await.json::<Value>();
    assert!(active.as_array().unwrap().is_empty());

    let response = server.post(&format!("/users/{user_id}/activate")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["is_active"], true);
}
