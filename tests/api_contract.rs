use chino::{
    build_router,
    config::{ChatConfig, RuntimeConfiguration, StoreConfig},
    state::ChinoState,
    store::StudentStore,
};
use serde_json::{Value, json};
use std::{net::SocketAddr, time::Duration};
use tempfile::TempDir;

async fn spawn_app(dir: &TempDir) -> SocketAddr {
    let config = RuntimeConfiguration::from_parts(
        StoreConfig {
            path: dir.path().join("students.json"),
        },
        ChatConfig {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(1),
        },
    );
    let state = ChinoState::new(&config).expect("state");
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });

    addr
}

fn chelsea() -> Value {
    json!({
        "studentId": "BP-113-00001",
        "fullName": "Chelsea Greer",
        "gender": "Female",
        "gmail": "chelseagreer@gmail.com",
        "program": "BS Physics",
        "yearLevel": "5th Year",
        "university": "Caraga State University"
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_app(&dir).await;

    let body: Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn listing_seeds_the_store_on_first_use() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_app(&dir).await;

    let first: Vec<Value> = reqwest::get(format!("http://{addr}/students"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first.len(), StudentStore::seed_students().unwrap().len());

    let second: Vec<Value> = reqwest::get(format!("http://{addr}/students"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn create_then_list_includes_the_record_exactly_once() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_app(&dir).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/students"))
        .json(&chelsea())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let stored: Value = response.json().await.unwrap();
    assert_eq!(stored, chelsea());

    let students: Vec<Value> = reqwest::get(format!("http://{addr}/students"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let matches = students
        .iter()
        .filter(|student| student["studentId"] == "BP-113-00001")
        .count();
    assert_eq!(matches, 1);
}

#[tokio::test]
async fn duplicate_create_conflicts_and_leaves_the_collection_unchanged() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_app(&dir).await;
    let client = reqwest::Client::new();

    let first = client
        .post(format!("http://{addr}/students"))
        .json(&chelsea())
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 201);

    let before: Vec<Value> = reqwest::get(format!("http://{addr}/students"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let second = client
        .post(format!("http://{addr}/students"))
        .json(&chelsea())
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 409);
    let body: Value = second.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("BP-113-00001"));

    let after: Vec<Value> = reqwest::get(format!("http://{addr}/students"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn invalid_fields_are_rejected_by_name() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_app(&dir).await;
    let client = reqwest::Client::new();

    let mut bad_year = chelsea();
    bad_year["yearLevel"] = json!("five");

    let response = client
        .post(format!("http://{addr}/students"))
        .json(&bad_year)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("yearLevel"));

    let mut missing_program = chelsea();
    missing_program.as_object_mut().unwrap().remove("program");

    let response = client
        .post(format!("http://{addr}/students"))
        .json(&missing_program)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("program"));
}

#[tokio::test]
async fn delete_returns_the_removed_record_then_404s() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_app(&dir).await;
    let client = reqwest::Client::new();

    client
        .post(format!("http://{addr}/students"))
        .json(&chelsea())
        .send()
        .await
        .unwrap();

    let response = client
        .delete(format!("http://{addr}/students/BP-113-00001"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let removed: Value = response.json().await.unwrap();
    assert_eq!(removed, chelsea());

    let response = client
        .delete(format!("http://{addr}/students/BP-113-00001"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn chat_without_a_credential_is_a_server_error() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_app(&dir).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/chat"))
        .json(&json!({"message": "who studies physics?"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("credential"));
}

#[tokio::test]
async fn chat_without_a_message_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_app(&dir).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/chat"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
