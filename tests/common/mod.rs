#![allow(dead_code)]

use axum_test::TestServer;
use pageknock::application::services::CommentSettings;
use pageknock::infrastructure::Repositories;
use pageknock::infrastructure::memory::MemoryStore;
use pageknock::routes::base_router;
use pageknock::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;

pub fn create_test_state(settings: CommentSettings) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(Repositories::memory(store.clone()), settings, true);

    (state, store)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    create_test_server_with(CommentSettings::default())
}

pub fn create_test_server_with(settings: CommentSettings) -> (TestServer, Arc<MemoryStore>) {
    let (state, store) = create_test_state(settings);
    let server = TestServer::new(base_router(state)).unwrap();

    (server, store)
}

pub async fn post_comment(server: &TestServer, url: &str, comment: &str) -> Value {
    let response = server
        .post("/comment")
        .json(&json!({ "url": url, "comment": comment }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}
