use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use picture_api::{StatusMode, api, common::AppState, db::PictureStore};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a store seeded from `seed`, backed by a file in a temp dir.
#[allow(dead_code)]
pub struct TestSetup {
    pub router: Router,
    pub store: PictureStore,
    pub data_file: PathBuf,
    // keeps the backing file alive for the duration of the test
    dir: TempDir,
}

#[allow(dead_code)]
impl TestSetup {
    pub fn new(seed: Value) -> Self {
        Self::with_mode(seed, StatusMode::Legacy)
    }

    pub fn with_mode(seed: Value, status_mode: StatusMode) -> Self {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_file = dir.path().join("pictures.json");
        std::fs::write(&data_file, seed.to_string()).expect("Failed to seed data file");

        let store = PictureStore::load(&data_file).expect("Failed to load store");
        let router = api::app(AppState {
            store: store.clone(),
            status_mode,
        });

        Self {
            router,
            store,
            data_file,
            dir,
        }
    }

    pub async fn send(&self, method: &str, route: &str, body: Option<&str>) -> Response {
        let builder = Request::builder().uri(route).method(method);
        let request = match body {
            Some(b) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(b.to_owned())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, route: &str) -> (StatusCode, Value) {
        let response = self.send("GET", route, None).await;
        (response.status(), parse_body(response).await)
    }

    pub async fn post(&self, route: &str, payload: Value) -> (StatusCode, Value) {
        let response = self.send("POST", route, Some(&payload.to_string())).await;
        (response.status(), parse_body(response).await)
    }

    pub async fn put(&self, route: &str, payload: Value) -> (StatusCode, Value) {
        let response = self.send("PUT", route, Some(&payload.to_string())).await;
        (response.status(), parse_body(response).await)
    }

    pub async fn delete(&self, route: &str) -> (StatusCode, Vec<u8>) {
        let response = self.send("DELETE", route, None).await;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        (status, body.to_vec())
    }

    /// Delete the directory holding the backing file so every later write fails.
    pub fn remove_data_dir(&self) {
        std::fs::remove_dir_all(self.dir.path()).expect("Failed to remove data dir");
    }

    /// The backing file as it currently is on disk.
    pub fn on_disk(&self) -> Value {
        let raw = std::fs::read_to_string(&self.data_file).expect("Failed to read data file");
        serde_json::from_str(&raw).expect("Data file is not JSON")
    }
}

pub async fn parse_body(response: Response) -> Value {
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&body).expect("Body is not JSON")
}
