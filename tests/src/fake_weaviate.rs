//! A Weaviate stand-in covering `/v1/schema`, `/v1/batch/objects` and `/v1/graphql`.
//!
//! The GraphQL handler understands only the `where` equality filter and the
//! `limit` argument; every stored object matches the concepts.

use crate::spawn_server;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "weaviate-test-key";
pub const OPENAI_KEY: &str = "sk-forwarded";

#[derive(Default)]
pub struct Recorded {
    pub classes: Vec<Value>,
    pub batches: Vec<Vec<Value>>,
    pub queries: Vec<String>,
    pub openai_headers: Vec<String>,
}

type Shared = Arc<Mutex<Recorded>>;

pub struct FakeWeaviate {
    pub base_url: String,
    recorded: Shared,
}

impl FakeWeaviate {
    pub async fn start() -> Self {
        let recorded: Shared = Arc::default();
        let router = Router::new()
            .route("/v1/schema", post(create_class))
            .route("/v1/batch/objects", post(batch_objects))
            .route("/v1/graphql", post(graphql))
            .with_state(recorded.clone());
        let base_url = spawn_server(router).await;
        Self { base_url, recorded }
    }

    pub fn batches(&self) -> Vec<Vec<Value>> {
        self.recorded.lock().unwrap().batches.clone()
    }

    pub fn classes(&self) -> Vec<Value> {
        self.recorded.lock().unwrap().classes.clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.recorded.lock().unwrap().queries.clone()
    }

    pub fn openai_headers(&self) -> Vec<String> {
        self.recorded.lock().unwrap().openai_headers.clone()
    }
}

fn authorized(headers: &HeaderMap, recorded: &Shared) -> bool {
    if let Some(key) = headers.get("x-openai-api-key").and_then(|v| v.to_str().ok()) {
        recorded.lock().unwrap().openai_headers.push(key.to_string());
    }
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == format!("Bearer {API_KEY}"))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"code": 401, "message": "anonymous access not enabled"})),
    )
}

async fn create_class(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Json(class): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers, &recorded) {
        return unauthorized();
    }
    let mut state = recorded.lock().unwrap();
    if state.classes.iter().any(|c| c["class"] == class["class"]) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": [{"message": format!("class name {} already exists", class["class"])}]})),
        );
    }
    state.classes.push(class.clone());
    let mut echoed = class;
    echoed["invertedIndexConfig"] = json!({"bm25": {"b": 0.75, "k1": 1.2}});
    echoed["properties"] = json!([]);
    (StatusCode::OK, Json(echoed))
}

async fn batch_objects(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers, &recorded) {
        return unauthorized();
    }
    let objects = body["objects"].as_array().cloned().unwrap_or_default();
    let mut state = recorded.lock().unwrap();
    let offset: usize = state.batches.iter().map(Vec::len).sum();
    let response: Vec<Value> = objects
        .iter()
        .enumerate()
        .map(|(i, object)| {
            let result = if object["properties"]["answer"] == "REJECT" {
                json!({"errors": {"error": [{"message": "vectorizer failed"}]}})
            } else {
                json!({})
            };
            json!({
                "class": object["class"],
                "properties": object["properties"],
                "id": format!("00000000-0000-0000-0000-{:012}", offset + i),
                "result": result
            })
        })
        .collect();
    state.batches.push(objects);
    (StatusCode::OK, Json(Value::Array(response)))
}

/// Reads the JSON string literal that follows `marker`.
fn string_after(query: &str, marker: &str) -> Option<String> {
    let start = query.find(marker)? + marker.len();
    serde_json::Deserializer::from_str(&query[start..])
        .into_iter::<String>()
        .next()?
        .ok()
}

fn limit_in(query: &str) -> Option<usize> {
    let start = query.find("limit: ")? + "limit: ".len();
    let digits: String = query[start..].chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

async fn graphql(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers, &recorded) {
        return unauthorized();
    }
    let query = body["query"].as_str().unwrap_or_default().to_string();
    let mut state = recorded.lock().unwrap();
    state.queries.push(query.clone());

    if !query.contains("Get { Question(") {
        return (
            StatusCode::OK,
            Json(json!({"data": {"Get": null}, "errors": [{"message": "Cannot query field on type GetObjectsObj"}]})),
        );
    }

    let category = string_after(&query, "valueText: ");
    let limit = limit_in(&query).unwrap_or(usize::MAX);
    let hits: Vec<Value> = state
        .batches
        .iter()
        .flatten()
        .map(|object| object["properties"].clone())
        .filter(|props| {
            category
                .as_ref()
                .map_or(true, |c| props["category"].as_str() == Some(c.as_str()))
        })
        .take(limit)
        .collect();
    (
        StatusCode::OK,
        Json(json!({"data": {"Get": {"Question": hits}}})),
    )
}
