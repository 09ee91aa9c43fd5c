//! Stub catalog backend for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use catalog_taxonomy::models::config::ServerConfig;
use catalog_taxonomy::repository::http::HttpRepository;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// How the stub serves the "available parents" route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentsRoute {
    Present,
    /// 404 with an Express-style body, as if the route was never deployed.
    Absent,
    /// Answers after the client timeout has elapsed.
    Slow,
}

/// In-memory state of the stub backend.
pub struct StubState {
    pub records: Mutex<Vec<Value>>,
    pub parents_route: ParentsRoute,
    /// Include `parentId` in create/update echoes.
    pub echo_parent: bool,
    /// Paths hit so far, in request order.
    pub requests: Mutex<Vec<String>>,
}

impl StubState {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Mutex::new(records),
            parents_route: ParentsRoute::Present,
            echo_parent: true,
            requests: Mutex::new(vec![]),
        }
    }

    pub fn parents_route(mut self, route: ParentsRoute) -> Self {
        self.parents_route = route;
        self
    }

    pub fn omit_parent_in_echo(mut self) -> Self {
        self.echo_parent = false;
        self
    }

    fn record_request(&self, path: &str) {
        self.requests.lock().unwrap().push(path.to_string());
    }
}

fn category_of(record: &Value) -> Option<i64> {
    record["categoryId"]
        .as_i64()
        .or_else(|| record["category"]["id"].as_i64())
}

fn parent_of(record: &Value) -> Option<i64> {
    record["parentId"]
        .as_i64()
        .or_else(|| record["parent"]["id"].as_i64())
}

fn requested_category(params: &HashMap<String, String>) -> Option<i64> {
    params.get("categoryId").and_then(|v| v.parse().ok())
}

async fn list_categories(State(state): State<Arc<StubState>>) -> Json<Value> {
    state.record_request("/categories");
    Json(json!({
        "data": [
            {"id": 7, "name": "Sunglasses"},
            {"_id": 8, "title": "Watches"}
        ]
    }))
}

async fn list_subcategories(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record_request("/subcategories");
    let category = requested_category(&params);
    let records: Vec<Value> = state
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|r| category.is_none() || category_of(r) == category)
        .cloned()
        .collect();
    Json(Value::Array(records))
}

async fn available_parents(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.record_request("/subcategories/available-parents");
    match state.parents_route {
        ParentsRoute::Absent => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "Cannot GET /api/subcategories/available-parents"})),
            )
                .into_response();
        }
        ParentsRoute::Slow => tokio::time::sleep(Duration::from_secs(3)).await,
        ParentsRoute::Present => {}
    }

    let category = requested_category(&params);
    let exclude: Option<i64> = params.get("excludeId").and_then(|v| v.parse().ok());
    let parents: Vec<Value> = state
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|r| category_of(r) == category && parent_of(r).is_none())
        .filter(|r| exclude.is_none() || r["id"].as_i64() != exclude)
        .cloned()
        .collect();
    Json(json!({ "parents": parents })).into_response()
}

fn sibling_clash(records: &[Value], body: &Value, editing: Option<i64>) -> bool {
    records.iter().any(|r| {
        r["id"].as_i64() != editing
            && category_of(r) == category_of(body)
            && parent_of(r) == parent_of(body)
            && (r["name"] == body["name"] || r["slug"] == body["slug"])
    })
}

fn echo(state: &StubState, mut record: Value) -> Json<Value> {
    if !state.echo_parent {
        if let Some(object) = record.as_object_mut() {
            object.remove("parentId");
        }
    }
    Json(json!({ "data": record }))
}

fn conflict() -> Response {
    (
        StatusCode::CONFLICT,
        Json(json!({"message": "Subcategory with this name already exists under this parent"})),
    )
        .into_response()
}

async fn create_subcategory(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    state.record_request("POST /subcategories");
    let mut records = state.records.lock().unwrap();
    if sibling_clash(&records, &body, None) {
        return conflict();
    }

    let id = records
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let mut record = body;
    record["id"] = json!(id);
    records.push(record.clone());
    drop(records);

    (StatusCode::CREATED, echo(&state, record)).into_response()
}

async fn update_subcategory(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    state.record_request("PUT /subcategories");
    let mut records = state.records.lock().unwrap();
    if sibling_clash(&records, &body, Some(id)) {
        return conflict();
    }

    let Some(existing) = records.iter_mut().find(|r| r["id"].as_i64() == Some(id)) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "subcategory not found"})),
        )
            .into_response();
    };
    let mut record = body;
    record["id"] = json!(id);
    *existing = record.clone();
    drop(records);

    echo(&state, record).into_response()
}

/// Running stub backend.
pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubBackend {
    pub async fn spawn(state: StubState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/api/categories", get(list_categories))
            .route(
                "/api/subcategories",
                get(list_subcategories).post(create_subcategory),
            )
            .route(
                "/api/subcategories/available-parents",
                get(available_parents),
            )
            .route("/api/subcategories/{id}", put(update_subcategory))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let address = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Stub backend crashed");
        });

        Self {
            base_url: format!("http://{address}/api"),
            state,
        }
    }

    /// Repository pointed at this backend with a one second timeout.
    pub fn repository(&self) -> HttpRepository {
        let config = ServerConfig::from_yaml_str(&format!(
            "api_base_url: {}\nrequest_timeout_secs: 1\n",
            self.base_url
        ))
        .expect("valid stub configuration");
        HttpRepository::new(&config).expect("Failed to build repository")
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<Value> {
        self.state.records.lock().unwrap().clone()
    }
}

/// Sunglasses (7) has "Sun" with a nested "Polarized"; Watches (8) has "Other".
pub fn sunglasses_catalog() -> Vec<Value> {
    vec![
        json!({"id": 10, "categoryId": 7, "parentId": null, "name": "Sun", "slug": "sun"}),
        json!({"id": 11, "categoryId": 7, "parentId": 10, "name": "Polarized", "slug": "polarized"}),
        json!({"id": 12, "categoryId": 8, "parentId": null, "name": "Other", "slug": "other"}),
    ]
}
