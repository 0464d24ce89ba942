//! In-process fake of the school API for integration tests.
//!
//! Serves the endpoints the pages use from memory on `127.0.0.1:0` and
//! records every request it sees (method, path, query, bearer header).

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aula::aula_auth::{SessionStore, User};
use aula::aula_config::{ApiConfig, AppConfig, QueryConfig};
use aula::state::AppState;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use fake::Fake as _;
use fake::faker::name::en::{FirstName, LastName};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const VALID_TOKEN: &str = "valid-token";
pub const EXPIRED_TOKEN: &str = "expired-token";
pub const PASSWORD: &str = "secret123";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct FakeData {
    pub requests: Vec<RecordedRequest>,
    pub students: Vec<Value>,
    pub justifications: Vec<Value>,
    /// Artificial latency per path.
    pub delays: HashMap<String, Duration>,
}

#[derive(Clone, Default)]
pub struct Fake {
    data: Arc<Mutex<FakeData>>,
}

impl Fake {
    pub fn with<R>(&self, f: impl FnOnce(&mut FakeData) -> R) -> R {
        f(&mut self.data.lock().unwrap())
    }

    /// Requests seen for `path` (with the `/api` prefix).
    pub fn hits(&self, path: &str) -> Vec<RecordedRequest> {
        self.with(|d| {
            d.requests
                .iter()
                .filter(|r| r.path == path)
                .cloned()
                .collect()
        })
    }

    pub fn hit_count(&self, path: &str) -> usize {
        self.hits(path).len()
    }

    pub fn set_delay(&self, path: &str, delay: Duration) {
        self.with(|d| d.delays.insert(path.to_string(), delay));
    }

    pub fn pending_justifications(&self) -> usize {
        self.with(|d| {
            d.justifications
                .iter()
                .filter(|j| j["status"] == "pending")
                .count()
        })
    }
}

pub struct FakeApi {
    pub base_url: String,
    pub fake: Fake,
}

/// Starts the fake server seeded with `students` generated students.
pub async fn spawn_fake_api(students: usize) -> FakeApi {
    let fake = Fake::default();
    fake.with(|d| {
        d.students = (0..students).map(generate_student).collect();
        d.justifications = vec![
            justification("j-1", "pending"),
            justification("j-2", "approved"),
            justification("j-3", "pending"),
        ];
    });

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/students", get(list_students).post(create_student))
        .route("/api/students/stats", get(student_stats))
        .route(
            "/api/justifications",
            get(list_justifications).post(create_justification),
        )
        .route("/api/justifications/stats", get(justification_stats))
        .route("/api/justifications/{id}/status", patch(review_justification))
        .route("/api/events/public", get(public_events))
        .route("/api/messages", get(list_messages))
        .route("/api/messages/unread-count", get(unread_count))
        .route("/api/gps/devices", get(gps_devices))
        .route("/api/gps/locations", get(gps_locations))
        .route("/api/gps/devices/{id}/history", get(gps_history))
        .route("/api/grades", get(empty_page))
        .route("/api/grades/stats", get(empty_object))
        .route("/api/grades/averages", get(grade_averages))
        .route("/api/attendance", get(empty_page))
        .route("/api/attendance/stats", get(empty_object))
        .route("/api/events", get(list_events))
        .route("/api/reports", get(empty_page).post(generate_report))
        .route("/api/slow", get(slow))
        .layer(middleware::from_fn_with_state(fake.clone(), record))
        .with_state(fake.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeApi {
        base_url: format!("http://{addr}/api"),
        fake,
    }
}

pub fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        api: ApiConfig::with_base_url(base_url),
        query: QueryConfig {
            stale_time: Duration::from_secs(60),
            ..QueryConfig::default()
        },
        ..AppConfig::default()
    }
}

pub fn admin_user() -> User {
    User {
        id: "u-1".into(),
        name: "Marta Admin".into(),
        email: "admin@school.test".into(),
        role: "admin".into(),
        ..User::default()
    }
}

/// App state with an in-memory session signed in with `token`.
pub fn signed_in_state(api: &FakeApi, token: &str) -> AppState {
    state_with_config(test_config(&api.base_url), Some(token))
}

pub fn anonymous_state(api: &FakeApi) -> AppState {
    state_with_config(test_config(&api.base_url), None)
}

pub fn state_with_config(config: AppConfig, token: Option<&str>) -> AppState {
    let session = SessionStore::in_memory();
    if let Some(token) = token {
        session.login(admin_user(), token);
    }
    AppState::new(config, session).unwrap()
}

fn generate_student(index: usize) -> Value {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    json!({
        "_id": format!("s-{index}"),
        "firstName": first,
        "lastName": last,
        "dni": format!("{}", 40_000_000 + index),
        "active": index % 4 != 0,
    })
}

fn justification(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "student": "s-1",
        "reason": "Medical appointment",
        "startDate": "2024-05-02",
        "endDate": "2024-05-02",
        "status": status,
        "document": "certificate.pdf",
    })
}

async fn record(State(fake): State<Fake>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    let delay = fake.with(|d| {
        d.requests.push(recorded.clone());
        d.delays.get(&recorded.path).copied()
    });
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    next.run(request).await
}

fn error(status: StatusCode, message: Option<&str>) -> Response {
    let body = match message {
        Some(message) => json!({ "message": message }),
        None => json!({}),
    };
    (status, Json(body)).into_response()
}

/// Accepts only the valid token.
fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if header == format!("Bearer {VALID_TOKEN}") {
        Ok(())
    } else {
        Err(error(StatusCode::UNAUTHORIZED, None))
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, Some("Invalid credentials"));
    }
    Json(json!({
        "data": {
            "user": {
                "_id": "u-1",
                "name": "Marta Admin",
                "email": body["email"],
                "role": "admin",
            },
            "token": VALID_TOKEN,
        }
    }))
    .into_response()
}

async fn me(headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&headers) {
        return e;
    }
    Json(json!({
        "data": {
            "_id": "u-1",
            "name": "Marta Directora",
            "email": "admin@school.test",
            "role": "admin",
            "phone": "555-0101",
        }
    }))
    .into_response()
}

fn paginate(items: &[Value], params: &HashMap<String, String>) -> Value {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let total = items.len();
    let pages = total.div_ceil(limit.max(1));
    let data: Vec<Value> = items
        .iter()
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect();
    json!({
        "data": data,
        "pagination": { "page": page, "pages": pages, "total": total },
    })
}

async fn list_students(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(e) = authorize(&headers) {
        return e;
    }
    let students = fake.with(|d| d.students.clone());
    let filtered: Vec<Value> = match params.get("search") {
        Some(term) => students
            .into_iter()
            .filter(|s| s["dni"].as_str().unwrap_or_default().contains(term.as_str()))
            .collect(),
        None => students,
    };
    Json(paginate(&filtered, &params)).into_response()
}

async fn create_student(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    let duplicate = fake.with(|d| d.students.iter().any(|s| s["dni"] == body["dni"]));
    if duplicate {
        return error(StatusCode::INTERNAL_SERVER_ERROR, Some("DNI duplicado"));
    }
    let created = fake.with(|d| {
        let mut student = body.clone();
        student["_id"] = json!(format!("s-{}", d.students.len()));
        d.students.push(student.clone());
        student
    });
    (StatusCode::CREATED, Json(json!({ "data": created }))).into_response()
}

async fn student_stats(State(fake): State<Fake>) -> Json<Value> {
    let (total, active) = fake.with(|d| {
        let active = d.students.iter().filter(|s| s["active"] == true).count();
        (d.students.len(), active)
    });
    Json(json!({
        "data": {
            "total": total,
            "active": active,
            "inactive": total - active,
            "newThisMonth": "3",
        }
    }))
}

async fn list_justifications(
    State(fake): State<Fake>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let all = fake.with(|d| d.justifications.clone());
    let filtered: Vec<Value> = match params.get("status") {
        Some(status) => all.into_iter().filter(|j| j["status"] == *status).collect(),
        None => all,
    };
    Json(paginate(&filtered, &params))
}

async fn create_justification(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    let created = fake.with(|d| {
        let mut item = body.clone();
        item["_id"] = json!(format!("j-{}", d.justifications.len() + 1));
        item["status"] = json!("pending");
        d.justifications.push(item.clone());
        item
    });
    (StatusCode::CREATED, Json(json!({ "data": created }))).into_response()
}

async fn justification_stats(State(fake): State<Fake>) -> Json<Value> {
    let counts = fake.with(|d| {
        let count = |status: &str| {
            d.justifications
                .iter()
                .filter(|j| j["status"] == status)
                .count()
        };
        (
            d.justifications.len(),
            count("pending"),
            count("approved"),
            count("rejected"),
        )
    });
    Json(json!({
        "data": {
            "total": counts.0,
            "pending": counts.1,
            "approved": counts.2,
            "rejected": counts.3,
        }
    }))
}

async fn review_justification(
    State(fake): State<Fake>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let updated = fake.with(|d| {
        let item = d.justifications.iter_mut().find(|j| j["_id"] == id.as_str())?;
        item["status"] = body["status"].clone();
        item["reviewComment"] = body["reviewComment"].clone();
        Some(item.clone())
    });
    match updated {
        Some(item) => Json(json!({ "data": item })).into_response(),
        None => error(StatusCode::NOT_FOUND, Some("Justification not found")),
    }
}

async fn public_events() -> Json<Value> {
    Json(json!({
        "data": [{
            "_id": "e-1",
            "title": "Acto 25 de Mayo",
            "start": "2024-05-24T13:00:00Z",
            "isPublic": true,
        }]
    }))
}

async fn list_messages(headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&headers) {
        return e;
    }
    Json(json!({
        "data": [
            { "_id": "m-1", "sender": "t-1", "subject": "Reunión", "body": "Mañana", "read": false },
        ],
        "pagination": { "page": 1, "pages": 1, "total": 1 },
    }))
    .into_response()
}

async fn unread_count(headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&headers) {
        return e;
    }
    Json(json!({ "data": { "count": 1 } })).into_response()
}

async fn gps_locations() -> Json<Value> {
    Json(json!({
        "data": [
            { "device": "d-1", "latitude": -34.6, "longitude": -58.4, "speed": 32.5 },
        ]
    }))
}

async fn gps_devices() -> Json<Value> {
    Json(json!({
        "data": [{ "_id": "d-1", "name": "Bus 1", "plate": "AB 123 CD", "online": true }]
    }))
}

async fn gps_history(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "data": [
            { "device": id, "latitude": -34.61, "longitude": -58.42, "speed": 20 },
            { "device": id, "latitude": -34.60, "longitude": -58.40, "speed": 25 },
        ]
    }))
}

async fn empty_page() -> Json<Value> {
    Json(json!({
        "data": [],
        "pagination": { "page": 1, "pages": 0, "total": 0 },
    }))
}

async fn empty_object() -> Json<Value> {
    Json(json!({ "data": {} }))
}

async fn grade_averages(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let all = vec![
        json!({ "course": "c-1", "subject": "Matemática", "average": 7.5 }),
        json!({ "course": "c-2", "subject": "Historia", "average": "8.25" }),
    ];
    let data: Vec<Value> = match params.get("course") {
        Some(course) => all.into_iter().filter(|a| a["course"] == *course).collect(),
        None => all,
    };
    Json(json!({ "data": data }))
}

/// May and June 2024, filtered by the `from` / `to` dates.
async fn list_events(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let all = [
        ("e-1", "Acto 25 de Mayo", "2024-05-24T13:00:00Z"),
        ("e-2", "Reunión de padres", "2024-05-24T09:00:00Z"),
        ("e-3", "Feria de ciencias", "2024-05-30T10:00:00Z"),
        ("e-4", "Día de la bandera", "2024-06-20T10:00:00Z"),
    ];
    let from = params.get("from").cloned().unwrap_or_default();
    let to = params.get("to").cloned().unwrap_or_else(|| "9999".into());
    let data: Vec<Value> = all
        .iter()
        .filter(|(_, _, start)| &start[..10] >= from.as_str() && &start[..10] <= to.as_str())
        .map(|(id, title, start)| json!({ "_id": id, "title": title, "start": start }))
        .collect();
    let total = data.len();
    Json(json!({
        "data": data,
        "pagination": { "page": 1, "pages": 1, "total": total },
    }))
}

async fn generate_report(Json(body): Json<Value>) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({
            "data": {
                "_id": "r-1",
                "title": body["title"],
                "type": body["type"],
                "file": "reports/r-1.pdf",
            }
        })),
    )
        .into_response()
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "data": null }))
}
