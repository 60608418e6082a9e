use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use uspy_client::{ApiClient, ClientConfig};
use uspy_model::{
    Credentials, GradeStats, PasswordRedefinition, Requirement, Stats, Subject, SubjectInfo,
    SubjectRelations, SubjectReview,
};

pub const SESSION_VALUE: &str = "test-session-token";
pub const VALID_LOGIN: &str = "10284952";
pub const VALID_PASSWORD: &str = "hunter22";

/// Subject code whose lookup always fails with a 500
pub const BROKEN_CODE: &str = "BROKEN";

/// Shared state of the mock review API
#[derive(Default)]
pub struct MockState {
    pub subjects: Mutex<HashMap<String, Subject>>,
    pub reviews: Mutex<HashMap<String, SubjectReview>>,
    pub grades: Mutex<HashMap<String, GradeStats>>,
    pub user_grades: Mutex<HashMap<String, f64>>,
    pub relations: Mutex<HashMap<String, SubjectRelations>>,
    pub reset_emails: Mutex<Vec<String>>,
    pub request_ids: Mutex<Vec<String>>,
}

type SharedState = Arc<MockState>;

/// Running mock server
pub struct MockServer {
    pub url: String,
    pub state: SharedState,
}

impl MockServer {
    /// Start a mock API on an ephemeral port with one seeded subject (`SCC0218`)
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(MockState::default());
        seed(&state);

        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server crashed");
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    /// Anonymous client
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ClientConfig::new(&self.url)).expect("Failed to build client")
    }

    /// Client pre-seeded with a valid session cookie
    pub fn logged_in_client(&self) -> ApiClient {
        let config = ClientConfig::new(&self.url).with_session(SESSION_VALUE);
        ApiClient::new(&config).expect("Failed to build client")
    }
}

pub fn sample_subject() -> Subject {
    Subject {
        code: "SCC0218".to_string(),
        name: "Algoritmos Avançados e Aplicações".to_string(),
        description: "Técnicas de projeto de algoritmos".to_string(),
        class_credits: 4,
        assignment_credits: 2,
        hours: "120 h".to_string(),
        semester: 5,
        optional: false,
        requirements: vec![vec![Requirement {
            code: "SCC0216".to_string(),
            strong: true,
        }]],
        stats: Stats {
            total: 10,
            worth_it: 7,
        },
    }
}

fn seed(state: &MockState) {
    let subject = sample_subject();
    let code = subject.code.clone();

    state.subjects.lock().unwrap().insert(code.clone(), subject);
    state.grades.lock().unwrap().insert(
        code.clone(),
        GradeStats {
            grades: [("5.0".to_string(), 3), ("7.5".to_string(), 5)]
                .into_iter()
                .collect(),
            average: 6.56,
            approval: 0.8,
        },
    );
    state.relations.lock().unwrap().insert(
        code,
        SubjectRelations {
            predecessors: vec![SubjectInfo {
                code: "SCC0216".to_string(),
                name: None,
            }],
            successors: vec![],
        },
    );
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/subject/{course}/{specialization}/{code}", get(get_subject))
        .route(
            "/api/subject/{course}/{specialization}/{code}/review",
            get(get_review).post(post_review),
        )
        .route(
            "/api/subject/{course}/{specialization}/{code}/grades",
            get(get_grades),
        )
        .route(
            "/api/subject/{course}/{specialization}/{code}/grade",
            get(get_user_grade),
        )
        .route(
            "/api/subject/{course}/{specialization}/{code}/relations",
            get(get_relations),
        )
        .route("/account", get(current_user))
        .route("/account/login", post(login))
        .route("/account/logout", get(logout))
        .route("/account/password_redefinition", post(password_redefinition))
        .with_state(state)
}

type SubjectPath = Path<(String, String, String)>;

fn has_session(headers: &HeaderMap) -> bool {
    let expected = format!("session={SESSION_VALUE}");
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .any(|c| c.trim() == expected)
}

fn track(state: &MockState, headers: &HeaderMap) {
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        state.request_ids.lock().unwrap().push(id.to_string());
    }
}

async fn get_subject(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((_, _, code)): SubjectPath,
) -> Response {
    track(&state, &headers);

    if code == BROKEN_CODE {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    match state.subjects.lock().unwrap().get(&code) {
        Some(subject) => Json(subject.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_review(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((_, _, code)): SubjectPath,
) -> Response {
    if !has_session(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.reviews.lock().unwrap().get(&code) {
        Some(review) => Json(*review).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn post_review(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((_, _, code)): SubjectPath,
    Json(review): Json<SubjectReview>,
) -> Response {
    if !has_session(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    state.reviews.lock().unwrap().insert(code, review);
    StatusCode::OK.into_response()
}

async fn get_grades(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((_, _, code)): SubjectPath,
) -> Response {
    if !has_session(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.grades.lock().unwrap().get(&code) {
        Some(grades) => Json(grades.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_user_grade(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((_, _, code)): SubjectPath,
) -> Response {
    if !has_session(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.user_grades.lock().unwrap().get(&code) {
        Some(grade) => Json(json!({ "grade": grade })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_relations(
    State(state): State<SharedState>,
    Path((_, _, code)): SubjectPath,
) -> Response {
    match state.relations.lock().unwrap().get(&code) {
        Some(relations) => Json(relations.clone()).into_response(),
        None => Json(json!({ "predecessors": null, "successors": null })).into_response(),
    }
}

async fn current_user(headers: HeaderMap) -> Response {
    if has_session(&headers) {
        Json(json!({ "user": VALID_LOGIN })).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn login(Json(credentials): Json<Credentials>) -> Response {
    if credentials.login == VALID_LOGIN && credentials.password == VALID_PASSWORD {
        (
            [(header::SET_COOKIE, format!("session={SESSION_VALUE}; Path=/"))],
            StatusCode::OK,
        )
            .into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, "session=; Path=/; Max-Age=0")],
        StatusCode::OK,
    )
}

async fn password_redefinition(
    State(state): State<SharedState>,
    Json(body): Json<PasswordRedefinition>,
) -> StatusCode {
    state.reset_emails.lock().unwrap().push(body.email);
    StatusCode::OK
}
