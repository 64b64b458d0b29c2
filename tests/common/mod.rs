use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use schooldesk::router::init_router;
use schooldesk::state::AppState;
use schooldesk_auth::{Role, issue_token};
use schooldesk_config::{JwtConfig, PasswordConfig};
use schooldesk_core::hash_password;
use schooldesk_models::{NewCredential, UserId};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "testpass123";

#[allow(dead_code)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub token: String,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: 3600,
    }
}

/// State over an empty in-memory store with the cheapest bcrypt cost.
pub fn test_state() -> AppState {
    AppState::in_memory(jwt_config(), PasswordConfig { bcrypt_cost: 4 })
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Stores an account directly and signs a token for it.
pub async fn create_test_user(state: &AppState, role: Role, super_admin: bool) -> TestUser {
    let email = generate_unique_email();
    let credential = state
        .users
        .insert_user(NewCredential {
            name: "Test User".to_string(),
            email: email.clone(),
            password_hash: hash_password(TEST_PASSWORD, 4).unwrap(),
            role,
            super_admin,
        })
        .await
        .unwrap();

    let token = issue_token(credential.id.into_inner(), role, &state.jwt_config).unwrap();

    TestUser {
        id: credential.id,
        email,
        password: TEST_PASSWORD.to_string(),
        role,
        token,
    }
}

pub async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    init_router(state.clone()).oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sends a request and returns the status together with the decoded body.
pub async fn call(
    state: &AppState,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send(state, method, uri, token, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[allow(dead_code)]
pub fn student_body(roll_number: &str) -> Value {
    json!({
        "name": "Ada Lovelace",
        "rollNumber": roll_number,
        "class": "Grade 5",
        "section": "A",
        "dateOfBirth": "2014-03-09",
        "gender": "Female",
        "address": {
            "street": "12 Analytical Way",
            "city": "London",
            "state": "Greater London",
            "postalCode": "N1 7AA",
            "country": "UK"
        },
        "parentDetails": {
            "fatherName": "George Byron",
            "motherName": "Anne Milbanke",
            "contactNumber": "+44 20 7946 0000"
        }
    })
}

/// Creates a student through the API and returns its id.
#[allow(dead_code)]
pub async fn create_student(state: &AppState, token: &str, roll_number: &str) -> String {
    let (status, body) = call(
        state,
        "POST",
        "/api/student",
        Some(token),
        Some(student_body(roll_number)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["student"]["id"].as_str().unwrap().to_string()
}
