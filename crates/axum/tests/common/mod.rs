use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request};
use axum::response::Response;
use axum::routing;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use responder_axum::{
    EnvelopeResponse, Failure, JsonOptions, PageInfo, Paginated, Respond, ResponseConfig,
    StatusMessages,
};

/// Build a `Respond` with the canonical reason-phrase lookup and an
/// otherwise default configuration.
pub fn respond() -> Respond {
    respond_with(ResponseConfig {
        messages: Some(Arc::new(StatusMessages)),
        ..Default::default()
    })
}

pub fn respond_with(config: ResponseConfig) -> Respond {
    Respond::new(Arc::new(config))
}

/// Build a small application router exercising the success and failure
/// entry points, mirroring how a service wires `Respond` into its state.
pub fn build_test_app(respond: Respond) -> Router {
    Router::new()
        .route("/users", routing::get(list_users).post(create_user))
        .route("/users/{id}", routing::get(get_user))
        .route("/transfer", routing::post(transfer))
        .with_state(respond)
}

async fn list_users(State(respond): State<Respond>) -> EnvelopeResponse {
    let page = Paginated::new(
        vec![
            json!({"id": 1, "name": "Ada"}),
            json!({"id": 2, "name": "Grace"}),
        ],
        PageInfo {
            total: 3,
            to: 2,
            per_page: 2,
            current_page: 1,
            last_page: 2,
            prev_page_url: None,
            next_page_url: Some("/users?page=2".into()),
        },
    );

    respond.success(page, "", 200, HeaderMap::new(), JsonOptions::default())
}

async fn get_user(
    State(respond): State<Respond>,
    Path(id): Path<u32>,
) -> Result<EnvelopeResponse, Failure> {
    if id != 1 {
        return Err(respond.error_not_found("User not found"));
    }

    Ok(respond.success(
        json!({"name": "X", "email": "Y"}),
        "",
        200,
        HeaderMap::new(),
        JsonOptions::default(),
    ))
}

async fn create_user(State(respond): State<Respond>) -> EnvelopeResponse {
    respond.created(json!({"id": 3}), "", Some("/users/3"))
}

async fn transfer(State(respond): State<Respond>) -> Result<EnvelopeResponse, Failure> {
    // Deeply nested business code terminates the request with `?`.
    check_balance(&respond)?;
    Ok(respond.ok("transferred"))
}

fn check_balance(respond: &Respond) -> Result<(), Failure> {
    respond.fail(
        "Insufficient funds",
        403,
        None,
        HeaderMap::new(),
        JsonOptions::default(),
    )?;
    Ok(())
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
