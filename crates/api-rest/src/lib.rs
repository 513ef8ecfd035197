//! # API REST
//!
//! REST API implementation for Medicine Finder.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `medfind-core` for the lookup itself.

#![warn(rust_2018_idioms)]

pub mod convert;
pub mod sessions;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use api_shared::{
    CategoryRes, ErrorRes, HealthRes, HealthService, MedicineRes, SearchReq, SearchRes,
    SearchResultRes, SearchStateRes, SearchStatus, SessionRes, ViewKind, ViewRes,
};
use medfind_core::{
    prompt::response_schema, GenerativeClient, MedicineFinder, MedicineQuery, SearchSession,
    SearchState, View,
};

use crate::convert::{result_res, state_res, view_res};
use crate::sessions::SessionRegistry;

/// The client type held by the server: any implementation behind an `Arc`.
pub type SharedClient = Arc<dyn GenerativeClient>;

/// Application state shared across REST API handlers
///
/// Holds the finder (and through it the injected AI service client) and the
/// registry of live search sessions.
#[derive(Clone)]
pub struct AppState {
    finder: MedicineFinder<SharedClient>,
    sessions: SessionRegistry,
}

impl AppState {
    pub fn new(client: SharedClient) -> Self {
        Self::with_sessions(client, SessionRegistry::new())
    }

    /// Uses a registry with caller-chosen capacity and idle expiry.
    pub fn with_sessions(client: SharedClient, sessions: SessionRegistry) -> Self {
        Self {
            finder: MedicineFinder::new(client),
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        schema,
        search,
        create_session,
        get_session,
        delete_session,
        search_in_session,
    ),
    components(schemas(
        HealthRes,
        SearchReq,
        SearchRes,
        SearchResultRes,
        MedicineRes,
        CategoryRes,
        ViewRes,
        ViewKind,
        SearchStateRes,
        SearchStatus,
        SessionRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorRes {
            message: message.to_string(),
        }),
    )
}

/// Builds the full router, including Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schema", get(schema))
        .route("/search", post(search))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(delete_session))
        .route("/sessions/:id/search", post(search_in_session))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the router until the process is stopped.
///
/// # Errors
/// Returns an error if:
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Medicine Finder REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn parse_query(raw: &str) -> Result<MedicineQuery, ApiError> {
    MedicineQuery::parse(raw).map_err(|e| {
        tracing::debug!("rejected search input: {}", e);
        api_error(StatusCode::BAD_REQUEST, e.user_message())
    })
}

fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| {
        tracing::debug!("invalid session id {:?}: {}", raw, e);
        api_error(StatusCode::BAD_REQUEST, "Invalid session id")
    })
}

fn lookup_session(state: &AppState, raw_id: &str) -> Result<(Uuid, SearchSession), ApiError> {
    let id = parse_session_id(raw_id)?;
    state
        .sessions
        .get(&id)
        .map(|session| (id, session))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Session not found"))
}

fn session_res(id: Uuid, search_state: &SearchState) -> SessionRes {
    SessionRes {
        session_id: id.to_string(),
        state: state_res(search_state),
        view: view_res(&View::for_state(search_state)),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/schema",
    responses(
        (status = 200, description = "Structured-output schema sent with every lookup", body = Object)
    )
)]
#[axum::debug_handler]
async fn schema(State(_state): State<AppState>) -> Json<serde_json::Value> {
    Json(response_schema())
}

#[utoipa::path(
    post,
    path = "/search",
    request_body = SearchReq,
    responses(
        (status = 200, description = "Lookup completed (the medicine may still be unidentified)", body = SearchRes),
        (status = 400, description = "Blank or overlong medicine name", body = ErrorRes),
        (status = 502, description = "The alternatives service failed", body = ErrorRes)
    )
)]
/// One-shot search outside any session
///
/// Performs a single lookup and returns both the validated result and the
/// view a front end should render for it.
///
/// # Errors
/// Returns `400 Bad Request` for a blank query and `502 Bad Gateway` when
/// the service call fails or answers with non-JSON text. Error bodies carry
/// only the generic user-facing message.
#[axum::debug_handler]
async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchReq>,
) -> Result<Json<SearchRes>, ApiError> {
    let query = parse_query(&req.query)?;

    match state.finder.find_alternatives(&query).await {
        Ok(result) => Ok(Json(SearchRes {
            query: query.as_str().to_string(),
            view: view_res(&View::for_result(query.as_str(), &result)),
            result: result_res(&result),
        })),
        Err(e) => Err(api_error(StatusCode::BAD_GATEWAY, e.user_message())),
    }
}

#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created in the idle state", body = SessionRes)
    )
)]
#[axum::debug_handler]
async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionRes>) {
    let (id, session) = state.sessions.create();
    tracing::debug!(session = %id, "session created");
    (StatusCode::CREATED, Json(session_res(id, &session.state())))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Current session state", body = SessionRes),
        (status = 400, description = "Invalid session id", body = ErrorRes),
        (status = 404, description = "Unknown session", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionRes>, ApiError> {
    let (id, session) = lookup_session(&state, &id)?;
    Ok(Json(session_res(id, &session.state())))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 400, description = "Invalid session id", body = ErrorRes),
        (status = 404, description = "Unknown session", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&id)?;
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(StatusCode::NOT_FOUND, "Session not found"))
    }
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/search",
    params(("id" = String, Path, description = "Session id")),
    request_body = SearchReq,
    responses(
        (status = 202, description = "Search started; poll the session for the outcome", body = SessionRes),
        (status = 400, description = "Invalid session id or blank query", body = ErrorRes),
        (status = 404, description = "Unknown session", body = ErrorRes)
    )
)]
/// Start a search within a session
///
/// The session enters `searching` before this handler returns. The lookup
/// runs in the background and its completion replaces the session state,
/// even if a newer search was submitted in the meantime.
#[axum::debug_handler]
async fn search_in_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SearchReq>,
) -> Result<(StatusCode, Json<SessionRes>), ApiError> {
    let (id, session) = lookup_session(&state, &id)?;
    let query = parse_query(&req.query)?;

    let ticket = session.begin(&query);
    let searching = session.state();

    let finder = state.finder.clone();
    tokio::spawn(async move {
        let outcome = finder.find_alternatives(&query).await;
        session.complete(ticket, outcome);
    });

    Ok((StatusCode::ACCEPTED, Json(session_res(id, &searching))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, Response};
    use http_body_util::BodyExt;
    use medfind_core::constants::SERVICE_FAILURE_MESSAGE;
    use medfind_core::{AlternativesRequest, ClientError};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    struct FixedClient(Result<&'static str, u16>);

    #[async_trait]
    impl GenerativeClient for FixedClient {
        async fn generate(&self, _request: &AlternativesRequest) -> Result<String, ClientError> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(status) => Err(ClientError::Status {
                    status,
                    body: "API key not valid. Please pass a valid API key.".into(),
                }),
            }
        }
    }

    const CROCIN: &str = r#"{"searchedMedicine": {"brandName": "Crocin", "salt": "Paracetamol", "dosage": "500 mg", "company": "GSK"}, "categories": [{"title": "Same Salt & Dosage (Popular Brands)", "medicines": [{"brandName": "Dolo 650", "salt": "Paracetamol", "dosage": "650 mg", "company": "Micro Labs"}]}]}"#;

    fn test_app(reply: Result<&'static str, u16>) -> (Router, AppState) {
        let state = AppState::new(Arc::new(FixedClient(reply)));
        (router(state.clone()), state)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = test_app(Ok(CROCIN));
        let response = app.oneshot(empty_request("GET", "/health")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["ok"], json!(true));
    }

    #[tokio::test]
    async fn schema_endpoint_returns_the_response_schema() {
        let (app, _) = test_app(Ok(CROCIN));
        let response = app.oneshot(empty_request("GET", "/schema")).await.expect("response");
        assert_eq!(body_json(response).await, response_schema());
    }

    #[tokio::test]
    async fn search_returns_result_and_results_view() {
        let (app, _) = test_app(Ok(CROCIN));
        let response = app
            .oneshot(json_request("POST", "/search", json!({ "query": "  Crocin " })))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["query"], "Crocin");
        assert_eq!(body["view"]["kind"], "results");
        assert_eq!(
            body["result"],
            serde_json::from_str::<Value>(CROCIN).expect("fixture")
        );
    }

    #[tokio::test]
    async fn search_distinguishes_not_found_from_no_alternatives() {
        let (app, _) = test_app(Ok(r#"{"searchedMedicine": null, "categories": []}"#));
        let body = body_json(
            app.oneshot(json_request("POST", "/search", json!({ "query": "Xyzzy" })))
                .await
                .expect("response"),
        )
        .await;
        assert_eq!(body["view"]["kind"], "not_found");

        let (app, _) = test_app(Ok(
            r#"{"searchedMedicine": {"brandName": "Crocin", "salt": "Paracetamol", "dosage": "500 mg", "company": "GSK"}, "categories": []}"#,
        ));
        let body = body_json(
            app.oneshot(json_request("POST", "/search", json!({ "query": "Crocin" })))
                .await
                .expect("response"),
        )
        .await;
        assert_eq!(body["view"]["kind"], "no_alternatives");
        assert_eq!(body["view"]["searched"]["brandName"], "Crocin");
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let (app, _) = test_app(Ok(CROCIN));
        let response = app
            .oneshot(json_request("POST", "/search", json!({ "query": "   " })))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn service_failure_is_a_generic_bad_gateway() {
        let (app, _) = test_app(Err(400));
        let response = app
            .oneshot(json_request("POST", "/search", json!({ "query": "Crocin" })))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert_eq!(body["message"], SERVICE_FAILURE_MESSAGE);
        assert!(!body.to_string().contains("API key"));
    }

    #[tokio::test]
    async fn malformed_answer_is_a_bad_gateway_but_bad_shape_is_not() {
        let (app, _) = test_app(Ok("definitely not json"));
        let response = app
            .oneshot(json_request("POST", "/search", json!({ "query": "Crocin" })))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let (app, _) = test_app(Ok(r#"{"searchedMedicine": null}"#));
        let response = app
            .oneshot(json_request("POST", "/search", json!({ "query": "Crocin" })))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["result"],
            json!({ "searchedMedicine": null, "categories": [] })
        );
    }

    async fn wait_for_completion(app: &Router, id: &str) -> Value {
        for _ in 0..50 {
            let body = body_json(
                app.clone()
                    .oneshot(empty_request("GET", &format!("/sessions/{id}")))
                    .await
                    .expect("response"),
            )
            .await;
            if body["state"]["status"] != "searching" {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("search did not complete");
    }

    #[tokio::test]
    async fn session_search_moves_through_the_state_machine() {
        let (app, _) = test_app(Ok(CROCIN));

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/sessions"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["state"]["status"], "idle");
        assert_eq!(created["view"]["kind"], "prompt");
        let id = created["sessionId"].as_str().expect("id").to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/sessions/{id}/search"),
                json!({ "query": "Crocin" }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let started = body_json(response).await;
        assert_eq!(started["state"]["status"], "searching");
        assert_eq!(started["view"]["kind"], "loading");

        let done = wait_for_completion(&app, &id).await;
        assert_eq!(done["state"]["status"], "success");
        assert_eq!(done["view"]["kind"], "results");
    }

    #[tokio::test]
    async fn failed_session_search_keeps_no_result() {
        let (app, state) = test_app(Err(503));
        let (id, session) = state.sessions().create();

        let ok = MedicineFinder::new(FixedClient(Ok(CROCIN)));
        session
            .search(&ok, &MedicineQuery::parse("Crocin").expect("valid"))
            .await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/sessions/{id}/search"),
                json!({ "query": "Crocin" }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let done = wait_for_completion(&app, &id.to_string()).await;
        assert_eq!(done["state"]["status"], "failed");
        assert_eq!(done["state"]["query"], "Crocin");
        assert_eq!(done["state"]["message"], SERVICE_FAILURE_MESSAGE);
        assert_eq!(done["state"]["result"], Value::Null);
        assert_eq!(done["view"]["kind"], "error");
    }

    #[tokio::test]
    async fn unknown_and_invalid_sessions() {
        let (app, _) = test_app(Ok(CROCIN));

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/sessions/not-a-uuid"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let missing = Uuid::new_v4();
        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/sessions/{missing}")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(empty_request("DELETE", &format!("/sessions/{missing}")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleted_sessions_are_discarded() {
        let (app, state) = test_app(Ok(CROCIN));
        let (id, _) = state.sessions().create();

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/sessions/{id}")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(state.sessions().is_empty());
    }

    #[tokio::test]
    async fn creating_past_capacity_evicts_the_oldest_session() {
        let registry = SessionRegistry::with_limits(1, sessions::DEFAULT_SESSION_IDLE);
        let state = AppState::with_sessions(Arc::new(FixedClient(Ok(CROCIN))), registry);
        let app = router(state.clone());

        let mut ids = Vec::new();
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(empty_request("POST", "/sessions"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::CREATED);
            let body = body_json(response).await;
            ids.push(body["sessionId"].as_str().expect("session id").to_string());
        }
        assert_eq!(state.sessions().len(), 1);

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/sessions/{}", ids[0])))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(empty_request("GET", &format!("/sessions/{}", ids[1])))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/schema",
            "/search",
            "/sessions",
            "/sessions/{id}",
            "/sessions/{id}/search",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
