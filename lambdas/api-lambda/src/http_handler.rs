use lambda_http::http::header::{HeaderValue, ACCESS_CONTROL_REQUEST_HEADERS, ORIGIN, VARY};
use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use taskhub_atoms::http_util::{detail_response, json_response};
use taskhub_atoms::{lists, tasks, workspaces};
use taskhub_shared::{catalogue, diagnostics, AppState};

const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";

/// Paths with at least one route, for telling 405 from 404.
const KNOWN_PATHS: [&str; 6] = ["/", "/schema", "/workspaces", "/lists", "/tasks", "/test"];

/// Origin and requested headers of the incoming request.
struct Cors<'a> {
    origin: Option<&'a str>,
    request_headers: Option<&'a str>,
}

/// Any origin is allowed. A request `Origin` is echoed back (so credentials
/// work), otherwise the wildcard is used.
fn with_cors_headers(mut resp: Response<Body>, cors: &Cors<'_>) -> Response<Body> {
    let headers = resp.headers_mut();

    match cors.origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => {
            headers.insert("Access-Control-Allow-Origin", origin);
            headers.insert("Access-Control-Allow-Credentials", HeaderValue::from_static("true"));
            headers.append(VARY, HeaderValue::from_static("Origin"));
        }
        None => {
            headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
        }
    }

    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    let allow_headers = cors
        .request_headers
        .and_then(|h| HeaderValue::from_str(h).ok())
        .unwrap_or_else(|| HeaderValue::from_static("*"));
    headers.insert("Access-Control-Allow-Headers", allow_headers);

    resp
}

fn finalize_response(
    resp: Result<Response<Body>, Error>,
    cors: &Cors<'_>,
) -> Result<Response<Body>, Error> {
    resp.map(|r| with_cors_headers(r, cors))
}

fn query_param<'a>(event: &'a Request, name: &str) -> Option<&'a str> {
    event
        .query_string_parameters_ref()
        .and_then(|params| params.first(name))
}

/// Main handler - routes every request of the API.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let body = event.body();
    let cors = Cors {
        origin: event.headers().get(ORIGIN).and_then(|v| v.to_str().ok()),
        request_headers: event
            .headers()
            .get(ACCESS_CONTROL_REQUEST_HEADERS)
            .and_then(|v| v.to_str().ok()),
    };
    tracing::info!("🚀 API invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if method == Method::OPTIONS {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp, &cors));
    }

    let route = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };
    let store = &state.store;

    let resp = match (method, route) {
        // GET / - liveness
        (&Method::GET, "/") => json_response(
            StatusCode::OK,
            &serde_json::json!({"message": "Backend running"}),
        ),
        // GET /schema - record shapes for every entity kind
        (&Method::GET, "/schema") => json_response(StatusCode::OK, &catalogue::schema_catalogue()),

        // --- WORKSPACES ---
        (&Method::POST, "/workspaces") => workspaces::create_workspace_handler(store, body).await,
        (&Method::GET, "/workspaces") => workspaces::list_workspaces_handler(store).await,

        // --- LISTS ---
        (&Method::POST, "/lists") => lists::create_list_handler(store, body).await,
        // GET /lists?workspace_id={wid}
        (&Method::GET, "/lists") => {
            lists::list_lists_handler(store, query_param(&event, "workspace_id")).await
        }

        // --- TASKS ---
        (&Method::POST, "/tasks") => tasks::create_task_handler(store, body).await,
        // GET /tasks?list_id={lid}
        (&Method::GET, "/tasks") => {
            tasks::list_tasks_handler(store, query_param(&event, "list_id")).await
        }

        // GET /test - store connectivity report, never fails
        (&Method::GET, "/test") => {
            json_response(StatusCode::OK, &diagnostics::run_diagnostics(&state).await)
        }

        (_, route) if KNOWN_PATHS.contains(&route) => method_not_allowed(),
        _ => {
            tracing::warn!("⚠️ No route matched - Method: {} Path: {}", method, path);
            not_found()
        }
    };

    finalize_response(resp, &cors)
}

fn not_found() -> Result<Response<Body>, Error> {
    detail_response(StatusCode::NOT_FOUND, "Not Found")
}

fn method_not_allowed() -> Result<Response<Body>, Error> {
    detail_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use taskhub_atoms::store::{DocumentStore, MemoryBackend};
    use taskhub_shared::AppConfig;

    fn memory_state() -> Arc<AppState> {
        let config = AppConfig {
            database_url: Some("memory://".to_string()),
            database_name: Some("taskhub".to_string()),
            ..AppConfig::default()
        };
        let store = DocumentStore::new(Arc::new(MemoryBackend::new("taskhub")));
        Arc::new(AppState::new(config, store))
    }

    fn degraded_state() -> Arc<AppState> {
        Arc::new(AppState::new(AppConfig::default(), DocumentStore::disconnected()))
    }

    fn request(method: &str, uri: &str, body: Option<&str>) -> Request {
        let body = match body {
            Some(text) => Body::from(text),
            None => Body::Empty,
        };
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap()
    }

    fn with_query(req: Request, name: &str, value: &str) -> Request {
        req.with_query_string_parameters(HashMap::from([(name.to_string(), value.to_string())]))
    }

    fn body_json(resp: &Response<Body>) -> Value {
        serde_json::from_slice(resp.body()).unwrap()
    }

    async fn call(state: &Arc<AppState>, req: Request) -> Response<Body> {
        function_handler(req, state.clone()).await.unwrap()
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        let resp = call(&degraded_state(), request("GET", "/", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(&resp), json!({"message": "Backend running"}));
    }

    #[tokio::test]
    async fn created_workspace_appears_in_listing() {
        let state = memory_state();
        let resp = call(&state, request("POST", "/workspaces", Some(r#"{"name":"Acme"}"#))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let id = body_json(&resp)["id"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let resp = call(&state, request("GET", "/workspaces", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let items = body_json(&resp);
        let items = items.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["_id"], id.as_str());
        assert_eq!(items[0]["name"], "Acme");
        assert_eq!(items[0]["members"], json!([]));
    }

    #[tokio::test]
    async fn task_defaults_are_filled_in() {
        let state = memory_state();
        let resp = call(
            &state,
            request("POST", "/tasks", Some(r#"{"title":"Fix bug","list_id":"L1"}"#)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = call(&state, with_query(request("GET", "/tasks", None), "list_id", "L1")).await;
        let items = body_json(&resp);
        assert_eq!(items.as_array().map(|a| a.len()), Some(1));
        let task = &items[0];
        assert_eq!(task["status"], "todo");
        assert_eq!(task["priority"], "none");
        assert_eq!(task["assignees"], json!([]));
        assert_eq!(task["tags"], json!([]));
        assert_eq!(task["description"], Value::Null);
    }

    #[tokio::test]
    async fn lists_are_filtered_by_workspace() {
        let state = memory_state();
        for body in [r#"{"name":"A","workspace_id":"W1"}"#, r#"{"name":"B","workspace_id":"W2"}"#] {
            let resp = call(&state, request("POST", "/lists", Some(body))).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = call(&state, with_query(request("GET", "/lists", None), "workspace_id", "W1")).await;
        let items = body_json(&resp);
        let items = items.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "A");
        assert_eq!(items[0]["workspace_id"], "W1");

        let resp = call(&state, request("GET", "/lists", None)).await;
        assert_eq!(body_json(&resp).as_array().map(|a| a.len()), Some(2));
    }

    #[tokio::test]
    async fn validation_failures_are_400_with_detail() {
        let state = memory_state();
        let resp = call(&state, request("POST", "/tasks", Some(r#"{"description":"no title"}"#))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let detail = body_json(&resp)["detail"].as_str().unwrap().to_string();
        assert!(detail.contains("title"), "{detail}");
        assert!(detail.contains("list_id"), "{detail}");

        let resp = call(&state, request("POST", "/workspaces", Some("not json"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = call(&state, request("POST", "/workspaces", Some(r#"{"name": 5}"#))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_only_reads_its_input_fields() {
        let state = memory_state();
        let resp = call(
            &state,
            request(
                "POST",
                "/tasks",
                Some(r#"{"title":"t","list_id":"L1","status":"blocked","priority":"urgent"}"#),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = call(&state, request("GET", "/tasks", None)).await;
        let items = body_json(&resp);
        assert_eq!(items[0]["status"], "todo");
        assert_eq!(items[0]["priority"], "none");
    }

    #[tokio::test]
    async fn degraded_mode_fails_creates_and_lists_nothing() {
        let state = degraded_state();
        let resp = call(&state, request("POST", "/workspaces", Some(r#"{"name":"Acme"}"#))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(&resp)["detail"], "Database not available");

        for path in ["/workspaces", "/lists", "/tasks"] {
            let resp = call(&state, request("GET", path, None)).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(body_json(&resp), json!([]));
        }
    }

    #[tokio::test]
    async fn diagnostics_without_database_url() {
        let resp = call(&degraded_state(), request("GET", "/test", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let report = body_json(&resp);
        assert_eq!(report["backend"], "✅ Running");
        assert_eq!(report["database_url"], "❌ Not Set");
        assert_eq!(report["database_name"], "❌ Not Set");
        assert_eq!(report["connection_status"], "Not Connected");
    }

    #[tokio::test]
    async fn schema_lists_every_entity() {
        let resp = call(&degraded_state(), request("GET", "/schema", None)).await;
        let schema = body_json(&resp);
        for key in ["user", "workspace", "space", "folder", "list", "task", "comment"] {
            assert!(schema.get(key).is_some(), "{key} missing");
        }
    }

    #[tokio::test]
    async fn cors_echoes_origin_and_answers_preflight() {
        let state = degraded_state();
        let mut req = request("OPTIONS", "/tasks", None);
        req.headers_mut()
            .insert(ORIGIN, HeaderValue::from_static("http://localhost:3000"));
        req.headers_mut().insert(
            ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("content-type"),
        );
        let resp = call(&state, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let headers = resp.headers();
        assert_eq!(headers["Access-Control-Allow-Origin"], "http://localhost:3000");
        assert_eq!(headers["Access-Control-Allow-Credentials"], "true");
        assert_eq!(headers["Access-Control-Allow-Headers"], "content-type");

        let resp = call(&state, request("GET", "/", None)).await;
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn unknown_routes_and_methods() {
        let state = degraded_state();
        let resp = call(&state, request("GET", "/nope", None)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(&resp), json!({"detail": "Not Found"}));

        let resp = call(&state, request("DELETE", "/tasks", None)).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let resp = call(&state, request("GET", "/workspaces/", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
