//! Plain HTTP front for local development: every request is converted into a
//! Lambda request and passed to the same handler.

use crate::http_handler::function_handler;
use axum::extract::{Query, Request, State};
use axum::response::{IntoResponse, Response};
use axum::Router;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, RequestExt};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use taskhub_shared::AppState;
use tokio::net::TcpListener;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub(crate) async fn serve(state: Arc<AppState>) -> Result<(), Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = Router::new().fallback(forward).with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// A query string that does not decode is dropped rather than rejected, so
/// every response still comes from `function_handler` with its CORS headers.
async fn forward(
    State(state): State<Arc<AppState>>,
    params: Option<Query<HashMap<String, String>>>,
    req: Request,
) -> Response {
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to read request body: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
        }
    };

    let body = if bytes.is_empty() {
        Body::Empty
    } else {
        Body::Binary(bytes.to_vec())
    };
    let event = lambda_http::Request::from_parts(parts, body).with_query_string_parameters(params);

    match function_handler(event, state).await {
        Ok(resp) => {
            let (parts, body) = resp.into_parts();
            let body = match body {
                Body::Empty => axum::body::Body::empty(),
                Body::Text(text) => axum::body::Body::from(text),
                Body::Binary(bytes) => axum::body::Body::from(bytes),
            };
            Response::from_parts(parts, body)
        }
        Err(e) => {
            tracing::error!("Handler error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
