use super::service;
use crate::http_util::{bad_request, json_response, select_fields, Created};
use crate::store::DocumentStore;
use lambda_http::{http::StatusCode, Body, Error, Response};

/// HTTP Handler: POST /workspaces
pub async fn create_workspace_handler(
    store: &DocumentStore,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let fields = match select_fields(body, service::CREATE_WORKSPACE_FIELDS) {
        Ok(fields) => fields,
        Err(e) => return bad_request(e),
    };

    match service::create_workspace(store, &fields).await {
        Ok(id) => json_response(StatusCode::OK, &Created::from(id)),
        Err(e) => bad_request(e),
    }
}

/// HTTP Handler: GET /workspaces
pub async fn list_workspaces_handler(store: &DocumentStore) -> Result<Response<Body>, Error> {
    match service::list_workspaces(store).await {
        Ok(items) => json_response(StatusCode::OK, &items),
        Err(e) => bad_request(e),
    }
}
