use super::service;
use crate::http_util::{bad_request, json_response, select_fields, Created};
use crate::store::DocumentStore;
use lambda_http::{http::StatusCode, Body, Error, Response};

/// HTTP Handler: POST /lists
pub async fn create_list_handler(store: &DocumentStore, body: &[u8]) -> Result<Response<Body>, Error> {
    let fields = match select_fields(body, service::CREATE_LIST_FIELDS) {
        Ok(fields) => fields,
        Err(e) => return bad_request(e),
    };

    match service::create_list(store, &fields).await {
        Ok(id) => json_response(StatusCode::OK, &Created::from(id)),
        Err(e) => bad_request(e),
    }
}

/// HTTP Handler: GET /lists?workspace_id=
pub async fn list_lists_handler(
    store: &DocumentStore,
    workspace_id: Option<&str>,
) -> Result<Response<Body>, Error> {
    match service::list_lists(store, workspace_id).await {
        Ok(items) => json_response(StatusCode::OK, &items),
        Err(e) => bad_request(e),
    }
}
