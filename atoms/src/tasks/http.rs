use super::service;
use crate::http_util::{bad_request, json_response, select_fields, Created};
use crate::store::DocumentStore;
use lambda_http::{http::StatusCode, Body, Error, Response};

/// HTTP Handler: POST /tasks
pub async fn create_task_handler(store: &DocumentStore, body: &[u8]) -> Result<Response<Body>, Error> {
    let fields = match select_fields(body, service::CREATE_TASK_FIELDS) {
        Ok(fields) => fields,
        Err(e) => return bad_request(e),
    };

    match service::create_task(store, &fields).await {
        Ok(id) => json_response(StatusCode::OK, &Created::from(id)),
        Err(e) => bad_request(e),
    }
}

/// HTTP Handler: GET /tasks?list_id=
pub async fn list_tasks_handler(
    store: &DocumentStore,
    list_id: Option<&str>,
) -> Result<Response<Body>, Error> {
    match service::load_tasks(store, list_id).await {
        Ok(tasks) => json_response(StatusCode::OK, &tasks),
        Err(e) => bad_request(e),
    }
}
