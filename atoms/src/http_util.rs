use crate::error::ServiceError;
use crate::schema::Fields;
use crate::store::DocumentId;
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;
use serde_json::Value;

/// Body of a successful create: the new document id as a string.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

impl From<DocumentId> for Created {
    fn from(id: DocumentId) -> Self {
        Self { id: id.into() }
    }
}

/// Reads a JSON object body and keeps only the `allowed` input fields.
pub fn select_fields(body: &[u8], allowed: &[&str]) -> Result<Fields, ServiceError> {
    let value: Value = if body.is_empty() {
        Value::Object(Fields::new())
    } else {
        serde_json::from_slice(body).map_err(|e| ServiceError::Payload(e.to_string()))?
    };

    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(k, _)| allowed.contains(&k.as_str()))
            .collect()),
        _ => Err(ServiceError::Payload("expected a JSON object".to_string())),
    }
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(body)?.into())
        .map_err(Box::new)?)
}

/// `{"detail": message}` with the given status.
pub fn detail_response(status: StatusCode, message: impl Into<String>) -> Result<Response<Body>, Error> {
    json_response(status, &serde_json::json!({ "detail": message.into() }))
}

/// Every service failure is a client-visible 400.
pub fn bad_request(err: ServiceError) -> Result<Response<Body>, Error> {
    tracing::error!("Request failed: {}", err);
    detail_response(StatusCode::BAD_REQUEST, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_allowed_fields() {
        let fields = select_fields(br#"{"name":"Acme","owner_id":"u1"}"#, &["name", "description"]).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["name"], "Acme");
    }

    #[test]
    fn empty_body_is_an_empty_object() {
        assert!(select_fields(b"", &["name"]).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(select_fields(b"[1,2]", &["name"]), Err(ServiceError::Payload(_))));
        assert!(matches!(select_fields(b"{oops", &["name"]), Err(ServiceError::Payload(_))));
    }
}
