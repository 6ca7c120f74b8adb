use super::model::Workspace;
use crate::error::ServiceError;
use crate::schema::{Document, Fields};
use crate::store::{DocumentId, DocumentStore, Filter, Stored};

/// Fields a client may set when creating a workspace.
pub const CREATE_WORKSPACE_FIELDS: &[&str] = &["name", "description"];

pub const WORKSPACE_LIST_LIMIT: usize = 50;

pub async fn create_workspace(
    store: &DocumentStore,
    fields: &Fields,
) -> Result<DocumentId, ServiceError> {
    let workspace = Workspace::validate(fields)?;
    Ok(store.create_document(&workspace).await?)
}

pub async fn list_workspaces(store: &DocumentStore) -> Result<Vec<Stored<Workspace>>, ServiceError> {
    Ok(store
        .get_documents::<Workspace>(&Filter::All, WORKSPACE_LIST_LIMIT)
        .await?)
}
