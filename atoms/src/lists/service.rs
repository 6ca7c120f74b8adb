use super::model::List;
use crate::error::ServiceError;
use crate::schema::{Document, Fields};
use crate::store::{DocumentId, DocumentStore, Filter, Stored};

pub const CREATE_LIST_FIELDS: &[&str] = &["name", "workspace_id"];

pub const LIST_LIST_LIMIT: usize = 200;

pub async fn create_list(store: &DocumentStore, fields: &Fields) -> Result<DocumentId, ServiceError> {
    let list = List::validate(fields)?;
    Ok(store.create_document(&list).await?)
}

/// Lists, optionally restricted to one workspace. An empty id means no filter.
pub async fn list_lists(
    store: &DocumentStore,
    workspace_id: Option<&str>,
) -> Result<Vec<Stored<List>>, ServiceError> {
    let filter = Filter::eq_opt("workspace_id", workspace_id);
    Ok(store.get_documents::<List>(&filter, LIST_LIST_LIMIT).await?)
}
