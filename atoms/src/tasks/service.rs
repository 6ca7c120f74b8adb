use super::model::Task;
use crate::error::ServiceError;
use crate::schema::{Document, Fields};
use crate::store::{DocumentId, DocumentStore, Filter, Stored};

pub const CREATE_TASK_FIELDS: &[&str] = &["title", "description", "list_id"];

pub const TASK_LIST_LIMIT: usize = 500;

/// Create a new task. Status, priority and the collections start at their
/// defaults; the list id is stored as given.
pub async fn create_task(store: &DocumentStore, fields: &Fields) -> Result<DocumentId, ServiceError> {
    let task = Task::validate(fields)?;
    Ok(store.create_document(&task).await?)
}

/// Load tasks, optionally only those of one list.
pub async fn load_tasks(
    store: &DocumentStore,
    list_id: Option<&str>,
) -> Result<Vec<Stored<Task>>, ServiceError> {
    let filter = Filter::eq_opt("list_id", list_id);
    Ok(store.get_documents::<Task>(&filter, TASK_LIST_LIMIT).await?)
}
