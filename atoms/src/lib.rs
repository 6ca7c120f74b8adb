//! Entity schemas, the generic document store and the per-entity services
//! and HTTP handlers built on top of them.

pub mod error;
pub mod http_util;
pub mod schema;
pub mod store;

pub mod comments;
pub mod folders;
pub mod lists;
pub mod spaces;
pub mod tasks;
pub mod users;
pub mod workspaces;

pub use error::ServiceError;
pub use schema::{Document, EntityKind};
pub use store::{DocumentStore, Filter, Stored};
