//! Record shapes shared by every entity kind.
//!
//! Each entity implements [`Document`]: an explicit validate-then-construct
//! function over a JSON object, a JSON-Schema-like description, and a static
//! [`EntityKind`] that decides the collection it is persisted in.

pub mod json;
pub mod validate;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub use validate::{Choice, FieldReader, FieldViolation, ValidationError, ViolationKind};

/// Untyped input to validation: field name to JSON value.
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Workspace,
    Space,
    Folder,
    List,
    Task,
    Comment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::User,
        EntityKind::Workspace,
        EntityKind::Space,
        EntityKind::Folder,
        EntityKind::List,
        EntityKind::Task,
        EntityKind::Comment,
    ];

    /// Record type name, used as the schema title and in validation messages.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Workspace => "Workspace",
            EntityKind::Space => "Space",
            EntityKind::Folder => "Folder",
            EntityKind::List => "ListModel",
            EntityKind::Task => "Task",
            EntityKind::Comment => "Comment",
        }
    }

    /// Collection (DynamoDB partition) the kind is stored under.
    /// Always the lower-cased record type name.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Workspace => "workspace",
            EntityKind::Space => "space",
            EntityKind::Folder => "folder",
            EntityKind::List => "listmodel",
            EntityKind::Task => "task",
            EntityKind::Comment => "comment",
        }
    }

    /// Key under which the kind is published by `GET /schema`.
    pub fn schema_key(self) -> &'static str {
        match self {
            EntityKind::List => "list",
            other => other.collection(),
        }
    }
}

/// A persistable record shape.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Sized {
    const KIND: EntityKind;

    /// Builds a fully populated record, applying defaults for absent
    /// optional fields, or reports every violated field.
    fn validate(fields: &Fields) -> Result<Self, ValidationError>;

    fn json_schema() -> Value;
}
