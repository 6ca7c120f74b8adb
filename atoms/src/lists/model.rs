use crate::schema::json::{ObjectSchema, Prop};
use crate::schema::{Document, EntityKind, FieldReader, Fields, ValidationError};
use serde::{Deserialize, Serialize};

/// A list of tasks. Every parent link is optional; no hierarchy is enforced.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct List {
    pub name: String,
    pub workspace_id: Option<String>,
    pub space_id: Option<String>,
    pub folder_id: Option<String>,
    pub color: Option<String>,
}

impl Document for List {
    const KIND: EntityKind = EntityKind::List;

    fn validate(fields: &Fields) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(fields);
        let list = List {
            name: r.required_str("name"),
            workspace_id: r.optional_str("workspace_id"),
            space_id: r.optional_str("space_id"),
            folder_id: r.optional_str("folder_id"),
            color: r.optional_str("color"),
        };
        r.finish(Self::KIND.name(), list)
    }

    fn json_schema() -> serde_json::Value {
        ObjectSchema::new(Self::KIND.name())
            .required("name", Prop::string())
            .optional("workspace_id", Prop::nullable_string().describe("Workspace id (string)"))
            .optional("space_id", Prop::nullable_string().describe("Space id (string)"))
            .optional("folder_id", Prop::nullable_string().describe("Folder id (string)"))
            .optional("color", Prop::nullable_string())
            .build()
    }
}
