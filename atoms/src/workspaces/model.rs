use crate::schema::json::{ObjectSchema, Prop};
use crate::schema::{Document, EntityKind, FieldReader, Fields, ValidationError};
use serde::{Deserialize, Serialize};

/// Top-level container for lists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Workspace {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    /// User ids, empty when not supplied.
    #[serde(default)]
    pub members: Vec<String>,
}

impl Document for Workspace {
    const KIND: EntityKind = EntityKind::Workspace;

    fn validate(fields: &Fields) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(fields);
        let workspace = Workspace {
            name: r.required_str("name"),
            description: r.optional_str("description"),
            owner_id: r.optional_str("owner_id"),
            members: r.str_list("members"),
        };
        r.finish(Self::KIND.name(), workspace)
    }

    fn json_schema() -> serde_json::Value {
        ObjectSchema::new(Self::KIND.name())
            .required("name", Prop::string().describe("Workspace name"))
            .optional("description", Prop::nullable_string().describe("Workspace description"))
            .optional("owner_id", Prop::nullable_string().describe("Owner user id (string)"))
            .optional("members", Prop::string_list().describe("User ids that are members"))
            .build()
    }
}
