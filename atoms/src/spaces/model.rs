use crate::schema::json::{ObjectSchema, Prop};
use crate::schema::{Document, EntityKind, FieldReader, Fields, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Space {
    pub name: String,
    pub workspace_id: String,
    pub color: Option<String>,
}

impl Document for Space {
    const KIND: EntityKind = EntityKind::Space;

    fn validate(fields: &Fields) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(fields);
        let space = Space {
            name: r.required_str("name"),
            workspace_id: r.required_str("workspace_id"),
            color: r.optional_str("color"),
        };
        r.finish(Self::KIND.name(), space)
    }

    fn json_schema() -> serde_json::Value {
        ObjectSchema::new(Self::KIND.name())
            .required("name", Prop::string())
            .required("workspace_id", Prop::string().describe("Workspace id (string)"))
            .optional("color", Prop::nullable_string())
            .build()
    }
}
