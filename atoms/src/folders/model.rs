use crate::schema::json::{ObjectSchema, Prop};
use crate::schema::{Document, EntityKind, FieldReader, Fields, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Folder {
    pub name: String,
    pub space_id: String,
}

impl Document for Folder {
    const KIND: EntityKind = EntityKind::Folder;

    fn validate(fields: &Fields) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(fields);
        let folder = Folder {
            name: r.required_str("name"),
            space_id: r.required_str("space_id"),
        };
        r.finish(Self::KIND.name(), folder)
    }

    fn json_schema() -> serde_json::Value {
        ObjectSchema::new(Self::KIND.name())
            .required("name", Prop::string())
            .required("space_id", Prop::string().describe("Space id (string)"))
            .build()
    }
}
