use crate::schema::json::{ObjectSchema, Prop};
use crate::schema::{Document, EntityKind, FieldReader, Fields, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub is_active: bool,
}

impl Document for User {
    const KIND: EntityKind = EntityKind::User;

    fn validate(fields: &Fields) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(fields);
        let user = User {
            name: r.required_str("name"),
            email: r.required_str("email"),
            avatar_url: r.optional_str("avatar_url"),
            is_active: r.bool_or("is_active", true),
        };
        r.finish(Self::KIND.name(), user)
    }

    fn json_schema() -> serde_json::Value {
        ObjectSchema::new(Self::KIND.name())
            .required("name", Prop::string().describe("Full name"))
            .required("email", Prop::string().describe("Email address"))
            .optional("avatar_url", Prop::nullable_string().describe("Avatar image URL"))
            .optional("is_active", Prop::boolean(true).describe("Whether the user is active"))
            .build()
    }
}
