use crate::schema::json::{ObjectSchema, Prop};
use crate::schema::{Document, EntityKind, FieldReader, Fields, ValidationError};
use serde::{Deserialize, Serialize};

/// Comment on a task. `task_id` and `author_id` are not checked against
/// existing documents.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Comment {
    pub task_id: String,
    pub author_id: Option<String>,
    pub body: String,
}

impl Document for Comment {
    const KIND: EntityKind = EntityKind::Comment;

    fn validate(fields: &Fields) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(fields);
        let comment = Comment {
            task_id: r.required_str("task_id"),
            author_id: r.optional_str("author_id"),
            body: r.required_str("body"),
        };
        r.finish(Self::KIND.name(), comment)
    }

    fn json_schema() -> serde_json::Value {
        ObjectSchema::new(Self::KIND.name())
            .required("task_id", Prop::string().describe("Related task id (string)"))
            .optional("author_id", Prop::nullable_string())
            .required("body", Prop::string())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn author_is_optional() {
        let fields = json!({"task_id": "T1", "body": "LGTM"}).as_object().cloned().unwrap_or_default();
        let comment = Comment::validate(&fields).unwrap();
        assert_eq!(comment.author_id, None);
        assert_eq!(comment.body, "LGTM");
    }
}
