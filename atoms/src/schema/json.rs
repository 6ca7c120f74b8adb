//! JSON-Schema-like descriptions published by `GET /schema`.

use serde_json::{json, Map, Value};

/// Builder for an object schema. Property titles are derived from field
/// names (`avatar_url` -> `Avatar Url`).
pub struct ObjectSchema {
    title: &'static str,
    properties: Map<String, Value>,
    required: Vec<&'static str>,
}

impl ObjectSchema {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    pub fn required(mut self, name: &'static str, prop: Prop) -> Self {
        self.required.push(name);
        self.insert(name, prop)
    }

    pub fn optional(self, name: &'static str, prop: Prop) -> Self {
        self.insert(name, prop)
    }

    fn insert(mut self, name: &'static str, prop: Prop) -> Self {
        let mut body = prop.body;
        body.insert("title".to_string(), Value::String(field_title(name)));
        if let Some(description) = prop.description {
            body.insert("description".to_string(), Value::String(description.to_string()));
        }
        self.properties.insert(name.to_string(), Value::Object(body));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "title": self.title,
            "type": "object",
            "properties": self.properties,
            "required": self.required,
        })
    }
}

/// A single property description.
pub struct Prop {
    body: Map<String, Value>,
    description: Option<&'static str>,
}

impl Prop {
    fn from_value(value: Value) -> Self {
        let body = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            body,
            description: None,
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn string() -> Self {
        Self::from_value(json!({"type": "string"}))
    }

    pub fn nullable_string() -> Self {
        Self::from_value(json!({
            "anyOf": [{"type": "string"}, {"type": "null"}],
            "default": null,
        }))
    }

    pub fn boolean(default: bool) -> Self {
        Self::from_value(json!({"type": "boolean", "default": default}))
    }

    pub fn string_list() -> Self {
        Self::from_value(json!({"type": "array", "items": {"type": "string"}}))
    }

    pub fn choice(values: &[&str], default: &str) -> Self {
        Self::from_value(json!({"enum": values, "type": "string", "default": default}))
    }

    pub fn nullable_datetime() -> Self {
        Self::from_value(json!({
            "anyOf": [{"type": "string", "format": "date-time"}, {"type": "null"}],
            "default": null,
        }))
    }
}

fn field_title(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_titles_and_required_list() {
        let schema = ObjectSchema::new("User")
            .required("name", Prop::string())
            .optional("avatar_url", Prop::nullable_string().describe("Avatar image URL"))
            .build();

        assert_eq!(schema["title"], "User");
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(schema["properties"]["avatar_url"]["title"], "Avatar Url");
        assert_eq!(schema["properties"]["avatar_url"]["description"], "Avatar image URL");
        assert_eq!(schema["properties"]["avatar_url"]["default"], Value::Null);
    }
}
