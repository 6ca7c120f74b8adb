use crate::schema::json::{ObjectSchema, Prop};
use crate::schema::{Choice, Document, EntityKind, FieldReader, Fields, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Done,
}

impl Choice for TaskStatus {
    const VALUES: &'static [&'static str] = &["todo", "in_progress", "review", "done"];

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(TaskStatus::Todo),
            "in_progress" => Some(TaskStatus::InProgress),
            "review" => Some(TaskStatus::Review),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    #[default]
    None,
    Low,
    Medium,
    High,
    Urgent,
}

impl Choice for TaskPriority {
    const VALUES: &'static [&'static str] = &["none", "low", "medium", "high", "urgent"];

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "none" => Some(TaskPriority::None),
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            "urgent" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }
}

/// Task domain model - a unit of work inside a list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    pub title: String,
    pub description: Option<String>,
    /// Free-form; not checked against existing lists.
    pub list_id: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,

    /// User ids
    #[serde(default)]
    pub assignees: Vec<String>,

    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn validate(fields: &Fields) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(fields);
        let task = Task {
            title: r.required_str("title"),
            description: r.optional_str("description"),
            list_id: r.required_str("list_id"),
            status: r.choice_or("status", TaskStatus::default()),
            priority: r.choice_or("priority", TaskPriority::default()),
            assignees: r.str_list("assignees"),
            due_date: r.optional_timestamp("due_date"),
            tags: r.str_list("tags"),
        };
        r.finish(Self::KIND.name(), task)
    }

    fn json_schema() -> serde_json::Value {
        ObjectSchema::new(Self::KIND.name())
            .required("title", Prop::string())
            .optional("description", Prop::nullable_string())
            .required("list_id", Prop::string().describe("List id (string)"))
            .optional("status", Prop::choice(TaskStatus::VALUES, "todo"))
            .optional("priority", Prop::choice(TaskPriority::VALUES, "none"))
            .optional("assignees", Prop::string_list().describe("User ids"))
            .optional("due_date", Prop::nullable_datetime())
            .optional("tags", Prop::string_list())
            .build()
    }
}
