use super::Fields;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    WrongType { expected: &'static str },
    NotAllowed { allowed: &'static [&'static str] },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Missing => write!(f, "field required"),
            ViolationKind::WrongType { expected } => write!(f, "input should be {}", expected),
            ViolationKind::NotAllowed { allowed } => {
                let quoted: Vec<String> = allowed.iter().map(|v| format!("'{}'", v)).collect();
                write!(f, "input should be one of {}", quoted.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Construction of a record was rejected. Lists every offending field.
#[derive(Debug, Clone, Error)]
#[error("{} validation error(s) for {entity}: {}", .violations.len(), join_violations(.violations))]
pub struct ValidationError {
    pub entity: &'static str,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A closed set of string values (task status, task priority).
pub trait Choice: Sized + Copy {
    const VALUES: &'static [&'static str];

    fn from_value(value: &str) -> Option<Self>;
}

/// Reads typed fields out of an untyped object, collecting violations
/// instead of stopping at the first one.
///
/// Accessors always return a value so the caller can assemble the record in
/// one expression; the record is discarded by [`FieldReader::finish`] when
/// anything was reported.
pub struct FieldReader<'a> {
    fields: &'a Fields,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Fields) -> Self {
        Self {
            fields,
            violations: Vec::new(),
        }
    }

    fn report(&mut self, field: impl Into<String>, kind: ViolationKind) {
        self.violations.push(FieldViolation {
            field: field.into(),
            kind,
        });
    }

    pub fn required_str(&mut self, name: &'static str) -> String {
        match self.fields.get(name) {
            None | Some(Value::Null) => {
                self.report(name, ViolationKind::Missing);
                String::new()
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.report(name, ViolationKind::WrongType { expected: "a string" });
                String::new()
            }
        }
    }

    pub fn optional_str(&mut self, name: &'static str) -> Option<String> {
        match self.fields.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.report(name, ViolationKind::WrongType { expected: "a string" });
                None
            }
        }
    }

    pub fn bool_or(&mut self, name: &'static str, default: bool) -> bool {
        match self.fields.get(name) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.report(name, ViolationKind::WrongType { expected: "a boolean" });
                default
            }
        }
    }

    /// Sequence of strings, empty when absent.
    pub fn str_list(&mut self, name: &'static str) -> Vec<String> {
        let items = match self.fields.get(name) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.report(name, ViolationKind::WrongType { expected: "a list" });
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                _ => self.report(
                    format!("{}[{}]", name, index),
                    ViolationKind::WrongType { expected: "a string" },
                ),
            }
        }
        out
    }

    pub fn choice_or<C: Choice>(&mut self, name: &'static str, default: C) -> C {
        match self.fields.get(name) {
            None => default,
            Some(Value::String(s)) => match C::from_value(s) {
                Some(choice) => choice,
                None => {
                    self.report(name, ViolationKind::NotAllowed { allowed: C::VALUES });
                    default
                }
            },
            Some(_) => {
                self.report(name, ViolationKind::NotAllowed { allowed: C::VALUES });
                default
            }
        }
    }

    pub fn optional_timestamp(&mut self, name: &'static str) -> Option<DateTime<Utc>> {
        match self.fields.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => {
                let parsed = parse_timestamp(value);
                if parsed.is_none() {
                    self.report(name, ViolationKind::WrongType { expected: "a valid datetime" });
                }
                parsed
            }
        }
    }

    pub fn finish<T>(self, entity: &'static str, record: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError {
                entity,
                violations: self.violations,
            })
        }
    }
}

/// RFC 3339, naive ISO 8601 (taken as UTC) or Unix seconds, integer or fractional.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            }),
        Value::Number(n) => match n.as_i64() {
            Some(secs) => DateTime::from_timestamp(secs, 0),
            None => n.as_f64().and_then(from_fractional_seconds),
        },
        _ => None,
    }
}

fn from_fractional_seconds(value: f64) -> Option<DateTime<Utc>> {
    let secs = value.floor();
    let nanos = ((value - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}
