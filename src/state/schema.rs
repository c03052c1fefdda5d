//! Structured decoding of stored state and shortcut documents.
//!
//! Decoding is explicit: every required field is checked for presence and
//! type, and all failures are collected per field before returning.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::state::{Row, ShortcutTable, State};

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";
const NOT_STRING: &str = "Not a valid string.";
const NOT_LIST: &str = "Not a valid list.";
const NOT_MAPPING: &str = "Not a valid mapping type.";
const SCHEMA_KEY: &str = "_schema";

#[derive(Debug, Error)]
pub enum SchemaValidationError {
    #[error("malformed document: {message}")]
    Syntax { message: String },
    #[error("invalid document: {}", format_messages(.messages))]
    Fields {
        messages: BTreeMap<String, Vec<String>>,
    },
}

impl SchemaValidationError {
    pub fn messages(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Self::Fields { messages } => Some(messages),
            Self::Syntax { .. } => None,
        }
    }
}

fn format_messages(messages: &BTreeMap<String, Vec<String>>) -> String {
    messages
        .iter()
        .map(|(field, errors)| format!("{field}: {}", errors.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Converts raw document text into a typed record and back.
pub trait Deserializer<T> {
    fn load(&self, raw: &str) -> Result<T, SchemaValidationError>;
    fn dump(&self, record: &T) -> Result<String, SchemaValidationError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StateSchema;

impl Deserializer<State> for StateSchema {
    fn load(&self, raw: &str) -> Result<State, SchemaValidationError> {
        let value = parse(raw)?;
        let mut fields = FieldReader::new(&value)?;
        let name = fields.string("name");
        let validation_query = fields.string("validation_query");
        let properties = fields.string_list("properties");
        let results = fields.rows("results");
        fields.finish()?;

        match (name, validation_query, properties, results) {
            (Some(name), Some(query), Some(properties), Some(results)) => {
                Ok(State::new(name, query, properties, results))
            }
            _ => Err(internal_incomplete()),
        }
    }

    fn dump(&self, record: &State) -> Result<String, SchemaValidationError> {
        render(record)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutSchema;

impl Deserializer<ShortcutTable> for ShortcutSchema {
    fn load(&self, raw: &str) -> Result<ShortcutTable, SchemaValidationError> {
        let value = parse(raw)?;
        let mut fields = FieldReader::new(&value)?;
        let name = fields.string("name");
        let shortcuts = fields.string_map("shortcuts");
        fields.finish()?;

        match (name, shortcuts) {
            (Some(name), Some(shortcuts)) => Ok(ShortcutTable { name, shortcuts }),
            _ => Err(internal_incomplete()),
        }
    }

    fn dump(&self, record: &ShortcutTable) -> Result<String, SchemaValidationError> {
        render(record)
    }
}

fn parse(raw: &str) -> Result<Value, SchemaValidationError> {
    serde_json::from_str(raw).map_err(|e| SchemaValidationError::Syntax {
        message: e.to_string(),
    })
}

fn render<T: Serialize>(record: &T) -> Result<String, SchemaValidationError> {
    serde_json::to_string_pretty(record).map_err(|e| SchemaValidationError::Syntax {
        message: e.to_string(),
    })
}

// Only reachable if a reader returned None without recording a message.
fn internal_incomplete() -> SchemaValidationError {
    let mut messages = BTreeMap::new();
    messages.insert(
        SCHEMA_KEY.to_string(),
        vec!["Document is incomplete.".to_string()],
    );
    SchemaValidationError::Fields { messages }
}

struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    messages: BTreeMap<String, Vec<String>>,
}

impl<'a> FieldReader<'a> {
    fn new(value: &'a Value) -> Result<Self, SchemaValidationError> {
        let Value::Object(object) = value else {
            let mut messages = BTreeMap::new();
            messages.insert(
                SCHEMA_KEY.to_string(),
                vec!["Invalid input type.".to_string()],
            );
            return Err(SchemaValidationError::Fields { messages });
        };
        Ok(Self {
            object,
            messages: BTreeMap::new(),
        })
    }

    fn error(&mut self, field: impl Into<String>, message: &str) {
        self.messages
            .entry(field.into())
            .or_default()
            .push(message.to_string());
    }

    fn required(&mut self, field: &str) -> Option<&'a Value> {
        match self.object.get(field) {
            None => {
                self.error(field, MISSING);
                None
            }
            Some(Value::Null) => {
                self.error(field, NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        match self.required(field)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.error(field, NOT_STRING);
                None
            }
        }
    }

    fn string_list(&mut self, field: &str) -> Option<Vec<String>> {
        let Value::Array(items) = self.required(field)? else {
            self.error(field, NOT_LIST);
            return None;
        };
        self.strings_at(field, items)
    }

    fn rows(&mut self, field: &str) -> Option<Vec<Row>> {
        let Value::Array(items) = self.required(field)? else {
            self.error(field, NOT_LIST);
            return None;
        };
        let mut rows = Vec::with_capacity(items.len());
        let mut valid = true;
        for (index, item) in items.iter().enumerate() {
            let path = format!("{field}.{index}");
            match item {
                Value::Array(fields) => match self.strings_at(&path, fields) {
                    Some(row) => rows.push(row),
                    None => valid = false,
                },
                _ => {
                    self.error(path, NOT_LIST);
                    valid = false;
                }
            }
        }
        valid.then_some(rows)
    }

    fn string_map(&mut self, field: &str) -> Option<BTreeMap<String, String>> {
        let Value::Object(entries) = self.required(field)? else {
            self.error(field, NOT_MAPPING);
            return None;
        };
        let mut out = BTreeMap::new();
        let mut valid = true;
        for (key, value) in entries {
            match value {
                Value::String(s) => {
                    out.insert(key.clone(), s.clone());
                }
                _ => {
                    self.error(format!("{field}.{key}"), NOT_STRING);
                    valid = false;
                }
            }
        }
        valid.then_some(out)
    }

    fn strings_at(&mut self, path: &str, items: &[Value]) -> Option<Vec<String>> {
        let mut out = Vec::with_capacity(items.len());
        let mut valid = true;
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                _ => {
                    self.error(format!("{path}.{index}"), NOT_STRING);
                    valid = false;
                }
            }
        }
        valid.then_some(out)
    }

    fn finish(self) -> Result<(), SchemaValidationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::Fields {
                messages: self.messages,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Deserializer, SchemaValidationError, ShortcutSchema, StateSchema};

    #[test]
    fn decodes_state_document() {
        let raw = json!({
            "name": "unencrypted_instances",
            "validation_query": "MATCH (n:EC2Instance) RETURN n.id, n.tags",
            "properties": ["n.id", "n.tags"],
            "results": [["i-1", "env|prod"], ["i-2", "env"]]
        })
        .to_string();
        let state = StateSchema.load(&raw).expect("state should decode");
        assert_eq!(state.name, "unencrypted_instances");
        assert_eq!(state.properties, vec!["n.id", "n.tags"]);
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.results[0], vec!["i-1", "env|prod"]);
    }

    #[test]
    fn reports_every_missing_field() {
        let raw = json!({ "name": "check" }).to_string();
        let err = StateSchema.load(&raw).expect_err("decode should fail");
        let messages = err.messages().expect("field messages");
        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages["validation_query"],
            vec!["Missing data for required field."]
        );
        assert!(messages.contains_key("properties"));
        assert!(messages.contains_key("results"));
    }

    #[test]
    fn reports_wrong_types_with_positions() {
        let raw = json!({
            "name": 7,
            "validation_query": "q",
            "properties": ["a", null],
            "results": [["x", 1], "y"]
        })
        .to_string();
        let err = StateSchema.load(&raw).expect_err("decode should fail");
        let messages = err.messages().expect("field messages");
        assert_eq!(messages["name"], vec!["Not a valid string."]);
        assert_eq!(messages["properties.1"], vec!["Not a valid string."]);
        assert_eq!(messages["results.0.1"], vec!["Not a valid string."]);
        assert_eq!(messages["results.1"], vec!["Not a valid list."]);
    }

    #[test]
    fn null_field_is_rejected() {
        let raw = json!({
            "name": null,
            "validation_query": "q",
            "properties": [],
            "results": []
        })
        .to_string();
        let err = StateSchema.load(&raw).expect_err("decode should fail");
        assert_eq!(
            err.messages().expect("field messages")["name"],
            vec!["Field may not be null."]
        );
    }

    #[test]
    fn non_json_is_a_syntax_error() {
        let err = StateSchema.load("not json").expect_err("decode should fail");
        assert!(matches!(err, SchemaValidationError::Syntax { .. }));
        let err = StateSchema.load("[1, 2]").expect_err("decode should fail");
        assert!(err.messages().expect("field messages").contains_key("_schema"));
    }

    #[test]
    fn shortcut_table_round_trips_through_dump() {
        let raw = json!({
            "name": "queries",
            "shortcuts": { "latest": "2023-01-01.json" }
        })
        .to_string();
        let table = ShortcutSchema.load(&raw).expect("table should decode");
        assert_eq!(table.resolve("latest"), "2023-01-01.json");
        let dumped = ShortcutSchema.dump(&table).expect("dump");
        assert_eq!(ShortcutSchema.load(&dumped).expect("reload"), table);
    }

    #[test]
    fn shortcut_targets_must_be_strings() {
        let raw = json!({ "name": "queries", "shortcuts": { "latest": 3 } }).to_string();
        let err = ShortcutSchema.load(&raw).expect_err("decode should fail");
        assert_eq!(
            err.messages().expect("field messages")["shortcuts.latest"],
            vec!["Not a valid string."]
        );
    }
}
