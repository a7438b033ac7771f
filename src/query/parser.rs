use serde_json::{Map, Value};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{BookRecord, Command, Query};

pub const INSERT_TAG: &str = "INSERT";

/// Parser for command lines (`OPERATION;<json>`) and query lines (`<json>`).
///
/// Field extraction never fails: a missing or mistyped field falls back to its
/// default (`""`, `0.0`, `0`). Only JSON syntax (`Parse`), or a line that is not
/// UTF-8 or whose payload is not an object (`InvalidInput`), is an error.
#[derive(Debug, Clone)]
pub struct LineParser {
    pub separator: char,
    pub insert_tag: String,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    pub fn new() -> Self {
        LineParser {
            separator: ';',
            insert_tag: INSERT_TAG.to_string(),
        }
    }

    /// Parse one load instruction.
    /// - `INSERT;{"isbn":"1","name":"A"}` -> Insert
    /// - `DELETE;{"isbn":"1"}` -> Ignored("DELETE")
    /// - `INSERT;{"isbn":` -> Parse error
    ///
    /// The payload is parsed before the tag is inspected, so a malformed payload
    /// is reported whatever the tag.
    pub fn parse_command(&self, line: &str) -> Result<Command> {
        let (operation, payload) = line.split_once(self.separator).unwrap_or((line, ""));
        let fields = parse_object(payload)?;

        if operation != self.insert_tag {
            return Ok(Command::Ignored(operation.to_string()));
        }

        Ok(Command::Insert(BookRecord {
            isbn: text_field(&fields, "isbn"),
            name: text_field(&fields, "name"),
            author: text_field(&fields, "author"),
            category: text_field(&fields, "category"),
            price: real_field(&fields, "price"),
            quantity: integer_field(&fields, "quantity"),
        }))
    }

    pub fn parse_query(&self, line: &str) -> Result<Query> {
        let fields = parse_object(line)?;
        Ok(Query::new(text_field(&fields, "name")))
    }
}

/// Raw line bytes as text. Sources are read as bytes so one bad line cannot stop a batch.
pub fn decode_line(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        Error::new(ErrorKind::InvalidInput, format!("line is not valid UTF-8: {}", e))
    })
}

fn parse_object(payload: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(payload)? {
        Value::Object(fields) => Ok(fields),
        other => Err(Error::new(
            ErrorKind::InvalidInput,
            format!("expected a JSON object, found {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn real_field(fields: &Map<String, Value>, key: &str) -> f64 {
    fields.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Integral floats such as `5.0` count as integers; `2.5` does not.
fn integer_field(fields: &Map<String, Value>, key: &str) -> i64 {
    let Some(value) = fields.get(key) else {
        return 0;
    };
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .unwrap_or(0)
}
