//! Validation of raw tool calls into [`Action`]s.
//!
//! The resolver hands back `(tool name, argument object)` pairs straight from
//! the model. Everything is checked here, before any document is opened:
//! unknown tags, missing or mistyped fields, and `write_range` payloads that
//! are not a JSON array-of-arrays.

use serde_json::{Map, Value};

use crate::action::Action;
use crate::error::{ActionError, Result};
use crate::schema;

/// Validate a `(tool name, arguments)` pair into an [`Action`].
///
/// `write_range` accepts its row data either as a `values_json` string (the
/// shape the tool schema asks the model for) or as an inline `values` array;
/// both are parsed and normalized into rows of text. Scalar cells (numbers,
/// booleans) are coerced to their text form, nulls to empty text, and ragged
/// rows are tolerated.
///
/// # Errors
///
/// [`ActionError::UnknownAction`] if `name` is not a tool in the vocabulary;
/// [`ActionError::InvalidParameters`] for any argument-level problem.
pub fn from_tool_call(name: &str, arguments: &Value) -> Result<Action> {
    if !schema::is_known_tool(name) {
        return Err(ActionError::UnknownAction(name.to_string()));
    }

    let mut object = match arguments {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        other => {
            return Err(ActionError::InvalidParameters(format!(
                "expected an argument object for '{}', got {}",
                name,
                type_name(other)
            )))
        }
    };

    if name == "write_range" {
        let raw = object
            .remove("values_json")
            .or_else(|| object.remove("values"))
            .ok_or_else(|| {
                ActionError::InvalidParameters(
                    "write_range requires a 'values_json' argument".to_string(),
                )
            })?;
        let rows = parse_rows(&raw)?;
        object.insert(
            "values".to_string(),
            serde_json::to_value(rows).map_err(|e| {
                ActionError::InvalidParameters(format!("values payload not serializable: {e}"))
            })?,
        );
    }

    object.insert("action".to_string(), Value::String(name.to_string()));

    serde_json::from_value(Value::Object(object))
        .map_err(|e| ActionError::InvalidParameters(e.to_string()))
}

/// Parse a values payload into rows of text.
///
/// Accepts either a JSON string encoding an array-of-arrays, or the array
/// directly.
fn parse_rows(raw: &Value) -> Result<Vec<Vec<String>>> {
    let parsed;
    let array = match raw {
        Value::String(s) => {
            parsed = serde_json::from_str::<Value>(s).map_err(|_| {
                ActionError::InvalidParameters(
                    "the 'values_json' argument is not a valid JSON string".to_string(),
                )
            })?;
            &parsed
        }
        other => other,
    };

    let rows = array.as_array().ok_or_else(not_list_of_lists)?;

    rows.iter()
        .map(|row| {
            row.as_array()
                .ok_or_else(not_list_of_lists)?
                .iter()
                .map(coerce_cell)
                .collect()
        })
        .collect()
}

fn not_list_of_lists() -> ActionError {
    ActionError::InvalidParameters(
        "the 'values_json' argument must be a JSON list of lists".to_string(),
    )
}

/// Coerce one cell of a values payload to text.
fn coerce_cell(cell: &Value) -> Result<String> {
    match cell {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(ActionError::InvalidParameters(
            "values cells must be scalars".to_string(),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
