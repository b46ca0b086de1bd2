//! Structural validation of call-control documents.
//!
//! A document is either a single action object or a non-empty array of them.
//! Each action object must name a known action in its `action` field.

use serde_json::Value;
use thiserror::Error;

pub const KNOWN_ACTIONS: &[&str] = &["talk", "stream", "input", "record", "conversation", "connect", "notify"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ncco must be an action object or an array of action objects")]
    InvalidShape,
    #[error("ncco must contain at least one action")]
    Empty,
    #[error("action at index {0} is not an object")]
    NotAnObject(usize),
    #[error("action at index {0} is missing a string 'action' field")]
    MissingAction(usize),
    #[error("action at index {index} has unknown type '{action}'")]
    UnknownAction { index: usize, action: String },
}

/// Validate `ncco`, returning the document to store.
pub fn validate(ncco: Value) -> Result<Value, ValidationError> {
    match &ncco {
        Value::Object(_) => validate_action(0, &ncco)?,
        Value::Array(actions) => {
            if actions.is_empty() {
                return Err(ValidationError::Empty);
            }
            for (index, action) in actions.iter().enumerate() {
                validate_action(index, action)?;
            }
        }
        _ => return Err(ValidationError::InvalidShape),
    }
    Ok(ncco)
}

fn validate_action(index: usize, action: &Value) -> Result<(), ValidationError> {
    let obj = action.as_object().ok_or(ValidationError::NotAnObject(index))?;
    let name = obj
        .get("action")
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingAction(index))?;
    if !KNOWN_ACTIONS.contains(&name) {
        return Err(ValidationError::UnknownAction { index, action: name.to_string() });
    }
    Ok(())
}
