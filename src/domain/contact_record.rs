//! The validated name/email pair extracted from a request body.

use serde_json::Value;

use crate::error::SubmitError;

/// A contact submission that passed validation.
///
/// Both fields are guaranteed non-empty. Nothing else is checked: the
/// email is not parsed for syntax and duplicates are not detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    name: String,
    email: String,
}

impl ContactRecord {
    /// Creates a record from already-extracted strings.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::MissingFields`] if either value is empty.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, SubmitError> {
        let name = name.into();
        let email = email.into();
        if name.is_empty() || email.is_empty() {
            return Err(SubmitError::MissingFields);
        }
        Ok(Self { name, email })
    }

    /// Extracts `name` and `email` from a parsed request body.
    ///
    /// A field counts as missing when it is absent or falsy: `null`,
    /// `false`, `0`, `""`, `[]` or `{}`. Presence of both fields is checked
    /// before their types, so `{}` reports missing fields rather than a
    /// type error. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::ExpectedObject`] if `value` is not an object.
    /// - [`SubmitError::MissingFields`] if either field is missing or falsy.
    /// - [`SubmitError::FieldNotString`] if a present field is not a string.
    pub fn from_json(value: &Value) -> Result<Self, SubmitError> {
        let Value::Object(fields) = value else {
            return Err(SubmitError::ExpectedObject(json_kind(value)));
        };

        let name = fields.get("name").filter(|v| is_truthy(v));
        let email = fields.get("email").filter(|v| is_truthy(v));
        let (Some(name), Some(email)) = (name, email) else {
            return Err(SubmitError::MissingFields);
        };

        let name = name.as_str().ok_or(SubmitError::FieldNotString("name"))?;
        let email = email.as_str().ok_or(SubmitError::FieldNotString("email"))?;

        Self::new(name, email)
    }

    /// The submitted name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The submitted email address, unvalidated.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
