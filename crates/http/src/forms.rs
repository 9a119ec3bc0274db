//! Per-field validation errors collected by form validators.

use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Accumulated field-level validation failures for one submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Detail objects for the JSON error envelope.
    pub fn details(&self) -> Vec<serde_json::Value> {
        self.0
            .iter()
            .map(|e| json!({"field": e.field, "error": e.message}))
            .collect()
    }
}

/// Presence check for an optional form field; pushes a "required" error
/// and returns an empty string when the field is absent or empty.
pub fn required(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &Option<String>,
) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push(field, "This field is required");
            String::new()
        }
    }
}
