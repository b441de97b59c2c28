//! Field-level validation result types.
//!
//! Validation never stops at the first problem: every violation found in a
//! payload is collected into [`ValidationErrors`] so the client can fix them
//! all in one round trip.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name used for violations that concern the payload as a whole.
pub const ROOT_FIELD: &str = "body";

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// All violations found while validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.violations.push(FieldViolation {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether any violation was recorded against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Fold in the outcome of the rule checks, skipping fields that already
    /// failed extraction (their placeholder values would only add noise).
    pub(crate) fn merge_rules(&mut self, outcome: Result<(), validator::ValidationErrors>) {
        let Err(rules) = outcome else {
            return;
        };
        let fresh: Vec<FieldViolation> = ValidationErrors::from(rules)
            .violations
            .into_iter()
            .filter(|v| !self.has_field(&v.field))
            .collect();
        self.violations.extend(fresh);
    }

    /// `Ok(value)` when nothing was recorded, `Err(self)` otherwise.
    pub(crate) fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = ValidationErrors::new();
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, field_errors) in fields {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} failed the `{}` rule", err.code));
                out.push(field.to_string(), err.code.to_string(), message);
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Payload helpers
// ---------------------------------------------------------------------------

/// Borrow the payload as a JSON object, recording a violation otherwise.
pub(crate) fn as_object<'a>(
    input: &'a Value,
    errors: &mut ValidationErrors,
) -> Option<&'a Map<String, Value>> {
    match input.as_object() {
        Some(obj) => Some(obj),
        None => {
            errors.push(ROOT_FIELD, "invalid_type", "expected a JSON object");
            None
        }
    }
}

/// Record a violation for every key that is not in `known`.
pub(crate) fn reject_unknown_fields(
    obj: &Map<String, Value>,
    known: &[&str],
    errors: &mut ValidationErrors,
) {
    for key in obj.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(
                key.as_str(),
                "unrecognized_key",
                format!("unknown field `{key}`"),
            );
        }
    }
}

/// Deserialize `name` from the object if present.
///
/// Absent keys yield `None` without a violation; present keys of the wrong
/// shape (including explicit `null`) yield `None` and an `invalid_type`
/// violation.
pub(crate) fn optional_field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let value = obj.get(name)?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            errors.push(name, "invalid_type", e.to_string());
            None
        }
    }
}

/// Like [`optional_field`], but an absent key is a `required` violation.
pub(crate) fn required_field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    if !obj.contains_key(name) {
        errors.push(name, "required", format!("{name} is required"));
        return None;
    }
    optional_field(obj, name, errors)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
