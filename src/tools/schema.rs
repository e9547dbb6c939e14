//! Declarative input schemas for tools.
//!
//! Each tool declares its parameters as data: a [`FieldSpec`] per field with
//! a kind, a required flag, and an ordered list of constraints. One generic
//! [`validate`] function interprets the specs, so no tool carries bespoke
//! validation code. Constraints run left-to-right and the first failure wins;
//! later constraints are not evaluated.

use std::collections::HashMap;

use serde_json::{json, Value};
use thiserror::Error;

/// The raw shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form string.
    Text,
    /// String that must parse as a decimal number (amounts keep their
    /// original text so no precision is lost downstream).
    DecimalText,
    /// Boolean flag.
    Flag,
}

/// One predicate + message pair, evaluated against a decimal field.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub check: Check,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum Check {
    GreaterThan(f64),
    AtMost(f64),
    /// Digits with an optional single fractional part (`^\d+(\.\d+)?$`).
    DecimalFormat,
}

/// Declarative description of one tool parameter.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub required: bool,
    pub description: String,
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    pub fn text(description: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Text,
            required: false,
            description: description.into(),
            constraints: Vec::new(),
        }
    }

    pub fn decimal(description: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::DecimalText,
            required: false,
            description: description.into(),
            constraints: Vec::new(),
        }
    }

    pub fn flag(description: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Flag,
            required: false,
            description: description.into(),
            constraints: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn greater_than(mut self, bound: f64, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint {
            check: Check::GreaterThan(bound),
            message: message.into(),
        });
        self
    }

    pub fn at_most(mut self, bound: f64, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint {
            check: Check::AtMost(bound),
            message: message.into(),
        });
        self
    }

    pub fn decimal_format(mut self, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint {
            check: Check::DecimalFormat,
            message: message.into(),
        });
        self
    }

    /// JSON Schema fragment for `tools/list`.
    pub fn to_json_schema(&self) -> Value {
        let ty = match self.kind {
            FieldKind::Text | FieldKind::DecimalText => "string",
            FieldKind::Flag => "boolean",
        };
        json!({ "type": ty, "description": self.description })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("'{field}' is required")]
    MissingField { field: String },
    #[error("'{field}' must be a valid number")]
    NotANumber { field: String },
    #[error("{message}")]
    ConstraintViolation { field: String, message: String },
    #[error("{message}")]
    PatternMismatch { field: String, message: String },
}

/// A field value that passed every declared constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Decimal(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Decimal(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }
}

/// Arguments for one dispatch, keyed by field name. Lives only for the call.
#[derive(Debug, Default)]
pub struct ValidatedArgs(HashMap<String, FieldValue>);

impl ValidatedArgs {
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }
}

fn is_decimal_format(raw: &str) -> bool {
    match raw.split_once('.') {
        None => !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()),
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

/// Validates one raw value against its spec. Pure: no side effects, identical
/// inputs always produce identical results.
///
/// Returns `Ok(None)` when an optional field is absent. On failure exactly
/// one error is reported, corresponding to the first unmet requirement in
/// declaration order.
pub fn validate(
    field: &str,
    spec: &FieldSpec,
    raw: Option<&Value>,
) -> Result<Option<FieldValue>, ValidationError> {
    let raw = match raw {
        Some(Value::Null) | None => {
            if spec.required {
                return Err(ValidationError::MissingField {
                    field: field.to_string(),
                });
            }
            return Ok(None);
        }
        Some(v) => v,
    };

    match spec.kind {
        FieldKind::Flag => match raw.as_bool() {
            Some(b) => Ok(Some(FieldValue::Flag(b))),
            None => Err(ValidationError::ConstraintViolation {
                field: field.to_string(),
                message: format!("'{field}' must be a boolean"),
            }),
        },
        FieldKind::Text => {
            let s = raw
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| raw.to_string());
            if s.is_empty() && spec.required {
                return Err(ValidationError::MissingField {
                    field: field.to_string(),
                });
            }
            Ok(Some(FieldValue::Text(s)))
        }
        FieldKind::DecimalText => {
            // Numbers arriving as JSON numbers are accepted as their text form.
            let s = match raw {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            if s.is_empty() {
                if spec.required {
                    return Err(ValidationError::MissingField {
                        field: field.to_string(),
                    });
                }
                return Ok(None);
            }
            let parsed: f64 = s.parse().map_err(|_| ValidationError::NotANumber {
                field: field.to_string(),
            })?;
            for constraint in &spec.constraints {
                let failed = match constraint.check {
                    Check::GreaterThan(bound) => !(parsed > bound),
                    Check::AtMost(bound) => !(parsed <= bound),
                    Check::DecimalFormat => !is_decimal_format(&s),
                };
                if failed {
                    return Err(match constraint.check {
                        Check::DecimalFormat => ValidationError::PatternMismatch {
                            field: field.to_string(),
                            message: constraint.message.clone(),
                        },
                        _ => ValidationError::ConstraintViolation {
                            field: field.to_string(),
                            message: constraint.message.clone(),
                        },
                    });
                }
            }
            Ok(Some(FieldValue::Decimal(s)))
        }
    }
}
