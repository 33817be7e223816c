//! Typed per-field rules and their evaluation.
//!
//! A rule runs its checks in a fixed order: presence, type, trim, length,
//! format, custom. The first failing check ends evaluation of that field; other
//! fields are unaffected.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

use super::context::{Attachment, RequestContext};
use crate::error::{AppError, StatusError};
use crate::handlers::http::AppState;

/// Why a field failed.
#[derive(Debug)]
pub enum FieldFailure {
    /// Plain rule violation, aggregated into the 422 response.
    Invalid(String),
    /// Error that replaces the whole response (status error or unexpected).
    Abort(AppError),
}

impl FieldFailure {
    pub fn invalid(message: impl Into<String>) -> Self {
        FieldFailure::Invalid(message.into())
    }
}

impl From<AppError> for FieldFailure {
    fn from(e: AppError) -> Self {
        FieldFailure::Abort(e)
    }
}

impl From<StatusError> for FieldFailure {
    fn from(e: StatusError) -> Self {
        FieldFailure::Abort(AppError::Status(e))
    }
}

pub type CheckResult = Result<Option<Attachment>, FieldFailure>;

/// What a custom check can see besides the field value.
pub struct CheckContext<'a> {
    pub state: &'a AppState,
    /// Every raw field of the rule's location (e.g. the whole JSON body).
    pub input: &'a Value,
    /// Context produced by earlier stages of the same route.
    pub context: &'a RequestContext,
}

impl CheckContext<'_> {
    /// Raw string value of a sibling field, empty when absent or not a string.
    pub fn sibling_str(&self, field: &str) -> &str {
        self.input.get(field).and_then(Value::as_str).unwrap_or("")
    }
}

/// Asynchronous rule that may consult the store and attach derived state.
#[async_trait]
pub trait CustomCheck: Send + Sync {
    async fn check(&self, value: &Value, cx: &CheckContext<'_>) -> CheckResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absent or empty values fail with the message.
    Required(&'static str),
    /// Absent or empty values skip every other check.
    Optional,
    /// No presence check; the custom check decides what absence means.
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Array,
}

impl ValueKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Array => value.is_array(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Length {
    min: usize,
    max: usize,
    message: &'static str,
}

#[derive(Clone, Copy)]
struct Format {
    test: fn(&str) -> bool,
    message: &'static str,
}

fn is_email(s: &str) -> bool {
    s.validate_email()
}

fn is_url(s: &str) -> bool {
    s.validate_url()
}

/// Declarative rule for one request field.
#[derive(Clone)]
pub struct FieldRule {
    field: &'static str,
    presence: Presence,
    kind: Option<(ValueKind, &'static str)>,
    trim: bool,
    length: Option<Length>,
    format: Option<Format>,
    custom: Option<Arc<dyn CustomCheck>>,
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("presence", &self.presence)
            .field("kind", &self.kind)
            .field("trim", &self.trim)
            .field("length", &self.length)
            .field("format", &self.format.map(|f| f.message))
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            presence: Presence::Deferred,
            kind: None,
            trim: false,
            length: None,
            format: None,
            custom: None,
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn required(mut self, message: &'static str) -> Self {
        self.presence = Presence::Required(message);
        self
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub fn string(mut self, message: &'static str) -> Self {
        self.kind = Some((ValueKind::String, message));
        self
    }

    pub fn array(mut self, message: &'static str) -> Self {
        self.kind = Some((ValueKind::Array, message));
        self
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Character count bounds, inclusive.
    pub fn length(mut self, min: usize, max: usize, message: &'static str) -> Self {
        self.length = Some(Length { min, max, message });
        self
    }

    pub fn email(self, message: &'static str) -> Self {
        self.matches(is_email, message)
    }

    pub fn url(self, message: &'static str) -> Self {
        self.matches(is_url, message)
    }

    pub fn matches(mut self, test: fn(&str) -> bool, message: &'static str) -> Self {
        self.format = Some(Format { test, message });
        self
    }

    pub fn custom(mut self, check: impl CustomCheck + 'static) -> Self {
        self.custom = Some(Arc::new(check));
        self
    }

    /// Same checks under another field name.
    pub fn renamed(mut self, field: &'static str) -> Self {
        self.field = field;
        self
    }

    /// Run the rule against the raw value of its field.
    pub async fn evaluate(&self, raw: Option<&Value>, cx: &CheckContext<'_>) -> FieldOutcome {
        let mut value = raw.cloned().unwrap_or(Value::Null);
        let skipped = self.presence == Presence::Optional && is_empty(&value);
        let mut sanitized = None;
        let result = self.run_checks(&mut value, &mut sanitized, cx).await;
        FieldOutcome {
            field: self.field,
            sanitized,
            skipped,
            result,
        }
    }

    async fn run_checks(
        &self,
        value: &mut Value,
        sanitized: &mut Option<Value>,
        cx: &CheckContext<'_>,
    ) -> CheckResult {
        let empty = is_empty(value);
        match self.presence {
            Presence::Required(message) if empty => return Err(FieldFailure::invalid(message)),
            Presence::Optional if empty => return Ok(None),
            _ => {}
        }

        if let Some((kind, message)) = self.kind {
            if !empty && !kind.matches(value) {
                return Err(FieldFailure::invalid(message));
            }
        }

        if self.trim {
            if let Value::String(s) = value {
                let trimmed = s.trim().to_string();
                *s = trimmed;
                *sanitized = Some(Value::String(s.clone()));
            }
        }

        if let Value::String(s) = &*value {
            if let Some(len) = self.length {
                let n = s.chars().count();
                if n < len.min || n > len.max {
                    return Err(FieldFailure::invalid(len.message));
                }
            }
            if let Some(format) = self.format {
                if !(format.test)(s) {
                    return Err(FieldFailure::invalid(format.message));
                }
            }
        }

        match &self.custom {
            Some(check) => check.check(value, cx).await,
            None => Ok(None),
        }
    }
}

/// Clear the required flag of a shared rule, leaving every other check as is.
pub fn make_optional(rule: &FieldRule) -> FieldRule {
    rule.clone().optional()
}

/// Result of evaluating one field.
#[derive(Debug)]
pub struct FieldOutcome {
    pub field: &'static str,
    /// Trimmed value to write back into the request, when the rule trims.
    pub sanitized: Option<Value>,
    /// Optional field left empty; it is removed from the request.
    pub skipped: bool,
    pub result: CheckResult,
}

/// Absent, null, empty string and empty array all count as empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}
