//! Running a set of field rules against one request location.

use std::borrow::Cow;

use axum::http::HeaderMap;
use futures::future::join_all;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::context::{Attachment, RequestContext};
use super::rule::{CheckContext, FieldFailure, FieldRule};
use crate::error::{AppError, AppResult, ValidationErrors};
use crate::handlers::http::AppState;

/// Where a schema reads its fields from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    Headers,
}

/// The parts of a request validation reads.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub body: Value,
    pub headers: HeaderMap,
}

impl RequestInput {
    pub fn new(body: Value, headers: HeaderMap) -> Self {
        Self { body, headers }
    }

    /// JSON body only, no headers.
    pub fn body(body: Value) -> Self {
        Self::new(body, HeaderMap::new())
    }

    fn source(&self, location: Location) -> Cow<'_, Value> {
        match location {
            Location::Body => Cow::Borrowed(&self.body),
            Location::Headers => Cow::Owned(headers_as_json(&self.headers)),
        }
    }
}

/// Header names are lower-case; non-UTF-8 values are skipped.
fn headers_as_json(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for (name, value) in headers {
        if map.contains_key(name.as_str()) {
            continue;
        }
        if let Ok(v) = value.to_str() {
            map.insert(name.as_str().to_string(), Value::String(v.to_string()));
        }
    }
    Value::Object(map)
}

/// Rules for one endpoint, scoped to one location.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    location: Location,
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn body(name: &'static str, rules: Vec<FieldRule>) -> Self {
        Self {
            name,
            location: Location::Body,
            rules,
        }
    }

    pub fn headers(name: &'static str, rules: Vec<FieldRule>) -> Self {
        Self {
            name,
            location: Location::Headers,
            rules,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Evaluate every rule concurrently and decide pass or fail once all are done.
    ///
    /// The first aborting failure in declaration order wins. Otherwise plain
    /// failures are aggregated into [`AppError::Validation`]. On success the
    /// trimmed values are written back into the body, empty optional fields
    /// are removed from it, and the attachments of all custom checks are
    /// returned.
    #[instrument(skip_all, fields(schema = self.name))]
    pub async fn run(
        &self,
        state: &AppState,
        input: &mut RequestInput,
        context: &RequestContext,
    ) -> AppResult<Vec<Attachment>> {
        let outcomes = {
            let source = input.source(self.location);
            let cx = CheckContext {
                state,
                input: &*source,
                context,
            };
            join_all(self.rules.iter().map(|rule| {
                let raw = match self.location {
                    Location::Body => source.get(rule.field()),
                    Location::Headers => source.get(rule.field().to_ascii_lowercase().as_str()),
                };
                rule.evaluate(raw, &cx)
            }))
            .await
        };

        let mut errors = ValidationErrors::new();
        let mut attachments = Vec::new();
        let mut sanitized = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Err(FieldFailure::Abort(e)) => {
                    debug!(schema = self.name, field = outcome.field, status = %e.status(), "rule aborted request");
                    return Err(e);
                }
                Err(FieldFailure::Invalid(message)) => errors.push(outcome.field, message),
                Ok(attached) => {
                    attachments.extend(attached);
                    if outcome.skipped {
                        skipped.push(outcome.field);
                    } else if let Some(v) = outcome.sanitized {
                        sanitized.push((outcome.field, v));
                    }
                }
            }
        }

        if !errors.is_empty() {
            debug!(schema = self.name, failures = errors.len(), "validation failed");
            return Err(AppError::Validation(errors));
        }

        if self.location == Location::Body {
            if let Value::Object(body) = &mut input.body {
                for (field, value) in sanitized {
                    body.insert(field.to_string(), value);
                }
                for field in skipped {
                    body.remove(field);
                }
            }
        }

        Ok(attachments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rule::{CheckResult, CustomCheck};
    use async_trait::async_trait;
    use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts invocations, then passes or fails as configured.
    struct Recorder {
        calls: Arc<AtomicUsize>,
        fail: Option<&'static str>,
    }

    #[async_trait]
    impl CustomCheck for Recorder {
        async fn check(&self, _value: &Value, _cx: &CheckContext<'_>) -> CheckResult {
            tokio::task::yield_now().await;
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail {
                Some(m) => Err(FieldFailure::invalid(m)),
                None => Ok(None),
            }
        }
    }

    struct Teapot;

    #[async_trait]
    impl CustomCheck for Teapot {
        async fn check(&self, _value: &Value, _cx: &CheckContext<'_>) -> CheckResult {
            Err(crate::error::StatusError::new(StatusCode::IM_A_TEAPOT, "teapot").into())
        }
    }

    #[tokio::test]
    async fn only_the_failing_rule_is_reported_and_all_rules_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fields = ["a", "b", "c", "d", "e"];
        let rules = fields
            .iter()
            .map(|&f| {
                FieldRule::new(f).custom(Recorder {
                    calls: calls.clone(),
                    fail: (f == "c").then_some("c failed"),
                })
            })
            .collect();
        let schema = Schema::body("abort_order", rules);
        let state = AppState::in_memory();
        let mut input = RequestInput::body(json!({}));

        let err = schema
            .run(&state, &mut input, &RequestContext::default())
            .await
            .unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for("c"), Some("c failed"));
        assert_eq!(calls.load(Ordering::SeqCst), fields.len());
    }

    #[tokio::test]
    async fn abort_beats_plain_failures() {
        let schema = Schema::body(
            "mixed",
            vec![
                FieldRule::new("first").required("first is required"),
                FieldRule::new("second").custom(Teapot),
            ],
        );
        let state = AppState::in_memory();
        let mut input = RequestInput::body(json!({}));
        let err = schema
            .run(&state, &mut input, &RequestContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn trimmed_values_are_written_back() {
        let schema = Schema::body(
            "trim",
            vec![FieldRule::new("name").required("r").string("s").trim()],
        );
        let state = AppState::in_memory();
        let mut input = RequestInput::body(json!({ "name": "  Ada  ", "other": 1 }));
        schema
            .run(&state, &mut input, &RequestContext::default())
            .await
            .unwrap();
        assert_eq!(input.body, json!({ "name": "Ada", "other": 1 }));
    }

    #[tokio::test]
    async fn empty_optional_fields_are_removed() {
        let schema = Schema::body(
            "profile",
            vec![
                FieldRule::new("first_name")
                    .optional()
                    .string("s")
                    .trim()
                    .length(1, 30, "len"),
                FieldRule::new("username").optional().string("s").trim(),
            ],
        );
        let state = AppState::in_memory();
        let mut input = RequestInput::body(json!({ "first_name": "", "username": null, "keep": "" }));
        schema
            .run(&state, &mut input, &RequestContext::default())
            .await
            .unwrap();
        assert_eq!(input.body, json!({ "keep": "" }));
    }

    #[tokio::test]
    async fn header_fields_are_case_insensitive() {
        let schema = Schema::headers(
            "headers",
            vec![FieldRule::new("Authorization").required("missing")],
        );
        let state = AppState::in_memory();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer x"));
        let mut input = RequestInput::new(json!({}), headers);
        tokio_test::assert_ok!(
            schema
                .run(&state, &mut input, &RequestContext::default())
                .await
        );
    }
}
