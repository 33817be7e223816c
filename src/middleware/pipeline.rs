//! Route pipelines: ordered validation and guard stages run before a handler.

use std::marker::PhantomData;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{AppError, AppResult, StatusError};
use crate::handlers::http::AppState;
use crate::validation::{RequestContext, RequestInput, Schema};

/// Guard over the context built by earlier stages.
pub type Guard = fn(&RequestContext) -> AppResult<()>;

/// One step of a route pipeline.
#[derive(Clone, Copy)]
pub enum Stage {
    Validate(&'static Schema),
    Guard(Guard),
}

/// Stages a route runs, in order, before its handler.
pub trait Pipeline {
    fn stages() -> Vec<Stage>;
}

/// Run `stages` in order. The first failing stage ends the pipeline.
pub async fn run_pipeline(
    stages: &[Stage],
    state: &AppState,
    input: &mut RequestInput,
) -> AppResult<RequestContext> {
    let mut context = RequestContext::default();
    for stage in stages {
        match stage {
            Stage::Validate(schema) => {
                for attachment in schema.run(state, input, &context).await? {
                    context.attach(attachment);
                }
            }
            Stage::Guard(guard) => guard(&context)?,
        }
    }
    Ok(context)
}

/// Extractor: the request passed every stage of `P`.
pub struct Validated<P> {
    pub context: RequestContext,
    /// JSON body with trimmed fields written back.
    pub body: Value,
    _pipeline: PhantomData<fn() -> P>,
}

impl<P> Validated<P> {
    /// Deserialize the sanitized body.
    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

#[axum::async_trait]
impl<P: Pipeline> FromRequest<AppState> for Validated<P> {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        // Honours `DefaultBodyLimit`; an oversized body is a 413.
        let bytes = <Bytes as FromRequest<AppState>>::from_request(req, state)
            .await
            .map_err(|rejection| StatusError::new(rejection.status(), rejection.body_text()))?;
        let body = if bytes.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                debug!(error = %e, "rejected malformed JSON body");
                StatusError::bad_request("Invalid JSON body")
            })?
        };

        let mut input = RequestInput::new(body, headers);
        let context = run_pipeline(&P::stages(), state, &mut input).await?;
        Ok(Self {
            context,
            body: input.body,
            _pipeline: PhantomData,
        })
    }
}
