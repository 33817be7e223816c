//! Declarative request validation: field rules, schemas and the endpoint
//! schemas of the user routes.

pub mod checks;
mod context;
pub mod rule;
mod schema;
pub mod schemas;

pub use context::{Attachment, RequestContext};
pub use rule::{make_optional, CheckContext, CheckResult, CustomCheck, FieldFailure, FieldRule};
pub use schema::{Location, RequestInput, Schema};
