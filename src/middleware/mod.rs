//! Middleware: route pipelines (validation + guards) and the guards themselves.

pub mod guards;
pub mod pipeline;

pub use guards::verified_user;
pub use pipeline::{run_pipeline, Guard, Pipeline, Stage, Validated};
