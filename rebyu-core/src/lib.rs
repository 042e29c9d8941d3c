//! Core steps, pipelines and orchestration for review analysis
//!
//! This crate provides the building blocks for running text-analysis work over a
//! tabular dataset: a [`Step`] binds a function to a source and target column, a
//! [`Pipeline`] holds steps in order with a resumable execution cursor, and the
//! [`Rebyu`] orchestrator owns the dataset together with the composition and
//! analysis results the pipeline produces.

#![warn(missing_docs)]

pub mod args;
pub mod column;
pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod orchestrator;
pub mod pipeline;
pub mod schema;
pub mod step;

// Re-export key types for convenience
pub use args::{args, Args, ArgsExt};
pub use column::Column;
pub use config::RebyuConfig;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use io::{read_csv, read_csv_path, write_csv, CsvOptions};
pub use orchestrator::Rebyu;
pub use pipeline::{Pipeline, PipelineState, PipelineStats};
pub use schema::{DataType, Field, Schema};
pub use step::{ResultMap, Step, StepFn, StepKind};

pub use serde_json::{json, Value};
