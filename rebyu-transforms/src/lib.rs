//! Ready-made text steps and pipelines for rebyu
//!
//! The pure text helpers live in [`text`], [`remove`], [`scale`] and [`vocab`].
//! [`steps`] adapts them to the step function signature and binds them to the
//! default `text` and `tokens` columns, and [`pipelines`] assembles them into
//! prebuilt pipelines.

#![warn(missing_docs)]

mod error;
pub mod pipelines;
pub mod remove;
pub mod scale;
pub mod steps;
pub mod text;
pub mod vocab;

pub use error::{Error, Result};
pub use pipelines::{blank_pipeline, standard_pipeline};
