//! Pipeline steps: a named function bound to a source and target column
//!
//! A [`Step`] is the unit of work of a [`Pipeline`](crate::pipeline::Pipeline).
//! Its [`StepKind`] decides how the function is applied:
//!
//! - [`StepKind::Preprocess`] maps the function over every value of the source
//!   column and writes the results to the target column.
//! - [`StepKind::Compose`] calls the function once with the whole source column
//!   and stores the result under the target key of the composition map.
//! - [`StepKind::Analyze`] does the same, writing to the analysis map.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::args::Args;
use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Named results written by compose and analyze steps
pub type ResultMap = BTreeMap<String, Value>;

/// How a step applies its function to the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Row-wise transform of a column
    Preprocess,

    /// Whole-column aggregate into the composition map
    Compose,

    /// Whole-column aggregate into the analysis map
    Analyze,
}

impl StepKind {
    /// Lowercase name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Preprocess => "preprocess",
            StepKind::Compose => "compose",
            StepKind::Analyze => "analyze",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "preprocess" => Ok(StepKind::Preprocess),
            "compose" => Ok(StepKind::Compose),
            "analyze" | "analysis" => Ok(StepKind::Analyze),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

type Callable = dyn Fn(&Value, &Args) -> anyhow::Result<Value> + Send + Sync;

/// A named function reference usable as a step function
///
/// Preprocess steps call it with a single cell, compose and analyze steps with
/// the whole column as one array value. Two `StepFn`s are equal when they share
/// the same underlying function object, so clones compare equal while two
/// separately wrapped closures do not.
#[derive(Clone)]
pub struct StepFn {
    name: Arc<str>,
    func: Arc<Callable>,
}

impl StepFn {
    /// Wrap a function under the given name
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Value, &Args) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            func: Arc::new(func),
        }
    }

    /// Declared name of the function
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function
    pub fn call(&self, input: &Value, args: &Args) -> anyhow::Result<Value> {
        (self.func)(input, args)
    }
}

impl PartialEq for StepFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for StepFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StepFn").field(&self.name).finish()
    }
}

/// Wrap a function item as a [`StepFn`] named after its identifier
///
/// ```
/// use rebyu_core::{step_fn, Args, Value};
///
/// fn identity(value: &Value, _args: &Args) -> anyhow::Result<Value> {
///     Ok(value.clone())
/// }
///
/// assert_eq!(step_fn!(identity).name(), "identity");
/// ```
#[macro_export]
macro_rules! step_fn {
    ($func:ident) => {
        $crate::step::StepFn::new(stringify!($func), $func)
    };
}

/// A single unit of pipeline work
#[derive(Debug, Clone)]
pub struct Step {
    /// Identifier, unique by convention within a pipeline
    id: String,

    /// How the function is applied
    kind: StepKind,

    /// Column the step reads
    source: String,

    /// Column (preprocess) or result key (compose, analyze) the step writes
    target: String,

    /// Function applied by the step
    func: StepFn,

    /// Keyword arguments merged into every call
    args: Args,

    /// Slot of the following step inside the owning pipeline
    next: Option<usize>,
}

impl Step {
    /// Create a new step
    pub fn new(id: &str, kind: StepKind, source: &str, target: &str, func: StepFn) -> Self {
        Self {
            id: id.to_string(),
            kind,
            source: source.to_string(),
            target: target.to_string(),
            func,
            args: Args::new(),
            next: None,
        }
    }

    /// Create a new step identified by the function's name
    pub fn from_fn(func: StepFn, kind: StepKind, source: &str, target: &str) -> Self {
        let id = func.name().to_string();
        Self::new(&id, kind, source, target, func)
    }

    /// Builder form of [`Step::add_args`]
    #[must_use]
    pub fn with_args<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.add_args(pairs);
        self
    }

    /// Get the identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the kind
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Get the source column name
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the target column or key name
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the function
    pub fn func(&self) -> &StepFn {
        &self.func
    }

    /// Get the bound arguments
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Slot of the following step in the owning pipeline, `None` for the last
    /// step or a step that is not part of a pipeline
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<usize>) {
        self.next = next;
    }

    /// Set the identifier
    pub fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    /// Set the kind; earlier runs are not revisited
    pub fn set_kind(&mut self, kind: StepKind) {
        self.kind = kind;
    }

    /// Set the source column name
    pub fn set_source(&mut self, source: &str) {
        self.source = source.to_string();
    }

    /// Set the target column or key name
    pub fn set_target(&mut self, target: &str) {
        self.target = target.to_string();
    }

    /// Set the function
    pub fn set_func(&mut self, func: StepFn) {
        self.func = func;
    }

    /// Merge arguments into the bound arguments
    ///
    /// Keys already present are overwritten; keys not mentioned are kept.
    pub fn add_args<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in pairs {
            self.args.insert(key.into(), value.into());
        }
    }

    /// Copy this step without its link to a following step
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            next: None,
            ..self.clone()
        }
    }

    /// Apply this step to the dataset and result maps
    ///
    /// The dataset is only written when every call succeeded; a failing function
    /// surfaces as [`Error::Step`] carrying the original error as its source.
    pub fn run(
        &self,
        dataset: &mut Dataset,
        composition: &mut ResultMap,
        analysis: &mut ResultMap,
    ) -> Result<()> {
        match self.kind {
            StepKind::Preprocess => self.transform(dataset),
            StepKind::Compose => self.aggregate(dataset, composition),
            StepKind::Analyze => self.aggregate(dataset, analysis),
        }
    }

    fn transform(&self, dataset: &mut Dataset) -> Result<()> {
        let output = dataset
            .values(&self.source)?
            .iter()
            .map(|value| self.call(value))
            .collect::<Result<Vec<_>>>()?;

        dataset.set_column(&self.target, output)
    }

    fn aggregate(&self, dataset: &mut Dataset, results: &mut ResultMap) -> Result<()> {
        let result = dataset.with_column_array(&self.source, |column| self.call(column))??;
        results.insert(self.target.clone(), result);
        Ok(())
    }

    fn call(&self, input: &Value) -> Result<Value> {
        self.func.call(input, &self.args).map_err(|source| Error::Step {
            id: self.id.clone(),
            source,
        })
    }
}

impl PartialEq for Step {
    /// Steps are equal when every field except the link to the next step matches
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.source == other.source
            && self.target == other.target
            && self.func == other.func
            && self.args == other.args
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}: {} -> {})",
            self.id, self.kind, self.source, self.target
        )
    }
}
