//! Linear pipeline of steps with a movable execution cursor

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::args::Args;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::step::{ResultMap, Step, StepFn, StepKind};

/// Execution state of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineState {
    /// No steps
    Empty,

    /// The cursor points at a step that has not run yet
    Ready,

    /// Every step has run; only [`Pipeline::reset`] makes it runnable again
    Exhausted,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Empty => write!(f, "empty"),
            PipelineState::Ready => write!(f, "ready"),
            PipelineState::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Statistics from pipeline execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Number of steps that completed
    pub steps_executed: u64,

    /// Number of steps whose function failed
    pub steps_failed: u64,

    /// Total time spent inside steps
    pub execution_time: Duration,
}

/// An ordered, singly linked sequence of steps with an execution cursor
///
/// Steps live in owned slots; each step links forward to the slot of its
/// successor and nothing links backwards. Steps are only appended at the tail
/// and removed from the tail, so `length` is tracked incrementally and reading
/// it is O(1), while indexed access walks the links from the head.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Identifier used for logging and diagnostics
    id: String,

    /// Step slots
    nodes: Vec<Step>,

    /// Slot of the first step
    head: Option<usize>,

    /// Slot of the last step
    tail: Option<usize>,

    /// Slot of the next step to execute
    cursor: Option<usize>,

    /// Position of the next step to execute, in `[0, length]`
    cursor_index: usize,

    /// Number of steps
    length: usize,

    /// Execution statistics
    stats: PipelineStats,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            nodes: Vec::new(),
            head: None,
            tail: None,
            cursor: None,
            cursor_index: 0,
            length: 0,
            stats: PipelineStats::default(),
        }
    }

    /// Create a pipeline from steps in execution order
    pub fn with_steps(id: &str, steps: impl IntoIterator<Item = Step>) -> Self {
        let mut pipeline = Self::new(id);
        for step in steps {
            pipeline.add(step);
        }
        pipeline
    }

    /// Get the identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check if the pipeline has no steps
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// First step
    pub fn head(&self) -> Option<&Step> {
        self.head.map(|slot| &self.nodes[slot])
    }

    /// Last step
    pub fn tail(&self) -> Option<&Step> {
        self.tail.map(|slot| &self.nodes[slot])
    }

    /// Step the cursor points at, `None` once exhausted
    pub fn cursor(&self) -> Option<&Step> {
        self.cursor.map(|slot| &self.nodes[slot])
    }

    /// Position of the cursor
    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    /// Snapshot of the cursor position and the step it points at
    pub fn state(&self) -> (usize, Option<&Step>) {
        (self.cursor_index, self.cursor())
    }

    /// Current execution state
    pub fn status(&self) -> PipelineState {
        if self.head.is_none() {
            PipelineState::Empty
        } else if self.cursor.is_some() {
            PipelineState::Ready
        } else {
            PipelineState::Exhausted
        }
    }

    /// Execution statistics accumulated since creation
    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Append a step after the current tail
    ///
    /// The cursor is untouched unless there was no step left to run, in which
    /// case it moves onto the new step. This covers an exhausted pipeline as
    /// well as an empty one: after the last step has run, `add` makes the new
    /// step the next one [`step`](Self::step) runs, instead of leaving the
    /// pipeline exhausted. A cursor still on a step never moves.
    pub fn add(&mut self, mut step: Step) {
        let slot = self.nodes.len();
        step.set_next(None);
        self.nodes.push(step);

        match self.tail {
            Some(tail) => self.nodes[tail].set_next(Some(slot)),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);

        if self.cursor.is_none() && self.cursor_index == self.length {
            self.cursor = Some(slot);
        }
        self.length += 1;
    }

    /// Build a step from a function and append it
    ///
    /// Without an explicit `id` the step is named after the function.
    pub fn add_function(
        &mut self,
        func: StepFn,
        kind: StepKind,
        source: &str,
        target: &str,
        id: Option<&str>,
        args: Args,
    ) {
        let mut step = match id {
            Some(id) => Step::new(id, kind, source, target, func),
            None => Step::from_fn(func, kind, source, target),
        };
        step.add_args(args);
        self.add(step);
    }

    /// Remove and return the last step, or `None` when empty
    ///
    /// If the cursor pointed at the removed step it becomes `None` and the
    /// cursor index is clamped to the new length.
    pub fn pop(&mut self) -> Option<Step> {
        let removed = self.tail?;
        let mut step = self.nodes.pop()?;
        step.set_next(None);
        self.length -= 1;

        self.tail = self.find_predecessor(removed);
        match self.tail {
            Some(tail) => self.nodes[tail].set_next(None),
            None => self.head = None,
        }

        if self.cursor == Some(removed) {
            self.cursor = None;
        }
        self.cursor_index = self.cursor_index.min(self.length);

        Some(step)
    }

    /// Move the cursor back to the head
    pub fn reset(&mut self) {
        self.cursor_index = 0;
        self.cursor = self.head;
    }

    /// Run the step under the cursor and advance
    ///
    /// Returns `Ok(false)` without doing anything when the pipeline is
    /// exhausted. A failing step leaves the cursor on that step.
    pub fn step(
        &mut self,
        dataset: &mut Dataset,
        composition: &mut ResultMap,
        analysis: &mut ResultMap,
        verbose: bool,
    ) -> Result<bool> {
        let Some(slot) = self.cursor else {
            return Ok(false);
        };
        let step = &self.nodes[slot];

        let started = Instant::now();
        if let Err(err) = step.run(dataset, composition, analysis) {
            self.stats.steps_failed += 1;
            tracing::error!(
                pipeline = %self.id,
                step = step.id(),
                index = self.cursor_index,
                error = %err,
                "step failed"
            );
            return Err(err);
        }
        let elapsed = started.elapsed();

        if verbose {
            tracing::info!(
                pipeline = %self.id,
                step = step.id(),
                kind = %step.kind(),
                source = step.source(),
                target = step.target(),
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "[{}/{}] step complete",
                self.cursor_index + 1,
                self.length
            );
        } else {
            tracing::debug!(
                pipeline = %self.id,
                step = step.id(),
                kind = %step.kind(),
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "step complete"
            );
        }

        self.cursor = step.next();
        self.cursor_index += 1;
        self.stats.steps_executed += 1;
        self.stats.execution_time += elapsed;
        Ok(true)
    }

    /// Run steps from the cursor until the pipeline is exhausted
    ///
    /// The cursor is not reset first: a partially advanced pipeline resumes
    /// where it stopped. Call [`Pipeline::reset`] to start from the head.
    pub fn run(
        &mut self,
        dataset: &mut Dataset,
        composition: &mut ResultMap,
        analysis: &mut ResultMap,
        verbose: bool,
    ) -> Result<()> {
        let started = self.cursor_index;
        while self.step(dataset, composition, analysis, verbose)? {}

        if verbose {
            tracing::info!(
                pipeline = %self.id,
                steps = self.cursor_index - started,
                "pipeline run complete"
            );
        }
        Ok(())
    }

    /// Identifiers of all steps, in order, independent of the cursor
    pub fn steps_info(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(Step::id)
    }

    /// Iterate over the steps by following links from the head
    pub fn iter(&self) -> Steps<'_> {
        Steps {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.length,
        }
    }

    /// Get a step by position; walks the links from the head
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.iter().nth(index)
    }

    fn find_predecessor(&self, slot: usize) -> Option<usize> {
        let mut current = self.head?;
        loop {
            match self.nodes.get(current)?.next() {
                Some(next) if next == slot => return Some(current),
                Some(next) => current = next,
                None => return None,
            }
        }
    }
}

impl Default for Pipeline {
    /// An empty pipeline with a generated identifier
    fn default() -> Self {
        Self::new(&format!("pipeline-{}", Uuid::new_v4()))
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Pipeline '{}': {} steps, {} at {}",
            self.id,
            self.length,
            self.status(),
            self.cursor_index
        )?;
        for (index, step) in self.iter().enumerate() {
            let marker = if index == self.cursor_index { ">" } else { " " };
            writeln!(f, "{marker} {index}: {step}")?;
        }
        Ok(())
    }
}

/// Forward iterator over the steps of a pipeline
pub struct Steps<'a> {
    nodes: &'a [Step],
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Steps<'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<Self::Item> {
        let step = &self.nodes[self.next?];
        self.next = step.next();
        self.remaining -= 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Steps<'_> {}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Step;
    type IntoIter = Steps<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
