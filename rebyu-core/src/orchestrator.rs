//! The orchestrator: one dataset, one pipeline and two result maps


use crate::config::RebyuConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::pipeline::Pipeline;
use crate::schema::DataType;
use crate::step::ResultMap;

/// Owns a dataset and drives a pipeline against it
///
/// Composition and analysis results start empty and only grow through
/// pipeline execution.
#[derive(Debug, Clone)]
pub struct Rebyu {
    data: Dataset,
    pipeline: Option<Pipeline>,
    composition: ResultMap,
    analysis: ResultMap,
    config: RebyuConfig,
}

impl Rebyu {
    /// Create a new orchestrator with the default configuration
    ///
    /// A single [`Column`](crate::column::Column) is accepted as data and becomes
    /// a one-column dataset.
    pub fn new(data: impl Into<Dataset>, pipeline: Option<Pipeline>) -> Self {
        Self::with_config(data, pipeline, RebyuConfig::default())
    }

    /// Create a new orchestrator with an explicit configuration
    pub fn with_config(
        data: impl Into<Dataset>,
        pipeline: Option<Pipeline>,
        config: RebyuConfig,
    ) -> Self {
        Self {
            data: data.into(),
            pipeline,
            composition: ResultMap::new(),
            analysis: ResultMap::new(),
            config,
        }
    }

    /// Run the next pipeline step
    ///
    /// Returns whether a step ran. Without a pipeline this is a no-op returning
    /// `Ok(false)`, unless the configuration requires a pipeline.
    pub fn step(&mut self, verbose: bool) -> Result<bool> {
        let verbose = verbose || self.config.verbose;
        let Some(pipeline) = self.pipeline.as_mut() else {
            return self.missing_pipeline().map(|()| false);
        };
        pipeline.step(&mut self.data, &mut self.composition, &mut self.analysis, verbose)
    }

    /// Run the pipeline from its cursor to the end
    pub fn run(&mut self, verbose: bool) -> Result<()> {
        let verbose = verbose || self.config.verbose;
        let Some(pipeline) = self.pipeline.as_mut() else {
            return self.missing_pipeline();
        };
        pipeline.run(&mut self.data, &mut self.composition, &mut self.analysis, verbose)
    }

    /// Move the pipeline cursor back to its first step
    pub fn reset(&mut self) {
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.reset();
        }
    }

    /// Human-readable summary of data, results and pipeline
    pub fn info(&self) -> String {
        let mut out = String::from("DATA:\n");
        for field in self.data.schema().fields() {
            out.push_str(&format!(" -{}: {}\n", field.name(), field.data_type()));
        }

        out.push_str("\nCOMPOSITION:\n");
        out.push_str(&results_info(&self.composition));

        out.push_str("\nANALYSIS:\n");
        out.push_str(&results_info(&self.analysis));

        out.push_str("\nPIPELINE:\n");
        match &self.pipeline {
            Some(pipeline) => {
                out.push_str(&format!(
                    "pid: {}\nsteps: {}\nstate: {} ({}/{})\n",
                    pipeline.id(),
                    pipeline.len(),
                    pipeline.status(),
                    pipeline.cursor_index(),
                    pipeline.len()
                ));

                out.push_str("\nSTEPS:\n");
                for id in pipeline.steps_info() {
                    out.push_str(&format!(" -{id}\n"));
                }
            }
            None => out.push_str("None\n"),
        }

        out
    }

    /// Get the dataset
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Get the composition results
    pub fn composition(&self) -> &ResultMap {
        &self.composition
    }

    /// Get the analysis results
    pub fn analysis(&self) -> &ResultMap {
        &self.analysis
    }

    /// Get the pipeline, if any
    pub fn pipeline(&self) -> Option<&Pipeline> {
        self.pipeline.as_ref()
    }

    /// Get the pipeline mutably, e.g. to add or pop steps
    pub fn pipeline_mut(&mut self) -> Option<&mut Pipeline> {
        self.pipeline.as_mut()
    }

    /// Replace the pipeline, returning the previous one
    pub fn set_pipeline(&mut self, pipeline: Pipeline) -> Option<Pipeline> {
        self.pipeline.replace(pipeline)
    }

    /// Remove and return the pipeline
    pub fn take_pipeline(&mut self) -> Option<Pipeline> {
        self.pipeline.take()
    }

    /// Get the configuration
    pub fn config(&self) -> &RebyuConfig {
        &self.config
    }

    /// Consume the orchestrator, returning the dataset and both result maps
    pub fn into_parts(self) -> (Dataset, ResultMap, ResultMap) {
        (self.data, self.composition, self.analysis)
    }

    fn missing_pipeline(&self) -> Result<()> {
        if self.config.require_pipeline {
            return Err(Error::MissingPipeline);
        }
        tracing::debug!("no pipeline set, nothing to run");
        Ok(())
    }
}

fn results_info(results: &ResultMap) -> String {
    if results.is_empty() {
        return "Empty\n".to_string();
    }
    results
        .iter()
        .map(|(key, value)| format!(" -{key}: {}\n", DataType::of(value)))
        .collect()
}
