// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! Pipeline-wide IO dataset extraction
//!
//! Derives the dataset types a pipeline as a whole consumes and produces.
//! Materializing an executable work-unit graph from the ordered pipeline and
//! these sets is the job of a downstream registry-backed planner, not of
//! this crate.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::errors::PipeflowResult;
use crate::pipeline::{DatasetType, TaskDef};
use crate::task::TaskFactory;

/// Pipeline-wide input and output dataset types.
#[derive(Debug, Clone, Default)]
pub struct IoDatasets {
    /// Dataset types consumed but never produced; they must already exist
    /// when the pipeline runs.
    pub inputs: HashSet<DatasetType>,

    /// Dataset types produced by some task, whether or not they are also
    /// consumed internally.
    pub outputs: HashSet<DatasetType>,
}

/// Computes pipeline-wide IO dataset sets, resolving task classes on demand.
pub struct GraphBuilder {
    factory: Option<Arc<dyn TaskFactory>>,
}

impl GraphBuilder {
    pub fn new(factory: Option<Arc<dyn TaskFactory>>) -> Self {
        Self { factory }
    }

    /// Input and output dataset types over all `tasks`; order is irrelevant.
    ///
    /// A dataset type produced anywhere counts as an output even when it is
    /// also consumed internally; inputs are what remains to be supplied from
    /// outside. Producer uniqueness is not checked here, that is the
    /// ordering tools' job; duplicate outputs collapse into one entry.
    ///
    /// # Errors
    ///
    /// [`MissingTaskFactory`] when a task class is unset and the builder's
    /// factory cannot supply it.
    ///
    /// [`MissingTaskFactory`]: crate::PipeflowError::MissingTaskFactory
    pub fn build_io_datasets(&self, tasks: &[TaskDef]) -> PipeflowResult<IoDatasets> {
        // every dataset type mentioned anywhere, keyed by name
        let mut all_types: HashMap<String, DatasetType> = HashMap::new();
        let mut input_names: HashSet<String> = HashSet::new();
        let mut output_names: HashSet<String> = HashSet::new();

        for task in tasks {
            let task = task.resolve(self.factory.as_deref())?;
            let class = task.require_class()?;
            for ds_type in class.input_dataset_types(&task.config).values() {
                input_names.insert(ds_type.name.clone());
                all_types.insert(ds_type.name.clone(), ds_type.clone());
            }
            for ds_type in class.output_dataset_types(&task.config).values() {
                output_names.insert(ds_type.name.clone());
                all_types.insert(ds_type.name.clone(), ds_type.clone());
            }
        }

        // anything produced internally does not need to be supplied
        let inputs = input_names
            .difference(&output_names)
            .map(|name| all_types[name].clone())
            .collect();
        let outputs = output_names
            .iter()
            .map(|name| all_types[name].clone())
            .collect();

        let io = IoDatasets { inputs, outputs };
        debug!(
            inputs = io.inputs.len(),
            outputs = io.outputs.len(),
            "IO datasets extracted"
        );
        Ok(io)
    }
}
