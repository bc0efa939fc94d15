// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! Error types for pipeline dependency analysis
//!
//! Every failure is terminal for the invoked operation: no partial ordering
//! or partial dataset sets are ever returned.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeflow operations
pub type PipeflowResult<T> = Result<T, PipeflowError>;

/// Main error type for pipeflow
#[derive(Error, Debug, Diagnostic)]
pub enum PipeflowError {
    /// A dataset type has more than one producing task.
    #[error("dataset type '{dataset_type}' is declared as output by both '{first}' and '{second}'")]
    #[diagnostic(
        code(pipeflow::duplicate_output),
        help("A dataset type may have at most one producer; rename one of the outputs")
    )]
    DuplicateOutput {
        dataset_type: String,
        first: String,
        second: String,
    },

    /// A task class is unset and no factory can resolve it.
    #[error("task class for '{label}' ('{task_name}') cannot be resolved")]
    #[diagnostic(
        code(pipeflow::missing_task_factory),
        help("Provide a task factory that knows how to load '{task_name}'")
    )]
    MissingTaskFactory { label: String, task_name: String },

    /// The dataset dependencies admit no topological order.
    #[error("pipeline dataset dependencies form a cycle among tasks: {}", .labels.join(", "))]
    #[diagnostic(
        code(pipeflow::data_cycle),
        help("Review the input/output dataset types of the listed tasks to remove the cycle")
    )]
    DataCycle { labels: Vec<String> },

    #[error("failed to read pipeline file '{path}': {error}")]
    #[diagnostic(code(pipeflow::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(pipeflow::yaml_error))]
    Yaml { message: String },
}

impl From<serde_yaml::Error> for PipeflowError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml {
            message: e.to_string(),
        }
    }
}
