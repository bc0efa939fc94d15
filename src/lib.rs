// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! # pipeflow - Pipeline dependency ordering
//!
//! `pipeflow` orders a declaratively described pipeline of processing tasks
//! into an execution sequence consistent with the dataset types each task
//! reads and writes, and derives the dataset types the pipeline as a whole
//! consumes and produces.
//!
//! Tasks declare named input and output dataset types through their
//! configuration; an output of one task that is an input of another creates
//! a dependency edge. Ordering is a topological sort over that graph, stable
//! against declaration order so results are reproducible.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use pipeflow::{order_pipeline, ConfiguredTask, Pipeline, TaskConfig, TaskDef};
//! use serde_json::json;
//!
//! let calibrate = TaskDef::new(
//!     "ConfiguredTask",
//!     TaskConfig::new(json!({
//!         "inputs": { "input1": { "name": "postISRCCD" } },
//!         "outputs": { "output1": { "name": "calexp" } },
//!     })),
//!     Some(Arc::new(ConfiguredTask)),
//!     "calibrate",
//! );
//! let isr = TaskDef::new(
//!     "ConfiguredTask",
//!     TaskConfig::new(json!({
//!         "inputs": { "input1": { "name": "raw" } },
//!         "outputs": { "output1": { "name": "postISRCCD" } },
//!     })),
//!     Some(Arc::new(ConfiguredTask)),
//!     "isr",
//! );
//!
//! // declared in the wrong order; ordering fixes it
//! let pipeline: Pipeline = [calibrate, isr].into_iter().collect();
//! let ordered = order_pipeline(&pipeline, None).unwrap();
//! assert_eq!(ordered.labels(), ["isr", "calibrate"]);
//! ```

pub mod errors;
pub mod pipeline;
pub mod task;

// Re-export commonly used types
pub use errors::{PipeflowError, PipeflowResult};
pub use pipeline::{
    is_pipeline_ordered, order_pipeline, DatasetConfig, DatasetType, GraphBuilder, IoDatasets,
    Pipeline, TaskConfig, TaskDag, TaskDef,
};
pub use task::{ConfiguredTask, TaskClass, TaskFactory, TaskRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
