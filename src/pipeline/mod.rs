// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! Pipeline definitions and dependency analysis
//!
//! This module defines the core data structures for pipeflow pipelines and
//! the operations over them: dependency DAG construction, order checking,
//! stable topological ordering and pipeline-wide IO dataset extraction.

mod dag;
mod definition;
mod graph_builder;
mod tools;

#[cfg(test)]
pub(crate) mod testutil;

pub use dag::TaskDag;
pub use definition::{DatasetConfig, DatasetType, Pipeline, TaskConfig, TaskDef};
pub use graph_builder::{GraphBuilder, IoDatasets};
pub use tools::{is_pipeline_ordered, order_pipeline};
