// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! Test helpers for building pipelines from dataset name triples.

use std::sync::Arc;

use serde_json::json;

use crate::pipeline::{Pipeline, TaskConfig, TaskDef};
use crate::task::ConfiguredTask;

/// Build a task configuration declaring the given input and output dataset
/// type names, one slot per name.
pub(crate) fn io_config(inputs: &[&str], outputs: &[&str]) -> TaskConfig {
    let slots = |names: &[&str], prefix: &str| -> serde_json::Map<String, serde_json::Value> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| (format!("{}{}", prefix, idx + 1), json!({ "name": name })))
            .collect()
    };

    TaskConfig::new(json!({
        "inputs": slots(inputs, "input"),
        "outputs": slots(outputs, "output"),
    }))
}

/// Pipeline from `(inputs, outputs, label)` triples, with loaded task
/// classes.
pub(crate) fn make_pipeline(tasks: &[(&[&str], &[&str], &str)]) -> Pipeline {
    tasks
        .iter()
        .map(|(inputs, outputs, label)| {
            TaskDef::new(
                "ConfiguredTask",
                io_config(inputs, outputs),
                Some(Arc::new(ConfiguredTask)),
                *label,
            )
        })
        .collect()
}

/// Same as [`make_pipeline`] but with task classes left unresolved.
pub(crate) fn make_unresolved_pipeline(tasks: &[(&[&str], &[&str], &str)]) -> Pipeline {
    tasks
        .iter()
        .map(|(inputs, outputs, label)| {
            TaskDef::new("ConfiguredTask", io_config(inputs, outputs), None, *label)
        })
        .collect()
}
