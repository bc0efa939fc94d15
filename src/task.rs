// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! Task capability interfaces
//!
//! A task takes part in dependency analysis only through the dataset types
//! it declares. Two capabilities cover that: [`TaskClass`] derives the named
//! input/output dataset types from a task configuration, and [`TaskFactory`]
//! maps a task name to a loaded class. The core never instantiates or runs
//! tasks.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::pipeline::{DatasetConfig, DatasetType, TaskConfig};

/// Capability exposed by every loaded task class: derive the named input and
/// output dataset types from a task configuration.
///
/// Either mapping may be empty; a source task has no inputs, a sink task no
/// outputs.
pub trait TaskClass: Send + Sync {
    /// Input dataset types declared by `config`, keyed by slot name.
    fn input_dataset_types(&self, config: &TaskConfig) -> HashMap<String, DatasetType>;

    /// Output dataset types declared by `config`, keyed by slot name.
    fn output_dataset_types(&self, config: &TaskConfig) -> HashMap<String, DatasetType>;
}

/// Capability that maps a task name to a loaded task class.
///
/// Implementations may be backed by a static registry, a plugin table or
/// dynamic loading; the core only depends on this interface. `None` means
/// the name cannot be resolved and is surfaced to callers as a
/// missing-factory error naming the offending task.
pub trait TaskFactory {
    /// Resolve `name` to a task class and its canonical fully-qualified name.
    fn load_task_class(&self, name: &str) -> Option<(Arc<dyn TaskClass>, String)>;
}

/// Map-backed [`TaskFactory`].
///
/// The name a class is registered under becomes its canonical task name.
#[derive(Default)]
pub struct TaskRegistry {
    classes: HashMap<String, Arc<dyn TaskClass>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `class` under `name`.
    pub fn register(&mut self, name: impl Into<String>, class: Arc<dyn TaskClass>) {
        self.classes.insert(name.into(), class);
    }
}

impl TaskFactory for TaskRegistry {
    fn load_task_class(&self, name: &str) -> Option<(Arc<dyn TaskClass>, String)> {
        self.classes
            .get(name)
            .map(|class| (Arc::clone(class), name.to_string()))
    }
}

/// Dataset declarations understood by [`ConfiguredTask`].
#[derive(Debug, Default, Deserialize)]
struct IoDeclaration {
    #[serde(default)]
    inputs: HashMap<String, DatasetConfig>,

    #[serde(default)]
    outputs: HashMap<String, DatasetConfig>,
}

/// Task class whose dataset types come straight from its configuration.
///
/// The configuration carries `inputs` and `outputs` maps of slot name to
/// dataset declaration; slots with an empty dataset name are skipped. A
/// configuration without declarations yields empty mappings.
pub struct ConfiguredTask;

impl ConfiguredTask {
    fn declared(config: &TaskConfig) -> IoDeclaration {
        serde_json::from_value(config.value().clone()).unwrap_or_default()
    }

    fn dataset_types(slots: HashMap<String, DatasetConfig>) -> HashMap<String, DatasetType> {
        slots
            .into_iter()
            .filter(|(_, declaration)| !declaration.name.is_empty())
            .map(|(slot, declaration)| (slot, declaration.into()))
            .collect()
    }
}

impl TaskClass for ConfiguredTask {
    fn input_dataset_types(&self, config: &TaskConfig) -> HashMap<String, DatasetType> {
        Self::dataset_types(Self::declared(config).inputs)
    }

    fn output_dataset_types(&self, config: &TaskConfig) -> HashMap<String, DatasetType> {
        Self::dataset_types(Self::declared(config).outputs)
    }
}
