// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! Pipeline definition structures
//!
//! A pipeline is an ordered sequence of task definitions. Each task carries
//! its configuration and, once resolved, the loaded task class through which
//! its input/output dataset types are derived.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use crate::errors::{PipeflowError, PipeflowResult};
use crate::task::{TaskClass, TaskFactory};

/// A named category of data artifact read or written by a task.
///
/// Identity is by `name` only: two dataset types with the same name refer to
/// the same artifact category regardless of their unit metadata. Equality
/// and hashing reflect that.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct DatasetType {
    /// Dataset type name, unique within a pipeline.
    pub name: String,

    /// Dimension units the dataset is indexed by.
    #[serde(default)]
    pub units: Vec<String>,
}

impl DatasetType {
    /// Create a dataset type with the given name and units.
    pub fn new(name: impl Into<String>, units: Vec<String>) -> Self {
        Self {
            name: name.into(),
            units,
        }
    }
}

impl PartialEq for DatasetType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for DatasetType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Declaration of a single dataset slot inside a task configuration.
///
/// An empty `name` marks the slot as unused.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub units: Vec<String>,
}

impl From<DatasetConfig> for DatasetType {
    fn from(config: DatasetConfig) -> Self {
        Self {
            name: config.name,
            units: config.units,
        }
    }
}

/// Task configuration, opaque to the ordering core.
///
/// The payload is interpreted only by [`TaskClass`] implementations when
/// they derive the task's input and output dataset types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskConfig(serde_json::Value);

impl TaskConfig {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Raw configuration payload.
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// A task entry in a pipeline: identity, configuration and (once resolved)
/// the loaded task class.
///
/// Cloning is shallow; the task class is shared behind an `Arc`. Two task
/// definitions compare equal when their labels match.
#[derive(Clone, Serialize, Deserialize)]
pub struct TaskDef {
    /// Fully-qualified task name, canonicalized on resolution.
    pub task_name: String,

    /// Task configuration, interpreted by the task class.
    #[serde(default)]
    pub config: TaskConfig,

    /// Loaded task class, present once resolved. Never serialized.
    #[serde(skip)]
    pub task_class: Option<Arc<dyn TaskClass>>,

    /// Unique human-readable label, used in diagnostics and for equality.
    pub label: String,
}

impl TaskDef {
    pub fn new(
        task_name: impl Into<String>,
        config: TaskConfig,
        task_class: Option<Arc<dyn TaskClass>>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            config,
            task_class,
            label: label.into(),
        }
    }

    /// Return a copy of this task with its class resolved via `factory`.
    ///
    /// A task whose class is already loaded is returned unchanged; otherwise
    /// the factory supplies the class and the canonical task name. The
    /// receiver is never modified.
    pub fn resolve(&self, factory: Option<&dyn TaskFactory>) -> PipeflowResult<TaskDef> {
        if self.task_class.is_some() {
            return Ok(self.clone());
        }
        match factory.and_then(|f| f.load_task_class(&self.task_name)) {
            Some((class, canonical_name)) => {
                let mut resolved = self.clone();
                resolved.task_class = Some(class);
                resolved.task_name = canonical_name;
                Ok(resolved)
            }
            None => Err(PipeflowError::MissingTaskFactory {
                label: self.label.clone(),
                task_name: self.task_name.clone(),
            }),
        }
    }

    /// Loaded task class, or a missing-factory error naming this task.
    pub fn require_class(&self) -> PipeflowResult<&dyn TaskClass> {
        self.task_class
            .as_deref()
            .ok_or_else(|| PipeflowError::MissingTaskFactory {
                label: self.label.clone(),
                task_name: self.task_name.clone(),
            })
    }
}

impl PartialEq for TaskDef {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for TaskDef {}

impl fmt::Debug for TaskDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDef")
            .field("task_name", &self.task_name)
            .field("label", &self.label)
            .field("resolved", &self.task_class.is_some())
            .finish()
    }
}

/// An ordered sequence of task definitions, as declared by the user.
///
/// Declaration order is not assumed to be dependency-correct; ordering
/// produces a new pipeline rather than reordering in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pipeline {
    /// Tasks in declaration order.
    pub tasks: Vec<TaskDef>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a pipeline definition from a YAML file.
    ///
    /// Task classes are left unresolved; pass a [`TaskFactory`] to the
    /// ordering entry points to load them.
    pub fn from_file(path: &Path) -> PipeflowResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PipeflowError::FileReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        Self::from_yaml(&content)
    }

    /// Parse a pipeline definition from a YAML string.
    pub fn from_yaml(yaml: &str) -> PipeflowResult<Self> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    /// Serialize the pipeline definition to YAML.
    pub fn to_yaml(&self) -> PipeflowResult<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Append a task to the pipeline.
    pub fn push(&mut self, task: TaskDef) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskDef> {
        self.tasks.iter()
    }

    /// Get a task by label.
    pub fn get_task(&self, label: &str) -> Option<&TaskDef> {
        self.tasks.iter().find(|t| t.label == label)
    }

    /// Task labels in declaration order.
    pub fn labels(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.label.as_str()).collect()
    }
}

impl FromIterator<TaskDef> for Pipeline {
    fn from_iter<I: IntoIterator<Item = TaskDef>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a TaskDef;
    type IntoIter = std::slice::Iter<'a, TaskDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
