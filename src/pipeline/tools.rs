// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! Pipeline ordering tools
//!
//! Entry points for checking and producing a dependency-correct task order.
//! Both resolve task classes first, then build the dependency DAG, so they
//! raise the same duplicate-producer and missing-factory errors under the
//! same conditions.

use tracing::debug;

use crate::errors::PipeflowResult;
use crate::pipeline::{Pipeline, TaskDag, TaskDef};
use crate::task::TaskFactory;

fn resolve_all(
    pipeline: &Pipeline,
    factory: Option<&dyn TaskFactory>,
) -> PipeflowResult<Vec<TaskDef>> {
    pipeline.iter().map(|task| task.resolve(factory)).collect()
}

/// Check whether the tasks in `pipeline` are correctly ordered.
///
/// A pipeline is correctly ordered when every task producing a dataset type
/// precedes all tasks consuming it. Dataset types no task produces are
/// treated as pipeline-external and place no constraint. A wrong but acyclic
/// order is `Ok(false)`, not an error.
///
/// # Errors
///
/// [`DuplicateOutput`] when a dataset type has more than one producer, and
/// [`MissingTaskFactory`] when a task class is unset and `factory` cannot
/// supply it.
///
/// [`DuplicateOutput`]: crate::PipeflowError::DuplicateOutput
/// [`MissingTaskFactory`]: crate::PipeflowError::MissingTaskFactory
pub fn is_pipeline_ordered(
    pipeline: &Pipeline,
    factory: Option<&dyn TaskFactory>,
) -> PipeflowResult<bool> {
    let tasks = resolve_all(pipeline, factory)?;
    let dag = TaskDag::build(&tasks)?;
    Ok(dag.is_ordered())
}

/// Return a copy of `pipeline` ordered so that every producer precedes its
/// consumers.
///
/// Among tasks that are simultaneously ready, declaration order is kept, so
/// the result is deterministic and an already-ordered pipeline comes back in
/// the same order. Tasks in the returned pipeline carry resolved classes;
/// the input pipeline is never modified.
///
/// # Errors
///
/// The same as [`is_pipeline_ordered`], plus [`DataCycle`] when the dataset
/// dependencies admit no topological order.
///
/// [`DataCycle`]: crate::PipeflowError::DataCycle
pub fn order_pipeline(
    pipeline: &Pipeline,
    factory: Option<&dyn TaskFactory>,
) -> PipeflowResult<Pipeline> {
    let tasks = resolve_all(pipeline, factory)?;
    let dag = TaskDag::build(&tasks)?;
    let order = dag.stable_topological_order()?;
    debug!(?order, "pipeline ordered");
    Ok(order.into_iter().map(|idx| tasks[idx].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PipeflowError;
    use crate::pipeline::testutil::{make_pipeline, make_unresolved_pipeline};
    use crate::task::{ConfiguredTask, TaskRegistry};
    use std::sync::Arc;

    #[test]
    fn linear_chain_order_check() {
        let pipeline = make_pipeline(&[(&["A"], &["B"], "task1"), (&["B"], &["C"], "task2")]);
        assert!(is_pipeline_ordered(&pipeline, None).unwrap());

        let pipeline = make_pipeline(&[(&["B"], &["C"], "task2"), (&["A"], &["B"], "task1")]);
        assert!(!is_pipeline_ordered(&pipeline, None).unwrap());
    }

    #[test]
    fn diamond_order_check() {
        let pipeline = make_pipeline(&[
            (&["A"], &["B", "C"], "task1"),
            (&["B"], &["D"], "task2"),
            (&["C"], &["E"], "task3"),
            (&["D", "E"], &["F"], "task4"),
        ]);
        assert!(is_pipeline_ordered(&pipeline, None).unwrap());

        // independent middle tasks may come in either order
        let pipeline = make_pipeline(&[
            (&["A"], &["B", "C"], "task1"),
            (&["C"], &["E"], "task3"),
            (&["B"], &["D"], "task2"),
            (&["D", "E"], &["F"], "task4"),
        ]);
        assert!(is_pipeline_ordered(&pipeline, None).unwrap());

        let pipeline = make_pipeline(&[
            (&["D", "E"], &["F"], "task4"),
            (&["B"], &["D"], "task2"),
            (&["C"], &["E"], "task3"),
            (&["A"], &["B", "C"], "task1"),
        ]);
        assert!(!is_pipeline_ordered(&pipeline, None).unwrap());
    }

    #[test]
    fn ordered_pipeline_comes_back_unchanged() {
        let pipeline = make_pipeline(&[
            (&["A"], &["B", "C"], "task1"),
            (&["C"], &["E"], "task3"),
            (&["B"], &["D"], "task2"),
            (&["D", "E"], &["F"], "task4"),
        ]);
        let ordered = order_pipeline(&pipeline, None).unwrap();
        assert_eq!(ordered.labels(), ["task1", "task3", "task2", "task4"]);
    }

    #[test]
    fn reversed_pipeline_is_reordered() {
        let pipeline = make_pipeline(&[(&["B"], &["C"], "task2"), (&["A"], &["B"], "task1")]);
        let ordered = order_pipeline(&pipeline, None).unwrap();
        assert_eq!(ordered.labels(), ["task1", "task2"]);

        let pipeline = make_pipeline(&[
            (&["D", "E"], &["F"], "task4"),
            (&["B"], &["D"], "task2"),
            (&["C"], &["E"], "task3"),
            (&["A"], &["B", "C"], "task1"),
        ]);
        let ordered = order_pipeline(&pipeline, None).unwrap();
        assert_eq!(ordered.labels(), ["task1", "task2", "task3", "task4"]);
    }

    #[test]
    fn ties_follow_declaration_order() {
        let pipeline = make_pipeline(&[
            (&["D", "E"], &["F"], "task4"),
            (&["C"], &["E"], "task3"),
            (&["B"], &["D"], "task2"),
            (&["A"], &["B", "C"], "task1"),
        ]);
        let ordered = order_pipeline(&pipeline, None).unwrap();
        assert_eq!(ordered.labels(), ["task1", "task3", "task2", "task4"]);
    }

    #[test]
    fn ordering_is_idempotent() {
        let pipeline = make_pipeline(&[
            (&["D", "E"], &["F"], "task4"),
            (&["B"], &["D"], "task2"),
            (&["C"], &["E"], "task3"),
            (&["A"], &["B", "C"], "task1"),
        ]);
        let once = order_pipeline(&pipeline, None).unwrap();
        assert!(is_pipeline_ordered(&once, None).unwrap());

        let twice = order_pipeline(&once, None).unwrap();
        assert_eq!(twice.labels(), once.labels());

        // the input pipeline is untouched
        assert_eq!(pipeline.labels(), ["task4", "task2", "task3", "task1"]);
    }

    #[test]
    fn duplicate_output_is_fatal_for_both_entry_points() {
        let pipeline = make_pipeline(&[
            (&["A"], &["B"], "task1"),
            (&["B"], &["C"], "task2"),
            (&["A"], &["C"], "task3"),
        ]);

        match is_pipeline_ordered(&pipeline, None) {
            Err(PipeflowError::DuplicateOutput {
                dataset_type,
                first,
                second,
            }) => {
                assert_eq!(dataset_type, "C");
                assert_eq!(first, "task2");
                assert_eq!(second, "task3");
            }
            other => panic!("expected DuplicateOutput, got {:?}", other),
        }
        assert!(matches!(
            order_pipeline(&pipeline, None),
            Err(PipeflowError::DuplicateOutput { .. })
        ));
    }

    #[test]
    fn missing_factory_is_fatal_for_both_entry_points() {
        let pipeline =
            make_unresolved_pipeline(&[(&["A"], &["B"], "task1"), (&["B"], &["C"], "task2")]);

        assert!(matches!(
            is_pipeline_ordered(&pipeline, None),
            Err(PipeflowError::MissingTaskFactory { .. })
        ));
        assert!(matches!(
            order_pipeline(&pipeline, None),
            Err(PipeflowError::MissingTaskFactory { .. })
        ));
    }

    #[test]
    fn factory_resolves_unloaded_classes() {
        let mut registry = TaskRegistry::new();
        registry.register("ConfiguredTask", Arc::new(ConfiguredTask));

        let pipeline =
            make_unresolved_pipeline(&[(&["B"], &["C"], "task2"), (&["A"], &["B"], "task1")]);
        let ordered = order_pipeline(&pipeline, Some(&registry)).unwrap();

        assert_eq!(ordered.labels(), ["task1", "task2"]);
        assert!(ordered.iter().all(|t| t.task_class.is_some()));
        // resolution copies, it does not mutate the caller's tasks
        assert!(pipeline.iter().all(|t| t.task_class.is_none()));
    }

    #[test]
    fn cycle_is_fatal_for_ordering() {
        let pipeline = make_pipeline(&[
            (&["A"], &["B"], "task1"),
            (&["B"], &["C"], "task2"),
            (&["C"], &["D"], "task3"),
            (&["D"], &["A"], "task4"),
        ]);

        match order_pipeline(&pipeline, None) {
            Err(PipeflowError::DataCycle { labels }) => {
                assert_eq!(labels, ["task1", "task2", "task3", "task4"]);
            }
            other => panic!("expected DataCycle, got {:?}", other),
        }
        // the order check itself does not chase cycles, it just sees a
        // producer downstream of a consumer
        assert!(!is_pipeline_ordered(&pipeline, None).unwrap());
    }
}
