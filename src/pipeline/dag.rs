// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 pipeflow contributors

//! Dependency DAG over pipeline tasks
//!
//! An edge producer → consumer exists when an output dataset type of one
//! task is an input dataset type of another. Dataset types no task produces
//! are pipeline-external and contribute no edges.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use crate::errors::{PipeflowError, PipeflowResult};
use crate::pipeline::TaskDef;

/// Dependency graph over the tasks of a pipeline.
///
/// Nodes are tasks in declaration order; edges carry the dataset type name
/// that links producer to consumer.
pub struct TaskDag {
    graph: DiGraph<usize, String>,
    labels: Vec<String>,
}

impl TaskDag {
    /// Build the dependency graph for `tasks`.
    ///
    /// Every task must carry a resolved task class; an unresolved one fails
    /// with a missing-factory error. Producers are collected over all tasks
    /// before any edge is added, so a dataset type declared as output by two
    /// tasks is reported regardless of declaration order.
    pub fn build(tasks: &[TaskDef]) -> PipeflowResult<Self> {
        let labels: Vec<String> = tasks.iter().map(|t| t.label.clone()).collect();
        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        for idx in 0..tasks.len() {
            graph.add_node(idx);
        }

        // dataset type name -> producing task index
        let mut producers: HashMap<String, usize> = HashMap::new();
        for (idx, task) in tasks.iter().enumerate() {
            let class = task.require_class()?;
            for ds_type in class.output_dataset_types(&task.config).values() {
                if let Some(&previous) = producers.get(&ds_type.name) {
                    return Err(PipeflowError::DuplicateOutput {
                        dataset_type: ds_type.name.clone(),
                        first: labels[previous].clone(),
                        second: task.label.clone(),
                    });
                }
                producers.insert(ds_type.name.clone(), idx);
            }
        }

        for (idx, task) in tasks.iter().enumerate() {
            let class = task.require_class()?;
            for ds_type in class.input_dataset_types(&task.config).values() {
                match producers.get(&ds_type.name) {
                    // a task reading back its own output places no constraint
                    Some(&producer) if producer != idx => {
                        debug!(
                            dataset_type = %ds_type.name,
                            producer = %labels[producer],
                            consumer = %task.label,
                            "dependency edge"
                        );
                        graph.add_edge(
                            NodeIndex::new(producer),
                            NodeIndex::new(idx),
                            ds_type.name.clone(),
                        );
                    }
                    _ => {}
                }
            }
        }

        Ok(Self { graph, labels })
    }

    /// Number of tasks in the graph.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when every producer precedes all of its consumers in the
    /// declaration order.
    pub fn is_ordered(&self) -> bool {
        self.graph
            .edge_references()
            .all(|edge| edge.source().index() < edge.target().index())
    }

    /// Topological order of task indices, stable against declaration order.
    ///
    /// Kahn's algorithm with a min-heap on the original index: among tasks
    /// whose dependencies are all satisfied, the earliest-declared one is
    /// emitted first. An already-valid declaration order therefore comes
    /// back unchanged, and the result is deterministic.
    pub fn stable_topological_order(&self) -> PipeflowResult<Vec<usize>> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|node| self.graph.edges_directed(node, Direction::Incoming).count())
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(self.labels.len());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(idx);
            for edge in self
                .graph
                .edges_directed(NodeIndex::new(idx), Direction::Outgoing)
            {
                let successor = edge.target().index();
                in_degree[successor] -= 1;
                if in_degree[successor] == 0 {
                    ready.push(Reverse(successor));
                }
            }
        }

        if order.len() != self.labels.len() {
            let mut emitted = vec![false; self.labels.len()];
            for &idx in &order {
                emitted[idx] = true;
            }
            let labels = self
                .labels
                .iter()
                .enumerate()
                .filter(|(idx, _)| !emitted[*idx])
                .map(|(_, label)| label.clone())
                .collect();
            return Err(PipeflowError::DataCycle { labels });
        }

        Ok(order)
    }

    /// Generate a DOT diagram of the dependency graph, with dataset type
    /// names as edge labels.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for edge in self.graph.edge_references() {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\" [label=\"{}\"];\n",
                self.labels[edge.source().index()],
                self.labels[edge.target().index()],
                edge.weight()
            ));
        }

        // isolated tasks still belong in the picture
        for node in self.graph.node_indices() {
            if self.graph.neighbors_undirected(node).count() == 0 {
                out.push_str(&format!("    \"{}\";\n", self.labels[node.index()]));
            }
        }

        out.push_str("}\n");
        out
    }
}
