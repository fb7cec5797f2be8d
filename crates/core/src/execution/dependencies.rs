//! Task dependency management
//!
//! This module holds the directed acyclic graph between tasks and resolves the order in
//! which task runs happen: prerequisites first, in declaration order, each distinct run
//! exactly once.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::task_execution::PlannedTask;
use crate::tasks::{Task, TaskOptions};
use crate::types::{ChoresError, ChoresResult};

/// Graph of task names; an edge points from a task to one of its prerequisites and
/// carries the options the prerequisite is invoked with.
#[derive(Debug)]
pub struct TaskGraph {
    graph: DiGraph<String, TaskOptions>,
    node_map: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    /// Build the graph for a set of tasks.
    ///
    /// # Errors
    ///
    /// Fails when a prerequisite names an unregistered task or when the prerequisites
    /// form a cycle.
    pub fn new(tasks: &[Task]) -> ChoresResult<Self> {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for task in tasks {
            let node = graph.add_node(task.name.clone());
            node_map.insert(task.name.clone(), node);
        }

        let mut available: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        available.sort_unstable();

        for task in tasks {
            let from = node_map[&task.name];
            for pre in &task.prerequisites {
                let to = node_map
                    .get(&pre.name)
                    .ok_or_else(|| ChoresError::UnknownTask {
                        name: pre.name.clone(),
                        available: available.join(", "),
                    })?;
                graph.add_edge(from, *to, pre.options.normalized());
            }
        }

        toposort(&graph, None).map_err(|cycle| {
            ChoresError::CircularDependency(format!(
                "Cycle detected involving task '{}'",
                graph[cycle.node_id()]
            ))
        })?;

        Ok(Self { graph, node_map })
    }

    /// Direct prerequisites of a task, in declaration order
    pub fn prerequisites(&self, name: &str) -> Vec<PlannedTask> {
        let Some(&node) = self.node_map.get(name) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self.graph.edges(node).collect();
        edges.sort_by_key(|edge| edge.id());
        edges
            .into_iter()
            .map(|edge| PlannedTask {
                name: self.graph[edge.target()].clone(),
                options: edge.weight().clone(),
            })
            .collect()
    }

    /// Order in which task runs happen when `name` is invoked with `options`.
    ///
    /// Depth-first post-order: every prerequisite comes before its dependents and a
    /// task invoked with the same options is only visited once, however many paths
    /// lead to it. The requested task is always last.
    pub fn execution_order(
        &self,
        name: &str,
        options: &TaskOptions,
    ) -> ChoresResult<Vec<PlannedTask>> {
        if !self.node_map.contains_key(name) {
            let mut available: Vec<&str> = self.node_map.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(ChoresError::UnknownTask {
                name: name.to_string(),
                available: available.join(", "),
            });
        }

        let mut order = Vec::new();
        let mut visited = HashSet::new();
        self.visit(
            PlannedTask {
                name: name.to_string(),
                options: options.normalized(),
            },
            &mut visited,
            &mut order,
        );
        Ok(order)
    }

    fn visit(
        &self,
        current: PlannedTask,
        visited: &mut HashSet<PlannedTask>,
        order: &mut Vec<PlannedTask>,
    ) {
        if visited.contains(&current) {
            return;
        }
        visited.insert(current.clone());

        for pre in self.prerequisites(&current.name) {
            self.visit(pre, visited, order);
        }

        order.push(current);
    }
}
