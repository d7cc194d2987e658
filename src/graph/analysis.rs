//! Graph analysis: cycle detection over a graph description.

use crate::graph::description::GraphDescription;
use ahash::AHashMap;
use std::collections::BTreeSet;

/// A cycle in the graph (list of table names forming the cycle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub tables: Vec<String>,
}

impl Cycle {
    /// Check if this is a self-referencing cycle (single table)
    pub fn is_self_reference(&self) -> bool {
        self.tables.len() == 1
    }

    /// Format the cycle for display
    pub fn display(&self) -> String {
        if self.is_self_reference() {
            format!("{} -> {} (self-reference)", self.tables[0], self.tables[0])
        } else {
            let mut parts = self.tables.clone();
            parts.push(self.tables[0].clone());
            parts.join(" -> ")
        }
    }
}

/// Find all cycles using Tarjan's SCC algorithm.
///
/// Each cycle lists its tables sorted by name; cycles are sorted by their
/// first table.
pub fn find_cycles(desc: &GraphDescription) -> Vec<Cycle> {
    let names: Vec<&str> = desc.nodes.iter().map(|n| n.name.as_str()).collect();
    let index: AHashMap<&str, usize> = names.iter().enumerate().map(|(i, n)| (*n, i)).collect();

    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); names.len()];
    let mut self_loops = vec![false; names.len()];
    for edge in &desc.edges {
        if let (Some(&from), Some(&to)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) {
            adjacency[from].insert(to);
            if from == to {
                self_loops[from] = true;
            }
        }
    }
    let adjacency: Vec<Vec<usize>> = adjacency.into_iter().map(|s| s.into_iter().collect()).collect();

    let mut cycles: Vec<Cycle> = tarjan_scc(&adjacency)
        .into_iter()
        .filter(|scc| scc.len() > 1 || self_loops[scc[0]])
        .map(|scc| {
            let mut tables: Vec<String> = scc.iter().map(|&i| names[i].to_string()).collect();
            tables.sort();
            Cycle { tables }
        })
        .collect();

    cycles.sort_by(|a, b| a.tables.cmp(&b.tables));
    cycles
}

/// Get all tables that are part of any cycle
pub fn cyclic_tables(desc: &GraphDescription) -> BTreeSet<String> {
    find_cycles(desc)
        .into_iter()
        .flat_map(|c| c.tables)
        .collect()
}

const UNVISITED: usize = usize::MAX;

/// Iterative Tarjan so deep reference chains cannot exhaust the stack
fn tarjan_scc(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adjacency.len();
    let mut index_counter = 0;
    let mut indices = vec![UNVISITED; n];
    let mut lowlinks = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut sccs: Vec<Vec<usize>> = Vec::new();

    for root in 0..n {
        if indices[root] != UNVISITED {
            continue;
        }

        // (node, next neighbor position)
        let mut work: Vec<(usize, usize)> = vec![(root, 0)];
        indices[root] = index_counter;
        lowlinks[root] = index_counter;
        index_counter += 1;
        stack.push(root);
        on_stack[root] = true;

        while let Some(&(v, pos)) = work.last() {
            if let Some(&w) = adjacency[v].get(pos) {
                if let Some(top) = work.last_mut() {
                    top.1 += 1;
                }
                if indices[w] == UNVISITED {
                    indices[w] = index_counter;
                    lowlinks[w] = index_counter;
                    index_counter += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    work.push((w, 0));
                } else if on_stack[w] {
                    lowlinks[v] = lowlinks[v].min(indices[w]);
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                lowlinks[parent] = lowlinks[parent].min(lowlinks[v]);
            }

            if lowlinks[v] == indices[v] {
                let mut scc = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    sccs
}
