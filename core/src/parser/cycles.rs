//! Elementary cycle enumeration (Johnson's algorithm)
//!
//! Vertices are action indices; `adjacency[v]` lists the actions `v` needs.
//! Every elementary cycle is returned exactly once, rotated so that it starts
//! at its lowest vertex, and the cycles are sorted lexicographically. Two
//! graphs with the same adjacency lists therefore always produce the same
//! cycles in the same order.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

pub fn elementary_cycles(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut cycles = Vec::new();
    let mut start = 0;

    while let Some((least, members)) = least_component(adjacency, start) {
        let mut search = CircuitSearch::new(adjacency, &members, least);
        search.circuit(least);
        cycles.append(&mut search.cycles);
        start = least + 1;
    }

    cycles.sort();
    cycles
}

/// The strongly connected component holding the lowest vertex `>= start`
/// that can still be part of a cycle, restricted to vertices `>= start`.
///
/// Returns that vertex and a membership mask over all vertices.
fn least_component(adjacency: &[Vec<usize>], start: usize) -> Option<(usize, Vec<bool>)> {
    let count = adjacency.len();
    if start >= count {
        return None;
    }

    let mut graph = DiGraph::<usize, ()>::with_capacity(count - start, 0);
    let nodes: Vec<NodeIndex> = (start..count).map(|v| graph.add_node(v)).collect();
    for v in start..count {
        for &w in adjacency[v].iter().filter(|&&w| w >= start && w < count) {
            graph.update_edge(nodes[v - start], nodes[w - start], ());
        }
    }

    tarjan_scc(&graph)
        .into_iter()
        .map(|component| component.into_iter().map(|n| graph[n]).collect::<Vec<_>>())
        .filter(|component| {
            component.len() > 1 || component.iter().any(|v| adjacency[*v].contains(v))
        })
        .filter_map(|component| {
            let least = component.iter().copied().min()?;
            let mut members = vec![false; count];
            for v in component {
                members[v] = true;
            }
            Some((least, members))
        })
        .min_by_key(|(least, _)| *least)
}

/// Circuit search from one start vertex within one component
struct CircuitSearch<'a> {
    adjacency: &'a [Vec<usize>],
    members: &'a [bool],
    start: usize,
    blocked: Vec<bool>,
    /// Vertices to unblock once the key vertex is unblocked
    blocked_by: Vec<Vec<usize>>,
    stack: Vec<usize>,
    cycles: Vec<Vec<usize>>,
}

impl<'a> CircuitSearch<'a> {
    fn new(adjacency: &'a [Vec<usize>], members: &'a [bool], start: usize) -> Self {
        let count = adjacency.len();
        Self {
            adjacency,
            members,
            start,
            blocked: vec![false; count],
            blocked_by: vec![Vec::new(); count],
            stack: Vec::new(),
            cycles: Vec::new(),
        }
    }

    fn successors(&self, v: usize) -> impl Iterator<Item = usize> + 'a {
        let adjacency = self.adjacency;
        let members = self.members;
        adjacency[v]
            .iter()
            .copied()
            .filter(move |&w| members.get(w).copied().unwrap_or(false))
    }

    fn circuit(&mut self, v: usize) -> bool {
        let mut found = false;
        self.stack.push(v);
        self.blocked[v] = true;

        for w in self.successors(v) {
            if w == self.start {
                self.cycles.push(self.stack.clone());
                found = true;
            } else if !self.blocked[w] && self.circuit(w) {
                found = true;
            }
        }

        if found {
            self.unblock(v);
        } else {
            for w in self.successors(v) {
                if !self.blocked_by[w].contains(&v) {
                    self.blocked_by[w].push(v);
                }
            }
        }

        self.stack.pop();
        found
    }

    fn unblock(&mut self, v: usize) {
        self.blocked[v] = false;
        for w in std::mem::take(&mut self.blocked_by[v]) {
            if self.blocked[w] {
                self.unblock(w);
            }
        }
    }
}
