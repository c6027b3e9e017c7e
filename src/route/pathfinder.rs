// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use super::graph::VisibilityGraph;
use crate::model::geometry::{manhattan_distance, Direction, Point};
use crate::model::ids::NodeId;

/// How the end of a search is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// The route must reach the end travelling against the end port's direction.
    Strict,
    /// Any heading into the end node is accepted.
    AnyHeading,
}

/// One entry of the search arena; `parent` indexes the state it was reached from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    node: NodeId,
    heading: Direction,
    path_length: f64,
    bends: u32,
    cost: f64,
    parent: Option<usize>,
}

impl SearchState {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn path_length(&self) -> f64 {
        self.path_length
    }

    pub fn bends(&self) -> u32 {
        self.bends
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
}

/// A state popped from the frontier, in pop order. Used by debug overlays only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitedNode {
    order: usize,
    point: Point,
    heading: Direction,
}

impl VisitedNode {
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    points: Vec<Point>,
    bends: u32,
    cost: f64,
}

impl FoundPath {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn bends(&self) -> u32 {
        self.bends
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
}

/// Heap entry ordered by priority, then bend count, then insertion order.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    priority: f64,
    bends: u32,
    seq: u32,
    state: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.bends.cmp(&other.bends))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Direction- and bend-aware best-first search over a [`VisibilityGraph`].
///
/// States are keyed by `(node, heading)`: reaching a node while travelling east is a different
/// state from reaching it travelling south, because only the former continues east for free.
#[derive(Debug)]
pub struct Pathfinder<'g> {
    graph: &'g VisibilityGraph,
    bend_penalty: f64,
    states: Vec<SearchState>,
    visited: Vec<VisitedNode>,
}

impl<'g> Pathfinder<'g> {
    pub fn new(graph: &'g VisibilityGraph, bend_penalty: f64) -> Self {
        Self { graph, bend_penalty, states: Vec::new(), visited: Vec::new() }
    }

    /// Pop order of the most recent search.
    pub fn visited(&self) -> &[VisitedNode] {
        &self.visited
    }

    pub fn into_visited(self) -> Vec<VisitedNode> {
        self.visited
    }

    /// Searches for a route leaving `start` heading `start_direction` and entering `end` from
    /// its `end_direction` side (i.e. travelling `end_direction.reverse()`).
    ///
    /// Returns `None` when either endpoint is not a graph node or the frontier is exhausted.
    pub fn find_path(
        &mut self,
        start: Point,
        start_direction: Direction,
        end: Point,
        end_direction: Direction,
        arrival: Arrival,
    ) -> Option<FoundPath> {
        self.states.clear();
        self.visited.clear();

        let start_id = start.node_id();
        let end_id = end.node_id();
        if !self.graph.contains(start_id) || !self.graph.contains(end_id) || start_id == end_id {
            return None;
        }
        let goal = self.graph.node(end_id)?.point();
        let arrival_heading = end_direction.reverse();

        let mut best = BTreeMap::<(NodeId, Direction), f64>::new();
        let mut closed = BTreeSet::<(NodeId, Direction)>::new();
        let mut heap = BinaryHeap::<Reverse<Frontier>>::new();

        self.states.push(SearchState {
            node: start_id,
            heading: start_direction,
            path_length: 0.0,
            bends: 0,
            cost: 0.0,
            parent: None,
        });
        best.insert((start_id, start_direction), 0.0);
        let h0 = manhattan_distance(self.graph.node(start_id)?.point(), goal);
        heap.push(Reverse(Frontier { priority: h0, bends: 0, seq: 0, state: 0 }));
        let mut tie_seq = 1u32;

        while let Some(Reverse(entry)) = heap.pop() {
            let state = self.states[entry.state];
            let key = (state.node, state.heading);
            if best.get(&key).is_some_and(|&cost| cost < state.cost) {
                continue;
            }
            if !closed.insert(key) {
                continue;
            }
            if let Some(node) = self.graph.node(state.node) {
                self.visited.push(VisitedNode {
                    order: self.visited.len(),
                    point: node.point(),
                    heading: state.heading,
                });
            }

            let accepted = match arrival {
                Arrival::Strict => state.heading == arrival_heading,
                Arrival::AnyHeading => true,
            };
            if state.node == end_id && entry.state != 0 && accepted {
                return Some(self.reconstruct(entry.state, start, end));
            }

            for edge in self.graph.edges_from(state.node) {
                if edge.direction() == state.heading.reverse() {
                    continue;
                }
                if entry.state == 0 && edge.direction() != start_direction {
                    continue;
                }
                let next_key = (edge.to(), edge.direction());
                if closed.contains(&next_key) {
                    continue;
                }

                let bends = state.bends + u32::from(edge.direction() != state.heading);
                let path_length = state.path_length + edge.length();
                let cost = path_length + f64::from(bends) * self.bend_penalty;
                if best.get(&next_key).is_some_and(|&known| known <= cost) {
                    continue;
                }
                best.insert(next_key, cost);

                let Some(next) = self.graph.node(edge.to()) else {
                    continue;
                };
                let priority = cost + manhattan_distance(next.point(), goal);
                self.states.push(SearchState {
                    node: edge.to(),
                    heading: edge.direction(),
                    path_length,
                    bends,
                    cost,
                    parent: Some(entry.state),
                });
                heap.push(Reverse(Frontier {
                    priority,
                    bends,
                    seq: tie_seq,
                    state: self.states.len() - 1,
                }));
                tie_seq = tie_seq.wrapping_add(1);
            }
        }

        None
    }

    fn reconstruct(&self, terminal: usize, start: Point, end: Point) -> FoundPath {
        let terminal_state = self.states[terminal];
        let mut chain = Vec::<NodeId>::new();
        let mut cursor = Some(terminal);
        while let Some(idx) = cursor {
            chain.push(self.states[idx].node);
            cursor = self.states[idx].parent;
        }
        chain.reverse();

        let mut points = chain
            .iter()
            .filter_map(|id| self.graph.node(*id).map(|node| node.point()))
            .collect::<Vec<_>>();

        match points.first_mut() {
            Some(first) if first.coincides(&start) => *first = start,
            _ => points.insert(0, start),
        }
        match points.last_mut() {
            Some(last) if last.coincides(&end) => *last = end,
            _ => points.push(end),
        }

        FoundPath { points, bends: terminal_state.bends, cost: terminal_state.cost }
    }
}
