// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;

use crate::config::RouterConfig;
use crate::model::geometry::{
    manhattan_distance, segment_crosses_any, ConnectionPoint, Direction, Point, Rect, Shape,
    EPSILON,
};
use crate::model::ids::NodeId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityNode {
    id: NodeId,
    point: Point,
}

impl VisibilityNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn point(&self) -> Point {
        self.point
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEdge {
    from: NodeId,
    to: NodeId,
    direction: Direction,
    length: f64,
}

impl VisibilityEdge {
    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

/// Most nodes have one neighbor per cardinal direction.
type Adjacency = SmallVec<[VisibilityEdge; 4]>;

/// A horizontal or vertical segment, stored with `start <= end` along its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisSegment {
    Horizontal { y: f64, x1: f64, x2: f64 },
    Vertical { x: f64, y1: f64, y2: f64 },
}

impl AxisSegment {
    pub fn horizontal(y: f64, xa: f64, xb: f64) -> Self {
        Self::Horizontal { y, x1: xa.min(xb), x2: xa.max(xb) }
    }

    pub fn vertical(x: f64, ya: f64, yb: f64) -> Self {
        Self::Vertical { x, y1: ya.min(yb), y2: ya.max(yb) }
    }

    /// Segment covered by a ray of length `reach` cast from `origin`.
    pub fn ray(origin: Point, direction: Direction, reach: f64) -> Self {
        let end = origin.step(direction, reach);
        if direction.is_horizontal() {
            Self::horizontal(origin.y(), origin.x(), end.x())
        } else {
            Self::vertical(origin.x(), origin.y(), end.y())
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Horizontal { .. })
    }

    /// Crossing point with a perpendicular segment, endpoints included.
    pub fn crossing(&self, other: &AxisSegment) -> Option<Point> {
        let (h, v) = match (self, other) {
            (Self::Horizontal { .. }, Self::Vertical { .. }) => (self, other),
            (Self::Vertical { .. }, Self::Horizontal { .. }) => (other, self),
            _ => return None,
        };
        let (&Self::Horizontal { y, x1, x2 }, &Self::Vertical { x, y1, y2 }) = (h, v) else {
            return None;
        };
        let inside_x = x >= x1 - EPSILON && x <= x2 + EPSILON;
        let inside_y = y >= y1 - EPSILON && y <= y2 + EPSILON;
        (inside_x && inside_y).then(|| Point::new(x, y))
    }
}

/// Orthogonal visibility graph over "interesting" routing points.
///
/// Nodes are deduplicated by [`NodeId`]; edges are directed and stored per source node. The
/// graph also keeps the obstacle-derived structure it was built from (visibility segments and
/// the routing bounds) so that extra connection points can be spliced in later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityGraph {
    nodes: BTreeMap<NodeId, VisibilityNode>,
    edges: BTreeMap<NodeId, Adjacency>,
    segments: Vec<AxisSegment>,
    bounds: Option<Rect>,
}

impl VisibilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node at `point` unless one already exists for the same id.
    pub fn add_node(&mut self, point: Point) -> NodeId {
        let id = point.node_id();
        self.nodes
            .entry(id)
            .or_insert_with(|| VisibilityNode { id, point: Point::new(id.x(), id.y()) });
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&VisibilityNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &VisibilityNode> + '_ {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_from(&self, id: NodeId) -> &[VisibilityEdge] {
        self.edges.get(&id).map(|edges| edges.as_slice()).unwrap_or(&[])
    }

    pub fn edges(&self) -> impl Iterator<Item = &VisibilityEdge> + '_ {
        self.edges.values().flat_map(|edges| edges.iter())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|edges| edges.len()).sum()
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges_from(from).iter().any(|edge| edge.to == to)
    }

    /// True when every edge has its reverse counterpart.
    pub fn is_symmetric(&self) -> bool {
        self.edges().all(|edge| {
            self.edges_from(edge.to)
                .iter()
                .any(|back| back.to == edge.from && back.direction == edge.direction.reverse())
        })
    }

    pub fn segments(&self) -> &[AxisSegment] {
        &self.segments
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub(crate) fn set_obstacle_structure(
        &mut self,
        segments: Vec<AxisSegment>,
        bounds: Option<Rect>,
    ) {
        self.segments = segments;
        self.bounds = bounds;
    }

    /// Adds a directed edge between two existing, axis-aligned, distinct nodes.
    ///
    /// Returns `false` when the edge is rejected or already present.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        let (Some(a), Some(b)) = (self.nodes.get(&from), self.nodes.get(&to)) else {
            return false;
        };
        let Some(direction) = Direction::between(a.point, b.point) else {
            return false;
        };
        let length = manhattan_distance(a.point, b.point);
        if self.has_edge(from, to) {
            return false;
        }
        self.edges.entry(from).or_default().push(VisibilityEdge { from, to, direction, length });
        true
    }

    pub fn add_edge_pair(&mut self, a: NodeId, b: NodeId) {
        self.add_edge(a, b);
        self.add_edge(b, a);
    }

    fn point_of(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(&id).map(|node| node.point)
    }

    fn link_if_visible(&mut self, a: NodeId, b: NodeId, shapes: &[Shape]) {
        let (Some(pa), Some(pb)) = (self.point_of(a), self.point_of(b)) else {
            return;
        };
        if !segment_crosses_any(pa, pb, shapes) {
            self.add_edge_pair(a, b);
        }
    }

    /// Links every node to its nearest neighbor in each cardinal direction.
    ///
    /// Neighbors along a row or column are adjacent in sorted order, so each link is added in
    /// both directions and the resulting grid is symmetric.
    pub(crate) fn link_grid(&mut self, shapes: &[Shape]) {
        let mut rows = BTreeMap::<i64, Vec<NodeId>>::new();
        let mut columns = BTreeMap::<i64, Vec<NodeId>>::new();
        // Node ids order by (x, y): rows come out sorted by x, columns by y.
        for id in self.nodes.keys() {
            rows.entry(id.row_key()).or_default().push(*id);
            columns.entry(id.column_key()).or_default().push(*id);
        }

        let pairs = rows
            .values()
            .chain(columns.values())
            .flat_map(|line| line.windows(2).map(|pair| (pair[0], pair[1])))
            .collect::<Vec<_>>();
        for (a, b) in pairs {
            self.link_if_visible(a, b, shapes);
        }
    }

    /// Links a single node to its nearest visible neighbor in each cardinal direction.
    pub(crate) fn link_node(&mut self, id: NodeId, shapes: &[Shape]) {
        let Some(origin) = self.point_of(id) else {
            return;
        };
        for direction in Direction::ALL {
            let nearest = self
                .nodes
                .values()
                .filter(|node| node.id != id)
                .filter(|node| Direction::between(origin, node.point) == Some(direction))
                .min_by(|a, b| {
                    manhattan_distance(origin, a.point)
                        .total_cmp(&manhattan_distance(origin, b.point))
                        .then_with(|| a.id.cmp(&b.id))
                })
                .map(|node| node.id);
            if let Some(neighbor) = nearest {
                self.link_if_visible(id, neighbor, shapes);
            }
        }
    }

    /// Walks outward from a connection point in its forced direction and chains edges through
    /// every visibility-segment crossing, aligned node and the bounds edge it meets.
    ///
    /// Falls back to linking the nearest aligned nodes when the walk meets nothing.
    pub(crate) fn extend_connection_point(
        &mut self,
        connection: &ConnectionPoint,
        shapes: &[Shape],
        config: &RouterConfig,
    ) -> NodeId {
        let origin = connection.point();
        let direction = connection.direction();
        let origin_id = self.add_node(origin);
        let reach = ray_reach(origin, direction, shapes, None, config.max_extension, self.bounds);
        let ray = AxisSegment::ray(origin, direction, reach);

        let mut hits = Vec::<(f64, Point)>::new();
        if reach > EPSILON {
            for segment in &self.segments {
                if let Some(point) = ray.crossing(segment) {
                    hits.push((manhattan_distance(origin, point), point));
                }
            }
            for node in self.nodes.values() {
                if node.id == origin_id {
                    continue;
                }
                if Direction::between(origin, node.point) != Some(direction) {
                    continue;
                }
                let distance = manhattan_distance(origin, node.point);
                if distance <= reach + EPSILON {
                    hits.push((distance, node.point));
                }
            }
            if let Some(bounds) = self.bounds {
                let edge = bounds.edge(direction);
                let distance = match direction {
                    Direction::East | Direction::South => edge - origin_coord(origin, direction),
                    Direction::West | Direction::North => origin_coord(origin, direction) - edge,
                };
                if distance > EPSILON && distance <= reach + EPSILON {
                    hits.push((distance, origin.step(direction, distance)));
                }
            }
        }

        hits.retain(|(distance, _)| *distance > EPSILON);
        hits.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        hits.dedup_by_key(|(_, point)| point.node_id());

        if hits.is_empty() {
            self.link_nearest_aligned(origin_id, shapes);
            return origin_id;
        }

        let mut previous = origin_id;
        for (_, point) in hits {
            let id = self.add_node(point);
            if id == previous {
                continue;
            }
            self.add_edge_pair(previous, id);
            previous = id;
        }
        origin_id
    }

    /// Connects `id` to the nearest visible node in each direction it is aligned with, at most
    /// four links overall, nearest first.
    fn link_nearest_aligned(&mut self, id: NodeId, shapes: &[Shape]) {
        let Some(origin) = self.point_of(id) else {
            return;
        };
        let mut nearest = BTreeMap::<Direction, (f64, NodeId)>::new();
        for node in self.nodes.values() {
            let Some(direction) = Direction::between(origin, node.point) else {
                continue;
            };
            if segment_crosses_any(origin, node.point, shapes) {
                continue;
            }
            let distance = manhattan_distance(origin, node.point);
            let entry = nearest.entry(direction).or_insert((distance, node.id));
            if distance < entry.0 {
                *entry = (distance, node.id);
            }
        }

        let mut candidates = nearest.into_values().collect::<Vec<_>>();
        candidates.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        for (_, neighbor) in candidates.into_iter().take(4) {
            self.add_edge_pair(id, neighbor);
        }
    }

    /// Splices a connection point into an already built graph.
    ///
    /// Applies the connection-point walk and then grid-links every node the walk created, so the
    /// result is searchable from (or to) `connection` even if the graph was built for other
    /// endpoints.
    pub fn attach_connection_point(
        &mut self,
        connection: &ConnectionPoint,
        shapes: &[Shape],
        config: &RouterConfig,
    ) -> NodeId {
        let before = self.nodes.keys().copied().collect::<BTreeSet<_>>();
        let id = self.extend_connection_point(connection, shapes, config);
        let added = self
            .nodes
            .keys()
            .filter(|node| !before.contains(node))
            .copied()
            .collect::<Vec<_>>();
        for node in added {
            self.link_node(node, shapes);
        }
        self.link_node(id, shapes);
        id
    }
}

fn origin_coord(origin: Point, direction: Direction) -> f64 {
    if direction.is_horizontal() {
        origin.x()
    } else {
        origin.y()
    }
}

/// Distance a ray from `origin` can travel before meeting a shape edge.
///
/// The result is capped at `max_extension` and clipped to `bounds`. A ray starting inside a
/// shape has zero reach. `exclude` skips the shape at that index (the ray's own shape).
pub(crate) fn ray_reach(
    origin: Point,
    direction: Direction,
    shapes: &[Shape],
    exclude: Option<usize>,
    max_extension: f64,
    bounds: Option<Rect>,
) -> f64 {
    let (x, y) = (origin.x(), origin.y());
    let mut reach = max_extension;

    for (idx, shape) in shapes.iter().enumerate() {
        if exclude == Some(idx) {
            continue;
        }
        let rect = shape.rect();
        let across_y = y > rect.top() + EPSILON && y < rect.bottom() - EPSILON;
        let across_x = x > rect.left() + EPSILON && x < rect.right() - EPSILON;
        let distance = match direction {
            Direction::East if across_y && rect.right() > x + EPSILON => Some(rect.left() - x),
            Direction::West if across_y && rect.left() < x - EPSILON => Some(x - rect.right()),
            Direction::South if across_x && rect.bottom() > y + EPSILON => Some(rect.top() - y),
            Direction::North if across_x && rect.top() < y - EPSILON => Some(y - rect.bottom()),
            _ => None,
        };
        if let Some(distance) = distance {
            reach = reach.min(distance.max(0.0));
        }
    }

    if let Some(bounds) = bounds {
        let to_edge = match direction {
            Direction::East => bounds.right() - x,
            Direction::West => x - bounds.left(),
            Direction::South => bounds.bottom() - y,
            Direction::North => y - bounds.top(),
        };
        reach = reach.min(to_edge.max(0.0));
    }

    reach
}
