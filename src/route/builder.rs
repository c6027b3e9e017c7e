// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visibility graph construction.
//!
//! The builder places nodes only where a route could plausibly turn:
//! - outward-offset corners of shapes that carry connection points,
//! - crossings of the visibility segments running between those corners,
//! - the routing bounds outline,
//! - crossings of rays cast from corners and connection points.
//!
//! Connection points are then chained into the graph along their forced direction, and every
//! node is linked to its nearest visible neighbor in each cardinal direction.

use std::collections::BTreeMap;

use tracing::debug;

use super::graph::{ray_reach, AxisSegment, VisibilityGraph};
use crate::config::RouterConfig;
use crate::model::geometry::{segment_crosses_any, ConnectionPoint, Direction, Point, Rect, Shape};

/// Seam for graph construction, so routers can be driven by an instrumented builder.
pub trait BuildGraph {
    fn build(
        &self,
        shapes: &[Shape],
        connection_points: &[ConnectionPoint],
        config: &RouterConfig,
    ) -> VisibilityGraph;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityGraphBuilder;

impl BuildGraph for VisibilityGraphBuilder {
    fn build(
        &self,
        shapes: &[Shape],
        connection_points: &[ConnectionPoint],
        config: &RouterConfig,
    ) -> VisibilityGraph {
        build_visibility_graph(shapes, connection_points, config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct OffsetCorner {
    point: Point,
    shape_idx: usize,
}

pub fn build_visibility_graph(
    shapes: &[Shape],
    connection_points: &[ConnectionPoint],
    config: &RouterConfig,
) -> VisibilityGraph {
    let mut graph = VisibilityGraph::new();
    if connection_points.is_empty() {
        debug!(shapes = shapes.len(), "no connection points; visibility graph is empty");
        return graph;
    }

    let connected = shapes_with_connections(shapes, connection_points, config.connection_tolerance);
    let corners = offset_corners(shapes, &connected, config.nudge_distance);
    for corner in &corners {
        graph.add_node(corner.point);
    }

    let segments = visibility_segments(&corners, shapes);
    for (h, v) in perpendicular_pairs(&segments) {
        if let Some(point) = h.crossing(v) {
            graph.add_node(point);
        }
    }

    let bounds = routing_bounds(shapes, &connected, connection_points, config.nudge_distance);
    add_bounds_nodes(&mut graph, bounds, &corners, connection_points, shapes);

    let rays = extension_rays(&corners, connection_points, shapes, config, bounds);
    for (h, v) in perpendicular_pairs(&rays) {
        if let Some(point) = h.crossing(v) {
            graph.add_node(point);
        }
    }

    let segment_count = segments.len();
    graph.set_obstacle_structure(segments, Some(bounds));
    for connection in connection_points {
        graph.extend_connection_point(connection, shapes, config);
    }

    graph.link_grid(shapes);

    debug!(
        shapes = shapes.len(),
        connection_points = connection_points.len(),
        corners = corners.len(),
        segments = segment_count,
        rays = rays.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built visibility graph"
    );
    graph
}

/// Indices of shapes that have at least one connection point on their outline.
fn shapes_with_connections(
    shapes: &[Shape],
    connection_points: &[ConnectionPoint],
    tolerance: f64,
) -> Vec<usize> {
    shapes
        .iter()
        .enumerate()
        .filter(|(_, shape)| {
            connection_points
                .iter()
                .any(|connection| shape.rect().boundary_contains(connection.point(), tolerance))
        })
        .map(|(idx, _)| idx)
        .collect()
}

fn offset_corners(shapes: &[Shape], connected: &[usize], nudge: f64) -> Vec<OffsetCorner> {
    let mut corners = Vec::with_capacity(connected.len() * 4);
    for &shape_idx in connected {
        for point in shapes[shape_idx].rect().expand(nudge).corners() {
            if shapes.iter().any(|other| other.rect().contains_point_strictly(point)) {
                continue;
            }
            corners.push(OffsetCorner { point, shape_idx });
        }
    }
    corners
}

/// Connects corners sharing a row (or column) to their sorted neighbors, dropping blocked links.
fn visibility_segments(corners: &[OffsetCorner], shapes: &[Shape]) -> Vec<AxisSegment> {
    let mut rows = BTreeMap::<i64, Vec<Point>>::new();
    let mut columns = BTreeMap::<i64, Vec<Point>>::new();
    for corner in corners {
        let id = corner.point.node_id();
        rows.entry(id.row_key()).or_default().push(corner.point);
        columns.entry(id.column_key()).or_default().push(corner.point);
    }

    let mut segments = Vec::new();
    for row in rows.values_mut() {
        row.sort_by(|a, b| a.x().total_cmp(&b.x()));
        for pair in row.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.coincides(&b) || segment_crosses_any(a, b, shapes) {
                continue;
            }
            segments.push(AxisSegment::horizontal(a.y(), a.x(), b.x()));
        }
    }
    for column in columns.values_mut() {
        column.sort_by(|a, b| a.y().total_cmp(&b.y()));
        for pair in column.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.coincides(&b) || segment_crosses_any(a, b, shapes) {
                continue;
            }
            segments.push(AxisSegment::vertical(a.x(), a.y(), b.y()));
        }
    }
    segments
}

fn perpendicular_pairs(
    segments: &[AxisSegment],
) -> impl Iterator<Item = (&AxisSegment, &AxisSegment)> + '_ {
    let horizontal = segments.iter().filter(|segment| segment.is_horizontal());
    horizontal.flat_map(move |h| {
        segments.iter().filter(|segment| !segment.is_horizontal()).map(move |v| (h, v))
    })
}

/// Union of connected shapes and connection points, grown by twice the nudge distance.
fn routing_bounds(
    shapes: &[Shape],
    connected: &[usize],
    connection_points: &[ConnectionPoint],
    nudge: f64,
) -> Rect {
    let mut points = connection_points.iter().map(|connection| connection.point());
    let seed = points.next().map(|point| Rect::new(point.x(), point.y(), 0.0, 0.0));
    let mut bounds = seed.unwrap_or_default();
    for point in points {
        bounds = bounds.include_point(point);
    }
    for &idx in connected {
        bounds = bounds.union(shapes[idx].rect());
    }
    bounds.expand(2.0 * nudge)
}

fn add_bounds_nodes(
    graph: &mut VisibilityGraph,
    bounds: Rect,
    corners: &[OffsetCorner],
    connection_points: &[ConnectionPoint],
    shapes: &[Shape],
) {
    let add = |graph: &mut VisibilityGraph, point: Point| {
        if !shapes.iter().any(|shape| shape.rect().contains_point_strictly(point)) {
            graph.add_node(point);
        }
    };

    for point in bounds.corners() {
        add(graph, point);
    }

    let seeds = corners
        .iter()
        .map(|corner| corner.point)
        .chain(connection_points.iter().map(|connection| connection.point()));
    for seed in seeds {
        if seed.x() > bounds.left() && seed.x() < bounds.right() {
            add(graph, Point::new(seed.x(), bounds.top()));
            add(graph, Point::new(seed.x(), bounds.bottom()));
        }
        if seed.y() > bounds.top() && seed.y() < bounds.bottom() {
            add(graph, Point::new(bounds.left(), seed.y()));
            add(graph, Point::new(bounds.right(), seed.y()));
        }
    }
}

fn extension_rays(
    corners: &[OffsetCorner],
    connection_points: &[ConnectionPoint],
    shapes: &[Shape],
    config: &RouterConfig,
    bounds: Rect,
) -> Vec<AxisSegment> {
    let mut rays = Vec::with_capacity(connection_points.len() + corners.len() * 4);
    let mut cast = |origin: Point, direction: Direction, exclude: Option<usize>| {
        let reach =
            ray_reach(origin, direction, shapes, exclude, config.max_extension, Some(bounds));
        if reach > 0.0 {
            rays.push(AxisSegment::ray(origin, direction, reach));
        }
    };

    for connection in connection_points {
        cast(connection.point(), connection.direction(), None);
    }
    for corner in corners {
        for direction in Direction::ALL {
            cast(corner.point, direction, Some(corner.shape_idx));
        }
    }
    rays
}
