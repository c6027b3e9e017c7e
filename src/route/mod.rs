// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orthogonal connector routing.
//!
//! A [`Router`] builds (or reuses) a visibility graph for a shape set, searches it for a
//! direction-aware route and post-processes the result into a minimal polyline.

pub mod builder;
pub mod cache;
pub mod graph;
pub mod optimize;
pub mod pathfinder;

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

pub use builder::{build_visibility_graph, BuildGraph, VisibilityGraphBuilder};
pub use cache::{cache_key, RouteCache};
pub use graph::{AxisSegment, VisibilityEdge, VisibilityGraph, VisibilityNode};
pub use optimize::{refine_route, simplify_route};
pub use pathfinder::{Arrival, FoundPath, Pathfinder, SearchState, VisitedNode};

use crate::config::RouterConfig;
use crate::model::geometry::{ConnectionPoint, Direction, Point, Shape, EPSILON};

/// One connector to route: endpoints, their port directions and any extra ports that should
/// shape the visibility graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorRequest {
    start: Point,
    end: Point,
    start_direction: Direction,
    end_direction: Direction,
    connection_points: Vec<ConnectionPoint>,
}

impl ConnectorRequest {
    /// A left-to-right connector: leaves `start` heading east, enters `end` from the west.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            start_direction: Direction::East,
            end_direction: Direction::West,
            connection_points: Vec::new(),
        }
    }

    pub fn with_directions(mut self, start_direction: Direction, end_direction: Direction) -> Self {
        self.start_direction = start_direction;
        self.end_direction = end_direction;
        self
    }

    pub fn with_connection_points(
        mut self,
        connection_points: impl IntoIterator<Item = ConnectionPoint>,
    ) -> Self {
        self.connection_points.extend(connection_points);
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn start_direction(&self) -> Direction {
        self.start_direction
    }

    pub fn end_direction(&self) -> Direction {
        self.end_direction
    }

    pub fn connection_points(&self) -> &[ConnectionPoint] {
        &self.connection_points
    }

    /// Ports fed to the graph builder: both endpoints first, then the extra points.
    pub fn routing_points(&self) -> Vec<ConnectionPoint> {
        let mut points = Vec::with_capacity(self.connection_points.len() + 2);
        points.push(ConnectionPoint::at(self.start, self.start_direction));
        points.push(ConnectionPoint::at(self.end, self.end_direction));
        points.extend(self.connection_points.iter().copied());
        points
    }
}

/// How a route was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteStatus {
    /// Both port directions are honored.
    Found,
    /// The start direction is honored; the route enters the end point from another side.
    Relaxed,
    /// No route through the graph; a direct elbow that may cross shapes.
    Fallback,
}

impl RouteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::Relaxed => "relaxed",
            Self::Fallback => "fallback",
        }
    }
}

/// A routed connector plus the debug data behind it.
#[derive(Debug, Clone)]
pub struct RoutedConnector {
    points: Vec<Point>,
    raw_points: Vec<Point>,
    status: RouteStatus,
    graph: Arc<VisibilityGraph>,
    visited: Vec<VisitedNode>,
}

impl RoutedConnector {
    /// Final polyline, at least two points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Search output before simplification.
    pub fn raw_points(&self) -> &[Point] {
        &self.raw_points
    }

    pub fn status(&self) -> RouteStatus {
        self.status
    }

    /// The graph the route was searched on.
    pub fn graph(&self) -> &Arc<VisibilityGraph> {
        &self.graph
    }

    pub fn visited(&self) -> &[VisitedNode] {
        &self.visited
    }

    /// Number of heading changes along the final polyline.
    pub fn bends(&self) -> usize {
        self.points
            .windows(3)
            .filter(|run| Direction::between(run[0], run[1]) != Direction::between(run[1], run[2]))
            .count()
    }
}

/// Routes connectors between shapes, caching visibility graphs per shape set.
#[derive(Debug, Clone)]
pub struct Router<B = VisibilityGraphBuilder> {
    config: RouterConfig,
    cache: RouteCache,
    builder: B,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self::with_builder(config, VisibilityGraphBuilder)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl<B: BuildGraph> Router<B> {
    pub fn with_builder(config: RouterConfig, builder: B) -> Self {
        let cache = RouteCache::from_config(&config);
        Self { config, cache, builder }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Drops all cached graphs, e.g. after the diagram changed substantially.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn route(&mut self, shapes: &[Shape], request: &ConnectorRequest) -> RoutedConnector {
        if request.start.coincides(&request.end) {
            return trivial_route(request);
        }
        let (graph, cached) = self.graph_for(shapes, &request.routing_points());
        self.route_on(shapes, request, graph, cached)
    }

    /// Routes several connectors against one shape set.
    ///
    /// The graph is fetched or built once with every request's ports, then the requests are
    /// searched in parallel. Each connector is routed independently of the others.
    pub fn route_all(
        &mut self,
        shapes: &[Shape],
        requests: &[ConnectorRequest],
    ) -> Vec<RoutedConnector>
    where
        B: Sync,
    {
        if requests.is_empty() {
            return Vec::new();
        }
        let points = requests.iter().flat_map(ConnectorRequest::routing_points).collect::<Vec<_>>();
        let (graph, cached) = self.graph_for(shapes, &points);
        let this = &*self;
        requests
            .par_iter()
            .map(|request| {
                if request.start.coincides(&request.end) {
                    trivial_route(request)
                } else {
                    this.route_on(shapes, request, Arc::clone(&graph), cached)
                }
            })
            .collect()
    }

    /// Returns the graph for `shapes` and whether it came from the cache.
    ///
    /// A cached graph that lacks some of `points` is copied and the missing ports are spliced
    /// into the copy; the cached entry itself is never modified.
    fn graph_for(
        &mut self,
        shapes: &[Shape],
        points: &[ConnectionPoint],
    ) -> (Arc<VisibilityGraph>, bool) {
        if let Some(graph) = self.cache.get(shapes) {
            let missing = points
                .iter()
                .filter(|connection| !graph.contains(connection.point().node_id()))
                .collect::<Vec<_>>();
            trace!(shapes = shapes.len(), missing = missing.len(), "route cache hit");
            if missing.is_empty() {
                return (graph, true);
            }
            let mut spliced = (*graph).clone();
            for connection in missing {
                spliced.attach_connection_point(connection, shapes, &self.config);
            }
            return (Arc::new(spliced), true);
        }

        trace!(shapes = shapes.len(), "route cache miss");
        let graph = Arc::new(self.builder.build(shapes, points, &self.config));
        self.cache.set(shapes, Arc::clone(&graph));
        (graph, false)
    }

    fn route_on(
        &self,
        shapes: &[Shape],
        request: &ConnectorRequest,
        graph: Arc<VisibilityGraph>,
        cached: bool,
    ) -> RoutedConnector {
        let penalty = self.config.bend_penalty;
        let mut graph = graph;
        let (mut found, mut visited) = search(&graph, request, penalty, Arrival::Strict);
        let mut status = RouteStatus::Found;

        // Cached graphs lack the corners of shapes only this connector touches.
        if found.is_none() && cached {
            debug!("no strict route on cached graph; rebuilding for this connector");
            let points = request.routing_points();
            let fresh = Arc::new(self.builder.build(shapes, &points, &self.config));
            (found, visited) = search(&fresh, request, penalty, Arrival::Strict);
            graph = fresh;
        }
        if found.is_none() {
            (found, visited) = search(&graph, request, penalty, Arrival::AnyHeading);
            status = RouteStatus::Relaxed;
        }

        let (raw_points, status) = match found {
            Some(path) => (path.into_points(), status),
            None => {
                warn!(
                    start = ?request.start,
                    end = ?request.end,
                    "no orthogonal route found; using direct fallback"
                );
                (fallback_route(request), RouteStatus::Fallback)
            }
        };

        let points = if self.config.refine && status != RouteStatus::Fallback {
            refine_route(&raw_points, shapes, self.config.nudge_distance)
        } else {
            simplify_route(&raw_points)
        };

        RoutedConnector { points, raw_points, status, graph, visited }
    }
}

fn search(
    graph: &VisibilityGraph,
    request: &ConnectorRequest,
    bend_penalty: f64,
    arrival: Arrival,
) -> (Option<FoundPath>, Vec<VisitedNode>) {
    let mut finder = Pathfinder::new(graph, bend_penalty);
    let found = finder.find_path(
        request.start,
        request.start_direction,
        request.end,
        request.end_direction,
        arrival,
    );
    (found, finder.into_visited())
}

fn trivial_route(request: &ConnectorRequest) -> RoutedConnector {
    let points = vec![request.start, request.end];
    RoutedConnector {
        raw_points: points.clone(),
        points,
        status: RouteStatus::Found,
        graph: Arc::new(VisibilityGraph::new()),
        visited: Vec::new(),
    }
}

/// Straight line when the endpoints are aligned, otherwise one elbow whose first leg runs along
/// the start direction's axis.
fn fallback_route(request: &ConnectorRequest) -> Vec<Point> {
    let (start, end) = (request.start, request.end);
    let aligned = (start.x() - end.x()).abs() <= EPSILON || (start.y() - end.y()).abs() <= EPSILON;
    if aligned {
        return vec![start, end];
    }
    let elbow = if request.start_direction.is_horizontal() {
        Point::new(end.x(), start.y())
    } else {
        Point::new(start.x(), end.y())
    };
    vec![start, elbow, end]
}

/// Routes one connector with a throwaway default router.
pub fn find_orthogonal_route(
    start: Point,
    end: Point,
    shapes: &[Shape],
    start_direction: Direction,
    end_direction: Direction,
    connection_points: Option<&[ConnectionPoint]>,
) -> Vec<Point> {
    let request = ConnectorRequest::new(start, end)
        .with_directions(start_direction, end_direction)
        .with_connection_points(connection_points.unwrap_or_default().iter().copied());
    Router::default().route(shapes, &request).into_points()
}
