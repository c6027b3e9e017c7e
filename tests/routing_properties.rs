// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use orthoroute::format::{RouteRequestJson, RouteResponseJson};
use orthoroute::model::{segment_crosses_any, ConnectionPoint, Direction, Point, Shape, ShapeId};
use orthoroute::route::{
    build_visibility_graph, simplify_route, BuildGraph, ConnectorRequest, RouteCache, RouteStatus,
    Router, VisibilityGraph,
};
use orthoroute::{find_orthogonal_route, RouterConfig};
use rstest::{fixture, rstest};

fn shape(id: &str, x: f64, y: f64, width: f64, height: f64) -> Shape {
    Shape::new(ShapeId::new(id).unwrap(), x, y, width, height)
}

#[fixture]
fn two_boxes() -> Vec<Shape> {
    vec![shape("A", 0.0, 0.0, 100.0, 50.0), shape("B", 200.0, 0.0, 100.0, 50.0)]
}

#[fixture]
fn blocked_gap(two_boxes: Vec<Shape>) -> Vec<Shape> {
    let mut shapes = two_boxes;
    shapes.push(shape("C", 130.0, -20.0, 40.0, 90.0));
    shapes
}

/// A 3x3 grid of boxes with 80-unit gutters.
#[fixture]
fn grid() -> Vec<Shape> {
    let mut shapes = Vec::new();
    for row in 0..3 {
        for col in 0..3 {
            let id = format!("g{row}{col}");
            shapes.push(shape(&id, f64::from(col) * 160.0, f64::from(row) * 120.0, 80.0, 40.0));
        }
    }
    shapes
}

#[derive(Debug, Default)]
struct CountingBuilder {
    builds: AtomicUsize,
}

impl BuildGraph for CountingBuilder {
    fn build(
        &self,
        shapes: &[Shape],
        connection_points: &[ConnectionPoint],
        config: &RouterConfig,
    ) -> VisibilityGraph {
        self.builds.fetch_add(1, Ordering::SeqCst);
        build_visibility_graph(shapes, connection_points, config)
    }
}

/// Side midpoints of every grid box, each facing outward.
fn grid_ports(shapes: &[Shape]) -> Vec<(usize, ConnectionPoint)> {
    let mut ports = Vec::new();
    for (idx, shape) in shapes.iter().enumerate() {
        let rect = shape.rect();
        let (cx, cy) = (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);
        ports.push((idx, ConnectionPoint::new(cx, rect.top(), Direction::North)));
        ports.push((idx, ConnectionPoint::new(cx, rect.bottom(), Direction::South)));
        ports.push((idx, ConnectionPoint::new(rect.left(), cy, Direction::West)));
        ports.push((idx, ConnectionPoint::new(rect.right(), cy, Direction::East)));
    }
    ports
}

fn assert_orthogonal_and_clear(points: &[Point], shapes: &[Shape]) {
    assert!(points.len() >= 2, "route has fewer than two points: {points:?}");
    for pair in points.windows(2) {
        assert!(
            Direction::between(pair[0], pair[1]).is_some(),
            "non-orthogonal segment {:?} -> {:?}",
            pair[0],
            pair[1]
        );
        assert!(!segment_crosses_any(pair[0], pair[1], shapes), "segment {pair:?} crosses a shape");
    }
}

fn first_heading(points: &[Point]) -> Option<Direction> {
    Direction::between(points[0], points[1])
}

fn last_heading(points: &[Point]) -> Option<Direction> {
    let n = points.len();
    Direction::between(points[n - 2], points[n - 1])
}

#[rstest]
fn scenario_straight_gap(two_boxes: Vec<Shape>) {
    let points = find_orthogonal_route(
        Point::new(100.0, 25.0),
        Point::new(200.0, 25.0),
        &two_boxes,
        Direction::East,
        Direction::West,
        None,
    );
    assert_eq!(points, vec![Point::new(100.0, 25.0), Point::new(200.0, 25.0)]);
}

#[rstest]
fn scenario_detour_around_blocker(blocked_gap: Vec<Shape>) {
    let points = find_orthogonal_route(
        Point::new(100.0, 25.0),
        Point::new(200.0, 25.0),
        &blocked_gap,
        Direction::East,
        Direction::West,
        None,
    );

    assert_orthogonal_and_clear(&points, &blocked_gap);
    assert_eq!(first_heading(&points), Some(Direction::East));
    assert_eq!(last_heading(&points), Some(Direction::East));
    let vertical = points
        .windows(2)
        .filter_map(|pair| Direction::between(pair[0], pair[1]))
        .filter(|direction| matches!(direction, Direction::North | Direction::South))
        .count();
    assert_eq!(vertical, 2, "expected one jog out and one back: {points:?}");
}

#[rstest]
fn scenario_cached_graph_is_reused(two_boxes: Vec<Shape>) {
    let mut router = Router::with_builder(RouterConfig::default(), CountingBuilder::default());
    let request = ConnectorRequest::new(Point::new(100.0, 25.0), Point::new(200.0, 25.0));

    let first = router.route(&two_boxes, &request);
    let second = router.route(&two_boxes, &request);

    assert_eq!(router.builder().builds.load(Ordering::SeqCst), 1);
    assert_eq!(router.cache().len(), 1);
    assert!(Arc::ptr_eq(first.graph(), second.graph()));
    assert_eq!(first.points(), second.points());
}

#[rstest]
fn warm_cache_never_degrades_grid_routes(grid: Vec<Shape>) {
    let mut warm = Router::default();
    warm.route(&grid, &ConnectorRequest::new(Point::new(80.0, 20.0), Point::new(160.0, 20.0)));

    let ports = grid_ports(&grid);
    let mut pairs = 0;
    for &(from_shape, from) in &ports {
        for &(to_shape, to) in &ports {
            if from_shape == to_shape {
                continue;
            }
            pairs += 1;
            let request = ConnectorRequest::new(from.point(), to.point())
                .with_directions(from.direction(), to.direction());
            let cold = Router::default().route(&grid, &request);
            let routed = warm.route(&grid, &request);

            assert!(
                routed.status() == RouteStatus::Found || routed.status() == cold.status(),
                "{request:?}: cold {:?} {:?}, warm {:?} {:?}",
                cold.status(),
                cold.points(),
                routed.status(),
                routed.points()
            );
            if routed.status() == RouteStatus::Found {
                let points = routed.points();
                assert_eq!(first_heading(points), Some(from.direction()), "{points:?}");
                assert_eq!(last_heading(points), Some(to.direction().reverse()), "{points:?}");
            }
        }
    }
    assert_eq!(pairs, 36 * 32);
    assert_eq!(warm.cache().len(), 1);
}

#[rstest]
fn scenario_staircase_collapses() {
    let raw = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(20.0, 10.0),
        Point::new(20.0, 20.0),
        Point::new(30.0, 20.0),
    ];
    let expected = vec![
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(20.0, 20.0),
        Point::new(30.0, 20.0),
    ];
    assert_eq!(simplify_route(&raw), expected);
}

#[rstest]
#[case::east_to_west(
    Point::new(80.0, 20.0),
    Direction::East,
    Point::new(160.0, 20.0),
    Direction::West
)]
#[case::south_to_north(
    Point::new(40.0, 40.0),
    Direction::South,
    Point::new(40.0, 120.0),
    Direction::North
)]
#[case::east_to_north(
    Point::new(80.0, 20.0),
    Direction::East,
    Point::new(360.0, 240.0),
    Direction::North
)]
#[case::south_to_west(
    Point::new(200.0, 40.0),
    Direction::South,
    Point::new(320.0, 140.0),
    Direction::West
)]
#[case::north_to_south(
    Point::new(200.0, 240.0),
    Direction::North,
    Point::new(40.0, 40.0),
    Direction::South
)]
fn grid_routes_respect_ports(
    grid: Vec<Shape>,
    #[case] start: Point,
    #[case] start_direction: Direction,
    #[case] end: Point,
    #[case] end_direction: Direction,
) {
    let mut router = Router::default();
    let request = ConnectorRequest::new(start, end).with_directions(start_direction, end_direction);
    let routed = router.route(&grid, &request);

    assert_eq!(routed.status(), RouteStatus::Found, "{:?}", routed.points());
    let points = routed.points();
    assert_orthogonal_and_clear(points, &grid);
    assert_eq!(points.first(), Some(&start));
    assert_eq!(points.last(), Some(&end));
    assert_eq!(first_heading(points), Some(start_direction));
    assert_eq!(last_heading(points), Some(end_direction.reverse()));
}

#[rstest]
fn routed_points_are_already_simplified(grid: Vec<Shape>) {
    let mut router = Router::default();
    let request = ConnectorRequest::new(Point::new(80.0, 20.0), Point::new(360.0, 240.0))
        .with_directions(Direction::East, Direction::North);
    let routed = router.route(&grid, &request);

    assert_eq!(simplify_route(routed.points()), routed.points());
    assert_eq!(simplify_route(routed.raw_points()), routed.points());
}

#[rstest]
fn cached_graph_serves_other_connectors(grid: Vec<Shape>) {
    let mut router = Router::default();
    let first = ConnectorRequest::new(Point::new(80.0, 20.0), Point::new(160.0, 20.0));
    let second = ConnectorRequest::new(Point::new(40.0, 160.0), Point::new(360.0, 240.0))
        .with_directions(Direction::South, Direction::North);

    router.route(&grid, &first);
    let routed = router.route(&grid, &second);

    assert_eq!(router.cache().len(), 1);
    assert_ne!(routed.status(), RouteStatus::Fallback);
    assert_orthogonal_and_clear(routed.points(), &grid);
}

#[rstest]
fn graph_edges_are_symmetric_and_clear(grid: Vec<Shape>) {
    let points = [
        ConnectionPoint::new(80.0, 20.0, Direction::East),
        ConnectionPoint::new(360.0, 240.0, Direction::North),
        ConnectionPoint::new(200.0, 160.0, Direction::South),
    ];
    let graph = build_visibility_graph(&grid, &points, &RouterConfig::default());

    assert!(graph.is_symmetric());
    for edge in graph.edges() {
        let from = graph.node(edge.from()).unwrap().point();
        let to = graph.node(edge.to()).unwrap().point();
        assert_eq!(Direction::between(from, to), Some(edge.direction()));
        assert!(!segment_crosses_any(from, to, &grid));
    }
}

#[rstest]
fn cache_honors_ttl_and_order(two_boxes: Vec<Shape>) {
    let mut cache = RouteCache::new(Duration::from_millis(50), 2);
    let graph = Arc::new(build_visibility_graph(&two_boxes, &[], &RouterConfig::default()));
    let t0 = Instant::now();
    cache.set_at(&two_boxes, graph, t0);

    let mut reversed = two_boxes.clone();
    reversed.reverse();
    assert!(cache.get_at(&reversed, t0 + Duration::from_millis(10)).is_some());
    assert!(cache.get_at(&reversed, t0 + Duration::from_millis(60)).is_none());
    assert!(cache.is_empty());
}

#[rstest]
fn json_request_round_trip(two_boxes: Vec<Shape>) {
    let raw = r#"{
        "shapes": [
            { "id": "A", "x": 0, "y": 0, "width": 100, "height": 50 },
            { "id": "B", "x": 200, "y": 0, "width": 100, "height": 50 }
        ],
        "start": { "x": 100, "y": 25 },
        "end": { "x": 200, "y": 25 },
        "start_direction": "east",
        "end_direction": "west"
    }"#;
    let (shapes, request) = RouteRequestJson::from_json_str(raw).unwrap().into_model().unwrap();
    assert_eq!(shapes, two_boxes);

    let routed = Router::default().route(&shapes, &request);
    let response = RouteResponseJson::from_routed(&routed, true);
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["status"], "found");
    assert_eq!(value["points"][0]["x"], 100.0);
    assert_eq!(value["points"][1]["x"], 200.0);
    assert!(value["visited"].as_array().is_some_and(|visited| !visited.is_empty()));
}

#[rstest]
fn config_file_values_drive_the_router() {
    let config =
        RouterConfig::from_json_str(r#"{ "nudge_distance": 10, "bend_penalty": 5 }"#).unwrap();
    let router = Router::new(config);
    assert_eq!(router.config().nudge_distance, 10.0);
    assert_eq!(router.config().bend_penalty, 5.0);
    assert_eq!(router.cache().max_size(), RouterConfig::default().cache_max_size);
}
