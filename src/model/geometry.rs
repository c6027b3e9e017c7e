// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Geometry primitives shared by the graph builder, pathfinder and optimizer.
//!
//! Coordinates are diagram units with `y` growing downward, so `North` is `-y`.

use super::ids::{NodeId, ShapeId};

/// Tolerance used by every comparison between coordinates.
pub const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::from_coords(self.x, self.y)
    }

    /// True when both points map to the same graph node.
    pub fn coincides(&self, other: &Point) -> bool {
        self.node_id() == other.node_id()
    }

    pub fn step(self, direction: Direction, distance: f64) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx * distance, y: self.y + dy * distance }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    pub fn reverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::East | Self::West)
    }

    /// Unit step for this direction in screen space.
    pub fn delta(self) -> (f64, f64) {
        match self {
            Self::North => (0.0, -1.0),
            Self::South => (0.0, 1.0),
            Self::East => (1.0, 0.0),
            Self::West => (-1.0, 0.0),
        }
    }

    /// Heading from `from` to `to` when the two points are axis-aligned and distinct.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let same_x = (from.x - to.x).abs() <= EPSILON;
        let same_y = (from.y - to.y).abs() <= EPSILON;
        match (same_x, same_y) {
            (true, true) | (false, false) => None,
            (false, true) => Some(if to.x > from.x { Self::East } else { Self::West }),
            (true, false) => Some(if to.y > from.y { Self::South } else { Self::North }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle containing both corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self { x: left, y: top, width: a.x.max(b.x) - left, height: a.y.max(b.y) - top }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn expand(&self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    pub fn union(&self, other: &Rect) -> Self {
        Self::from_corners(
            Point::new(self.left().min(other.left()), self.top().min(other.top())),
            Point::new(self.right().max(other.right()), self.bottom().max(other.bottom())),
        )
    }

    pub fn include_point(&self, point: Point) -> Self {
        self.union(&Rect::new(point.x, point.y, 0.0, 0.0))
    }

    /// Corners in the order top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    pub fn contains_point_strictly(&self, point: Point) -> bool {
        point.x > self.left() + EPSILON
            && point.x < self.right() - EPSILON
            && point.y > self.top() + EPSILON
            && point.y < self.bottom() - EPSILON
    }

    /// True when `point` lies on the rectangle outline, within `tolerance`.
    pub fn boundary_contains(&self, point: Point, tolerance: f64) -> bool {
        let within_x = point.x >= self.left() - tolerance && point.x <= self.right() + tolerance;
        let within_y = point.y >= self.top() - tolerance && point.y <= self.bottom() + tolerance;
        if !within_x || !within_y {
            return false;
        }
        (point.x - self.left()).abs() <= tolerance
            || (point.x - self.right()).abs() <= tolerance
            || (point.y - self.top()).abs() <= tolerance
            || (point.y - self.bottom()).abs() <= tolerance
    }

    /// Coordinate of this rectangle's edge facing `direction`.
    pub fn edge(&self, direction: Direction) -> f64 {
        match direction {
            Direction::North => self.top(),
            Direction::South => self.bottom(),
            Direction::East => self.right(),
            Direction::West => self.left(),
        }
    }
}

/// An obstacle. Routes may touch its outline but never cross its interior.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    rect: Rect,
}

impl Shape {
    pub fn new(id: ShapeId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { id, rect: Rect::new(x, y, width, height) }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// A port on a shape outline with a forced exit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPoint {
    point: Point,
    direction: Direction,
}

impl ConnectionPoint {
    pub fn new(x: f64, y: f64, direction: Direction) -> Self {
        Self { point: Point::new(x, y), direction }
    }

    pub fn at(point: Point, direction: Direction) -> Self {
        Self { point, direction }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

pub fn manhattan_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// True iff the horizontal segment at `y` spanning `x1..x2` crosses the open interior of `rect`.
pub fn rect_contains_segment_horizontally(x1: f64, x2: f64, y: f64, rect: &Rect) -> bool {
    let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
    y > rect.top() + EPSILON
        && y < rect.bottom() - EPSILON
        && hi > rect.left() + EPSILON
        && lo < rect.right() - EPSILON
}

/// True iff the vertical segment at `x` spanning `y1..y2` crosses the open interior of `rect`.
pub fn rect_contains_segment_vertically(x: f64, y1: f64, y2: f64, rect: &Rect) -> bool {
    let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
    x > rect.left() + EPSILON
        && x < rect.right() - EPSILON
        && hi > rect.top() + EPSILON
        && lo < rect.bottom() - EPSILON
}

/// True iff the segment `a..b` crosses the open interior of `rect`.
///
/// Non-orthogonal segments are tested through their bounding box.
pub fn segment_crosses_rect(a: Point, b: Point, rect: &Rect) -> bool {
    if (a.y - b.y).abs() <= EPSILON {
        return rect_contains_segment_horizontally(a.x, b.x, a.y, rect);
    }
    if (a.x - b.x).abs() <= EPSILON {
        return rect_contains_segment_vertically(a.x, a.y, b.y, rect);
    }
    let bounds = Rect::from_corners(a, b);
    bounds.left() < rect.right() - EPSILON
        && bounds.right() > rect.left() + EPSILON
        && bounds.top() < rect.bottom() - EPSILON
        && bounds.bottom() > rect.top() + EPSILON
}

pub fn segment_crosses_any(a: Point, b: Point, shapes: &[Shape]) -> bool {
    shapes.iter().any(|shape| segment_crosses_rect(a, b, shape.rect()))
}

/// Canonical string id for a coordinate pair.
pub fn node_id(x: f64, y: f64) -> String {
    NodeId::from_coords(x, y).to_string()
}
