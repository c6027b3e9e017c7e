// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::geometry::{ConnectionPoint, Direction, Point, Shape};
use crate::model::ids::{IdError, ShapeId};
use crate::route::{ConnectorRequest, RoutedConnector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DirectionJson {
    North,
    South,
    East,
    West,
}

impl From<DirectionJson> for Direction {
    fn from(value: DirectionJson) -> Self {
        match value {
            DirectionJson::North => Direction::North,
            DirectionJson::South => Direction::South,
            DirectionJson::East => Direction::East,
            DirectionJson::West => Direction::West,
        }
    }
}

impl From<Direction> for DirectionJson {
    fn from(value: Direction) -> Self {
        match value {
            Direction::North => DirectionJson::North,
            Direction::South => DirectionJson::South,
            Direction::East => DirectionJson::East,
            Direction::West => DirectionJson::West,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PointJson {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for PointJson {
    fn from(value: Point) -> Self {
        Self { x: value.x(), y: value.y() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShapeJson {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionPointJson {
    pub x: f64,
    pub y: f64,
    pub direction: DirectionJson,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteRequestJson {
    pub shapes: Vec<ShapeJson>,
    pub start: PointJson,
    pub end: PointJson,
    /// Defaults to `east`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_direction: Option<DirectionJson>,
    /// Side the route enters the end point from. Defaults to `west`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_direction: Option<DirectionJson>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connection_points: Vec<ConnectionPointJson>,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid shape id {id:?}: {source}")]
    ShapeId {
        id: String,
        #[source]
        source: IdError,
    },
    #[error("duplicate shape id {0:?}")]
    DuplicateShape(String),
    #[error("{field} must be finite")]
    NonFinite { field: String },
    #[error("invalid route request: {0}")]
    Parse(#[from] serde_json::Error),
}

fn finite_point(x: f64, y: f64, field: impl Into<String>) -> Result<Point, RequestError> {
    let point = Point::new(x, y);
    if point.is_finite() {
        Ok(point)
    } else {
        Err(RequestError::NonFinite { field: field.into() })
    }
}

impl RouteRequestJson {
    pub fn from_json_str(raw: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validates the request and converts it into routing inputs.
    pub fn into_model(self) -> Result<(Vec<Shape>, ConnectorRequest), RequestError> {
        let mut shapes = Vec::with_capacity(self.shapes.len());
        for shape in self.shapes {
            let id = ShapeId::new(&shape.id)
                .map_err(|source| RequestError::ShapeId { id: shape.id.clone(), source })?;
            if shapes.iter().any(|known: &Shape| known.id() == &id) {
                return Err(RequestError::DuplicateShape(shape.id));
            }
            let values = [shape.x, shape.y, shape.width, shape.height];
            if values.iter().any(|value| !value.is_finite()) {
                return Err(RequestError::NonFinite { field: format!("shape {}", shape.id) });
            }
            shapes.push(Shape::new(id, shape.x, shape.y, shape.width, shape.height));
        }

        let start = finite_point(self.start.x, self.start.y, "start")?;
        let end = finite_point(self.end.x, self.end.y, "end")?;
        let mut connection_points = Vec::with_capacity(self.connection_points.len());
        for (idx, connection) in self.connection_points.into_iter().enumerate() {
            let field = format!("connection_points[{idx}]");
            let point = finite_point(connection.x, connection.y, field)?;
            connection_points.push(ConnectionPoint::at(point, connection.direction.into()));
        }

        let request = ConnectorRequest::new(start, end)
            .with_directions(
                self.start_direction.map_or(Direction::East, Direction::from),
                self.end_direction.map_or(Direction::West, Direction::from),
            )
            .with_connection_points(connection_points);
        Ok((shapes, request))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VisitedJson {
    pub order: usize,
    pub x: f64,
    pub y: f64,
    pub heading: DirectionJson,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteResponseJson {
    pub points: Vec<PointJson>,
    pub raw_points: Vec<PointJson>,
    /// `found`, `relaxed` or `fallback`.
    pub status: String,
    pub bends: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited: Option<Vec<VisitedJson>>,
}

impl RouteResponseJson {
    pub fn from_routed(routed: &RoutedConnector, include_visited: bool) -> Self {
        let visited = include_visited.then(|| {
            routed
                .visited()
                .iter()
                .map(|node| VisitedJson {
                    order: node.order(),
                    x: node.point().x(),
                    y: node.point().y(),
                    heading: node.heading().into(),
                })
                .collect()
        });
        Self {
            points: routed.points().iter().copied().map(PointJson::from).collect(),
            raw_points: routed.raw_points().iter().copied().map(PointJson::from).collect(),
            status: routed.status().as_str().to_owned(),
            bends: routed.bends(),
            graph_nodes: routed.graph().node_count(),
            graph_edges: routed.graph().edge_count(),
            visited,
        }
    }
}

/// JSON Schema for [`RouteRequestJson`].
pub fn request_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(RouteRequestJson)).unwrap_or_default()
}
