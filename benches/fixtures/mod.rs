// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use orthoroute::model::{ConnectionPoint, Direction, Point, Shape, ShapeId};
use orthoroute::route::ConnectorRequest;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// Two boxes with a clear gap.
    Pair,
    /// 4x4 boxes, connectors across the whole grid.
    Grid4,
    /// 10x10 boxes, connectors across the whole grid.
    Grid10,
}

const BOX_W: f64 = 120.0;
const BOX_H: f64 = 60.0;
const GUTTER_X: f64 = 80.0;
const GUTTER_Y: f64 = 70.0;

fn grid_side(case: Case) -> usize {
    match case {
        Case::Pair => 1,
        Case::Grid4 => 4,
        Case::Grid10 => 10,
    }
}

fn cell(row: usize, col: usize) -> (f64, f64) {
    (col as f64 * (BOX_W + GUTTER_X), row as f64 * (BOX_H + GUTTER_Y))
}

pub fn shapes(case: Case) -> Vec<Shape> {
    let side = grid_side(case);
    let cols = if matches!(case, Case::Pair) { 2 } else { side };
    let mut shapes = Vec::with_capacity(side * cols);
    for row in 0..side {
        for col in 0..cols {
            let (x, y) = cell(row, col);
            let id = ShapeId::new(format!("s{row}_{col}")).expect("shape id");
            shapes.push(Shape::new(id, x, y, BOX_W, BOX_H));
        }
    }
    shapes
}

fn east_port(row: usize, col: usize) -> Point {
    let (x, y) = cell(row, col);
    Point::new(x + BOX_W, y + BOX_H / 2.0)
}

fn north_port(row: usize, col: usize) -> Point {
    let (x, y) = cell(row, col);
    Point::new(x + BOX_W / 2.0, y)
}

/// Connector from the top-left box to the bottom-right box.
pub fn diagonal_request(case: Case) -> ConnectorRequest {
    let side = grid_side(case);
    if matches!(case, Case::Pair) {
        return ConnectorRequest::new(east_port(0, 0), Point::new(cell(0, 1).0, BOX_H / 2.0));
    }
    ConnectorRequest::new(east_port(0, 0), north_port(side - 1, side - 1))
        .with_directions(Direction::East, Direction::North)
}

/// One connector per row, each from the first box to the last box of the next row.
pub fn row_requests(case: Case) -> Vec<ConnectorRequest> {
    let side = grid_side(case);
    if side < 2 {
        return vec![diagonal_request(case)];
    }
    (0..side - 1)
        .map(|row| {
            ConnectorRequest::new(east_port(row, 0), north_port(row + 1, side - 1))
                .with_directions(Direction::East, Direction::North)
        })
        .collect()
}

pub fn connection_points(requests: &[ConnectorRequest]) -> Vec<ConnectionPoint> {
    requests.iter().flat_map(ConnectorRequest::routing_points).collect()
}
