// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geometry::Shape;
use super::ids::ShapeId;

pub(crate) fn shape(id: &str, x: f64, y: f64, width: f64, height: f64) -> Shape {
    Shape::new(ShapeId::new(id).expect("shape id"), x, y, width, height)
}

/// Two 100x50 boxes side by side with a 100-unit gap.
pub(crate) fn two_boxes() -> Vec<Shape> {
    vec![shape("A", 0.0, 0.0, 100.0, 50.0), shape("B", 200.0, 0.0, 100.0, 50.0)]
}

/// `two_boxes` plus a blocker sitting in the gap between them.
pub(crate) fn blocked_gap() -> Vec<Shape> {
    let mut shapes = two_boxes();
    shapes.push(shape("C", 130.0, -20.0, 40.0, 90.0));
    shapes
}
