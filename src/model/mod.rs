// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Geometry and identifier types shared by every routing stage.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;

pub use geometry::{
    manhattan_distance, node_id, rect_contains_segment_horizontally,
    rect_contains_segment_vertically, segment_crosses_any, segment_crosses_rect, ConnectionPoint,
    Direction, Point, Rect, Shape, EPSILON,
};
pub use ids::{Id, IdError, NodeId, ShapeId};
