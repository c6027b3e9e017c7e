// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orthoroute: orthogonal connector routing between rectangular shapes.
//!
//! Routes are searched over a sparse visibility graph and come back as axis-aligned polylines
//! that never cross a shape interior. See [`route::Router`] for the cached entry point and
//! [`route::find_orthogonal_route`] for a one-shot call.

pub mod config;
pub mod format;
pub mod model;
pub mod route;

pub use config::{ConfigError, RouterConfig};
pub use model::{ConnectionPoint, Direction, Point, Rect, Shape, ShapeId};
pub use route::{find_orthogonal_route, ConnectorRequest, RouteStatus, RoutedConnector, Router};
