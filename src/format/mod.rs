// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire formats.
//!
//! JSON request/response types are kept separate from the model so the routing types stay free
//! of serde attributes.

pub mod json;

pub use json::{
    request_schema, ConnectionPointJson, DirectionJson, PointJson, RequestError,
    RouteRequestJson, RouteResponseJson, ShapeJson, VisitedJson,
};
