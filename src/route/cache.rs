// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::graph::VisibilityGraph;
use crate::config::RouterConfig;
use crate::model::geometry::Shape;

/// Canonical cache key: shapes sorted by id, each as `id:x,y,w,h`, joined with `|`.
///
/// Shape ids cannot contain any of the separators, so distinct shape sets never share a key.
pub fn cache_key(shapes: &[Shape]) -> String {
    let mut sorted = shapes.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.id().cmp(b.id()));

    let mut key = String::with_capacity(sorted.len() * 24);
    for (idx, shape) in sorted.into_iter().enumerate() {
        if idx > 0 {
            key.push('|');
        }
        let rect = shape.rect();
        key.push_str(shape.id().as_str());
        key.push(':');
        push_number(&mut key, rect.left());
        key.push(',');
        push_number(&mut key, rect.top());
        key.push(',');
        push_number(&mut key, rect.width());
        key.push(',');
        push_number(&mut key, rect.height());
    }
    key
}

fn push_number(out: &mut String, value: f64) {
    // Whole numbers are the common case; keep them free of a trailing ".0".
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        let mut buf = itoa::Buffer::new();
        out.push_str(buf.format(value as i64));
    } else {
        out.push_str(&value.to_string());
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    graph: Arc<VisibilityGraph>,
    inserted_at: Instant,
}

/// Time-limited store of built visibility graphs keyed by the shape set.
///
/// Eviction is a linear scan for the oldest entry; the cache is expected to stay small.
#[derive(Debug, Clone)]
pub struct RouteCache {
    entries: BTreeMap<String, CacheEntry>,
    ttl: Duration,
    max_size: usize,
}

impl RouteCache {
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self { entries: BTreeMap::new(), ttl, max_size: max_size.max(1) }
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(config.cache_ttl, config.cache_max_size)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn get(&mut self, shapes: &[Shape]) -> Option<Arc<VisibilityGraph>> {
        self.get_at(shapes, Instant::now())
    }

    /// Looks up a graph as of `now`. An expired entry is removed and reported as a miss.
    pub fn get_at(&mut self, shapes: &[Shape], now: Instant) -> Option<Arc<VisibilityGraph>> {
        let key = cache_key(shapes);
        let entry = self.entries.get(&key)?;
        if now.saturating_duration_since(entry.inserted_at) >= self.ttl {
            self.entries.remove(&key);
            return None;
        }
        Some(Arc::clone(&entry.graph))
    }

    pub fn set(&mut self, shapes: &[Shape], graph: Arc<VisibilityGraph>) {
        self.set_at(shapes, graph, Instant::now());
    }

    pub fn set_at(&mut self, shapes: &[Shape], graph: Arc<VisibilityGraph>, now: Instant) {
        self.entries.insert(cache_key(shapes), CacheEntry { graph, inserted_at: now });
        if self.entries.len() > self.max_size {
            self.evict_oldest();
        }
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}
