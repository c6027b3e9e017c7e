// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Polyline post-processing.

use crate::model::geometry::{
    manhattan_distance, segment_crosses_any, Direction, Point, Shape, EPSILON,
};

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

fn collinear(a: Point, b: Point, c: Point) -> bool {
    (same(a.x(), b.x()) && same(b.x(), c.x())) || (same(a.y(), b.y()) && same(b.y(), c.y()))
}

/// Drops repeated points and interior points that sit on a straight run.
///
/// The first and last points are always kept. Applying it twice is the same as applying it once.
pub fn simplify_route(points: &[Point]) -> Vec<Point> {
    let mut out = Vec::<Point>::with_capacity(points.len());
    for &point in points {
        if out.last().is_some_and(|last| last.coincides(&point)) {
            continue;
        }
        while out.len() >= 2 && collinear(out[out.len() - 2], out[out.len() - 1], point) {
            out.pop();
        }
        if out.last().is_some_and(|last| last.coincides(&point)) {
            continue;
        }
        out.push(point);
    }
    // A route that collapsed onto a single point still has two ends.
    if out.len() == 1 && points.len() >= 2 {
        if let Some(&last) = points.last() {
            out.push(last);
        }
    }
    out
}

/// Offset that keeps a segment at `coord` clear of the nearest parallel shape edge.
///
/// `lo..hi` is the segment's span along its own axis. Returns the new coordinate when some
/// shape edge overlapping that span lies closer than `nudge` on the segment's side.
fn clearance_target(
    coord: f64,
    lo: f64,
    hi: f64,
    horizontal: bool,
    shapes: &[Shape],
    nudge: f64,
) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for shape in shapes {
        let rect = shape.rect();
        let (span_lo, span_hi, near, far) = if horizontal {
            (rect.left(), rect.right(), rect.top(), rect.bottom())
        } else {
            (rect.top(), rect.bottom(), rect.left(), rect.right())
        };
        if hi <= span_lo + EPSILON || lo >= span_hi - EPSILON {
            continue;
        }
        let candidates = [(near - coord, near - nudge), (coord - far, far + nudge)];
        for (gap, target) in candidates {
            if gap < -EPSILON || gap >= nudge - EPSILON {
                continue;
            }
            if best.map_or(true, |(known, _)| gap < known) {
                best = Some((gap, target));
            }
        }
    }
    best.map(|(_, target)| target)
}

/// Pushes segments that run closer than `nudge` to a shape edge out to exactly `nudge`.
///
/// Interior corners move with their segments. The first and last points stay fixed: a shifted
/// end segment keeps a stub along its original heading, then jogs onto the new run. If the
/// adjusted route would cross a shape or change either end heading, the simplified input is
/// returned unchanged. Repeated application is not guaranteed to be stable.
pub fn refine_route(points: &[Point], shapes: &[Shape], nudge: f64) -> Vec<Point> {
    let base = simplify_route(points);
    if base.len() < 2 || nudge <= 0.0 {
        return base;
    }

    // Per segment: Some(new y) for horizontal, Some(new x) for vertical runs.
    let shifts = base
        .windows(2)
        .map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            if same(a.y(), b.y()) {
                let (lo, hi) = (a.x().min(b.x()), a.x().max(b.x()));
                clearance_target(a.y(), lo, hi, true, shapes, nudge).map(|y| (true, y))
            } else if same(a.x(), b.x()) {
                let (lo, hi) = (a.y().min(b.y()), a.y().max(b.y()));
                clearance_target(a.x(), lo, hi, false, shapes, nudge).map(|x| (false, x))
            } else {
                None
            }
        })
        .collect::<Vec<_>>();
    if shifts.iter().all(Option::is_none) {
        return base;
    }

    let apply = |point: Point, shift: Option<(bool, f64)>| match shift {
        Some((true, y)) => Point::new(point.x(), y),
        Some((false, x)) => Point::new(x, point.y()),
        None => point,
    };
    let moved = |idx: usize| -> Point {
        let before = idx.checked_sub(1).and_then(|seg| shifts[seg]);
        let after = shifts.get(idx).copied().flatten();
        apply(apply(base[idx], before), after)
    };
    // Endpoint legs keep their heading for a short stub before jogging onto the shifted run.
    let stub = |from: Point, toward: Point| -> Point {
        let reach = nudge.min(manhattan_distance(from, toward) / 3.0);
        Direction::between(from, toward).map_or(from, |direction| from.step(direction, reach))
    };

    let last = base.len() - 1;
    let mut out = Vec::with_capacity(base.len() + 6);
    out.push(base[0]);
    if shifts[0].is_some() {
        let lead = stub(base[0], base[1]);
        out.push(lead);
        out.push(apply(lead, shifts[0]));
    }
    for idx in 1..last {
        out.push(moved(idx));
    }
    if shifts[last - 1].is_some() {
        let tail = stub(base[last], base[last - 1]);
        out.push(apply(tail, shifts[last - 1]));
        out.push(tail);
    }
    out.push(base[last]);

    let refined = simplify_route(&out);
    let crosses = refined.windows(2).any(|pair| segment_crosses_any(pair[0], pair[1], shapes));
    if crosses || end_headings(&refined) != end_headings(&base) {
        base
    } else {
        refined
    }
}

/// Heading of the first and of the last segment.
fn end_headings(points: &[Point]) -> (Option<Direction>, Option<Direction>) {
    let heading = |pair: &[Point]| Direction::between(pair[0], pair[1]);
    (points.windows(2).next().and_then(heading), points.windows(2).last().and_then(heading))
}
