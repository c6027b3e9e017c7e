// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use orthoroute::model::Point;
use orthoroute::route::{build_visibility_graph, simplify_route, Arrival, Pathfinder};
use orthoroute::RouterConfig;

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group names in this file: `graph.build`, `graph.search`, `graph.simplify`
// - Case IDs must remain stable across refactors (`pair`, `grid4`, `grid10`).
fn benches_graph(c: &mut Criterion) {
    let config = RouterConfig::default();
    let cases = [("pair", Case::Pair), ("grid4", Case::Grid4), ("grid10", Case::Grid10)];

    {
        let mut group = c.benchmark_group("graph.build");
        for (case_id, case) in cases {
            let shapes = fixtures::shapes(case);
            let points = fixtures::connection_points(&fixtures::row_requests(case));
            let config = config.clone();
            group.throughput(Throughput::Elements(points.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let graph =
                        build_visibility_graph(black_box(&shapes), black_box(&points), &config);
                    black_box(graph.edge_count())
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("graph.search");
        for (case_id, case) in cases {
            let shapes = fixtures::shapes(case);
            let request = fixtures::diagonal_request(case);
            let graph = build_visibility_graph(&shapes, &request.routing_points(), &config);
            let bend_penalty = config.bend_penalty;
            group.throughput(Throughput::Elements(graph.node_count() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let mut finder = Pathfinder::new(&graph, bend_penalty);
                    let found = finder.find_path(
                        request.start(),
                        request.start_direction(),
                        request.end(),
                        request.end_direction(),
                        Arrival::Strict,
                    );
                    black_box(found.map_or(0, |path| path.points().len()))
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("graph.simplify");
        // Every corner is padded with a midpoint on each leg, so half the points collapse.
        let staircase = (0..256)
            .flat_map(|step| {
                let base = f64::from(step) * 10.0;
                [
                    Point::new(base, base),
                    Point::new(base + 5.0, base),
                    Point::new(base + 10.0, base),
                    Point::new(base + 10.0, base + 5.0),
                ]
            })
            .collect::<Vec<_>>();
        group.throughput(Throughput::Elements(staircase.len() as u64));
        group.bench_function("staircase_1024", |b| {
            b.iter(|| black_box(simplify_route(black_box(&staircase)).len()))
        });
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_graph
}
criterion_main!(benches);
