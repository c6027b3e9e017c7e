// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use orthoroute::route::{Router, VisibilityGraphBuilder};
use orthoroute::RouterConfig;

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group names in this file: `route.cold`, `route.cached`, `route.batch`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (`pair`, `grid4`, `grid10`).
fn benches_route(c: &mut Criterion) {
    let cases = [("pair", Case::Pair), ("grid4", Case::Grid4), ("grid10", Case::Grid10)];

    {
        let mut group = c.benchmark_group("route.cold");
        for (case_id, case) in cases {
            let shapes = fixtures::shapes(case);
            let request = fixtures::diagonal_request(case);
            group.throughput(Throughput::Elements(shapes.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let mut router = Router::default();
                    let routed = router.route(black_box(&shapes), black_box(&request));
                    black_box(routed.points().len())
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("route.cached");
        for (case_id, case) in cases {
            let shapes = fixtures::shapes(case);
            let request = fixtures::diagonal_request(case);
            let mut router = Router::default();
            router.route(&shapes, &request);
            group.throughput(Throughput::Elements(shapes.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let routed = router.route(black_box(&shapes), black_box(&request));
                    black_box(routed.points().len())
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("route.batch");
        for (case_id, case) in [("grid4", Case::Grid4), ("grid10", Case::Grid10)] {
            let shapes = fixtures::shapes(case);
            let requests = fixtures::row_requests(case);
            group.throughput(Throughput::Elements(requests.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let mut router =
                        Router::with_builder(RouterConfig::default(), VisibilityGraphBuilder);
                    let routed = router.route_all(black_box(&shapes), black_box(&requests));
                    black_box(routed.len())
                })
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_route
}
criterion_main!(benches);
