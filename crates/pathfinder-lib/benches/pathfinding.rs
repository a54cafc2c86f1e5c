use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use pathfinder_lib::{shortest_path, Graph, PathQuery, Position, PriorityQueue};
use std::hint::black_box;

const GRID_SIDE: usize = 40;

fn grid_name(row: usize, col: usize) -> String {
    format!("r{row}c{col}")
}

/// Square grid with two-way roads whose weights vary by position.
fn build_grid(side: usize) -> Graph {
    let mut graph = Graph::new();
    for row in 0..side {
        for col in 0..side {
            graph
                .add_node_with(grid_name(row, col), Position::new(col as f64, row as f64))
                .expect("unique grid names");
        }
    }
    for row in 0..side {
        for col in 0..side {
            let here = graph.node_id(&grid_name(row, col)).expect("node exists");
            let weight = 1.0 + ((row * 7 + col * 3) % 5) as f64;
            let mut link = |other: String| {
                let there = graph.node_id(&other).expect("node exists");
                graph.add_edge(here, there, weight).expect("valid edge");
                graph.add_edge(there, here, weight).expect("valid edge");
            };
            if col + 1 < side {
                link(grid_name(row, col + 1));
            }
            if row + 1 < side {
                link(grid_name(row + 1, col));
            }
        }
    }
    graph
}

static GRID: Lazy<Graph> = Lazy::new(|| build_grid(GRID_SIDE));

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRID;
    let finish = grid_name(GRID_SIDE - 1, GRID_SIDE - 1);

    c.bench_function("shortest_path_grid_corner_to_corner", |b| {
        b.iter(|| {
            let path = shortest_path(graph, "r0c0", &finish).expect("route exists");
            black_box(path.distance())
        });
    });

    c.bench_function("path_query_cached_distance", |b| {
        let query = PathQuery::between(graph, "r0c0", finish.clone());
        query.solve().expect("route exists");
        b.iter(|| black_box(query.distance().expect("cached")));
    });

    c.bench_function("priority_queue_fill_and_drain_1k", |b| {
        b.iter(|| {
            let mut queue = PriorityQueue::with_capacity(1_000);
            for n in 0..1_000u32 {
                queue.enqueue(n, f64::from((n * 7919) % 1_000));
            }
            while let Ok(value) = queue.dequeue() {
                black_box(value);
            }
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
