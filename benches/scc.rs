//! Benchmarks for depth-first forest construction
//!
//! Measures the explicit-stack walk on long chains, dense cycles and sparse
//! pseudo-random graphs, plus tree path queries on deep trees.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sccscope::graph::{Digraph, RootedTree, SearchMethod};

/// A single path v0 -> v1 -> ... -> v(n-1), closed back to v0 when `cyclic`
fn create_chain(nodes: usize, cyclic: bool) -> Digraph {
    let mut graph = Digraph::with_capacity(nodes);
    for i in 0..nodes {
        graph.create_node(format!("v{}", i), ()).unwrap();
    }
    for i in 1..nodes {
        graph.connect_node(&format!("v{}", i - 1), &format!("v{}", i));
    }
    if cyclic && nodes > 1 {
        graph.connect_node(&format!("v{}", nodes - 1), "v0");
    }
    graph
}

/// Sparse graph with `edges_per_node` arcs per vertex from a fixed LCG seed
fn create_random_graph(nodes: usize, edges_per_node: usize) -> Digraph {
    let mut graph = Digraph::with_capacity(nodes);
    for i in 0..nodes {
        graph.create_node(format!("v{}", i), ()).unwrap();
    }

    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for i in 0..nodes {
        for _ in 0..edges_per_node {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let target = (state >> 33) as usize % nodes;
            graph.connect_node(&format!("v{}", i), &format!("v{}", target));
        }
    }
    graph
}

/// Tree of the given fan-out, filled breadth-first up to `nodes` vertices
fn create_tree(nodes: usize, children_per_node: usize) -> RootedTree<()> {
    let mut tree = RootedTree::new("n0", ()).unwrap();
    let mut next = 1;
    let mut parent = 0;
    while next < nodes {
        for _ in 0..children_per_node {
            if next >= nodes {
                break;
            }
            tree.append_node(&format!("n{}", parent), &format!("n{}", next), ())
                .unwrap();
            next += 1;
        }
        parent += 1;
    }
    tree
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scc_chain");

    for size in [1_000, 10_000, 100_000].iter() {
        let graph = create_chain(*size, false);

        group.bench_with_input(BenchmarkId::new("nodes", size), size, |b, _| {
            b.iter(|| black_box(graph.strongly_connected_components()));
        });
    }

    group.finish();
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("scc_cycle");

    for size in [1_000, 10_000, 100_000].iter() {
        let graph = create_chain(*size, true);

        group.bench_with_input(BenchmarkId::new("nodes", size), size, |b, _| {
            b.iter(|| black_box(graph.strongly_connected_components()));
        });
    }

    group.finish();
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_random");

    for size in [500, 1_000, 5_000].iter() {
        let graph = create_random_graph(*size, 3);

        group.bench_with_input(BenchmarkId::new("nodes", size), size, |b, _| {
            b.iter(|| black_box(graph.depth_first_forest()));
        });
    }

    group.finish();
}

fn bench_tree_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_path");

    for size in [1_000, 10_000].iter() {
        let tree = create_tree(*size, 4);
        let target = format!("n{}", size - 1);

        group.bench_with_input(BenchmarkId::new("depth_first", size), size, |b, _| {
            b.iter(|| black_box(tree.path(&target, SearchMethod::DepthFirst)));
        });
        group.bench_with_input(BenchmarkId::new("breadth_first", size), size, |b, _| {
            b.iter(|| black_box(tree.path(&target, SearchMethod::BreadthFirst)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chain, bench_cycle, bench_random, bench_tree_path);
criterion_main!(benches);
