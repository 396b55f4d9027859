use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use kd_index::kdtree::KDTreeBuilder;
use kd_index::{KDTree, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

const NUM_POINTS: usize = 100_000;
const NUM_QUERIES: usize = 1_000;

fn load_data(n: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0)])
        .collect()
}

fn to_points(coords: &[[f64; 2]]) -> Vec<Point<f64>> {
    coords.iter().map(|c| Point::new(*c).unwrap()).collect()
}

fn construct_inserted(points: Vec<Point<f64>>) -> KDTree<f64> {
    let mut tree = KDTree::new(2).unwrap();
    for p in points {
        tree.insert(p).unwrap();
    }
    tree
}

fn construct_built(points: Vec<Point<f64>>) -> KDTree<f64> {
    let mut builder = KDTreeBuilder::with_capacity(2, points.len()).unwrap();
    for p in points {
        builder.add(p).unwrap();
    }
    builder.finish()
}

fn construct_rstar(coords: Vec<[f64; 2]>) -> RTree<[f64; 2]> {
    RTree::bulk_load(coords)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let coords = load_data(NUM_POINTS, 0);
    let points = to_points(&coords);
    let query_coords = load_data(NUM_QUERIES, 1);
    let queries = to_points(&query_coords);

    c.bench_function("construction (kdtree insert)", |b| {
        b.iter_batched(
            || points.clone(),
            construct_inserted,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("construction (kdtree bulk)", |b| {
        b.iter_batched(|| points.clone(), construct_built, BatchSize::LargeInput)
    });

    c.bench_function("construction (rstar bulk)", |b| {
        b.iter_batched(|| coords.clone(), construct_rstar, BatchSize::LargeInput)
    });

    let inserted = construct_inserted(points.clone());
    let built = construct_built(points);
    let rstar_tree = construct_rstar(coords);

    c.bench_function("nearest (kdtree insert)", |b| {
        b.iter(|| {
            for q in &queries {
                inserted.nearest_neighbor(q).unwrap();
            }
        })
    });

    c.bench_function("nearest (kdtree bulk)", |b| {
        b.iter(|| {
            for q in &queries {
                built.nearest_neighbor(q).unwrap();
            }
        })
    });

    c.bench_function("nearest (rstar)", |b| {
        b.iter(|| {
            for q in &query_coords {
                rstar_tree.nearest_neighbor(q);
            }
        })
    });

    c.bench_function("knn 10 (kdtree bulk)", |b| {
        b.iter(|| {
            for q in &queries {
                built.k_nearest_neighbors(10, q).unwrap();
            }
        })
    });

    c.bench_function("knn 10 (rstar)", |b| {
        b.iter(|| {
            for q in &query_coords {
                rstar_tree.nearest_neighbor_iter(q).take(10).count();
            }
        })
    });

    let radius = 1.0;

    c.bench_function("within radius (kdtree bulk)", |b| {
        b.iter(|| {
            for q in &queries {
                built.range(q, radius).unwrap();
            }
        })
    });

    c.bench_function("within radius (rstar)", |b| {
        b.iter(|| {
            for q in &query_coords {
                rstar_tree.locate_within_distance(*q, radius * radius).count();
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
