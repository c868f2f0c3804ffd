use approx::assert_relative_eq;
use hull_vision::core_modules::bounding_box::Bounds;
use hull_vision::core_modules::gift_wrapper::anchor_index;
use hull_vision::core_modules::rotation::Rotation;
use hull_vision::{
    Execution, HullIndexBuffer, HullPipeline, LaunchConfig, PipelineConfig, Point,
    PointSetBatch, SENTINEL, giftwrap_device, giftwrap_host, min_area_rect,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_PI_2;

fn random_batch(rng: &mut StdRng, sets: usize, capacity: usize) -> PointSetBatch {
    let rows = (0..sets)
        .map(|_| {
            (0..capacity)
                .map(|_| Point::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0)))
                .collect()
        })
        .collect();
    PointSetBatch::from_rows(rows).unwrap()
}

fn hull_rows(hulls: &HullIndexBuffer, batch: &PointSetBatch) -> Vec<Vec<Point>> {
    (0..batch.sets())
        .map(|set| hulls.resolve_points(batch, set).unwrap())
        .collect()
}

/// Smallest area over rectangles with one side flush to a hull edge.
fn brute_force_min_area(hull: &[Point]) -> f64 {
    let n = hull.len();
    (0..n)
        .map(|i| {
            let rotation = Rotation::new(hull[(i + 1) % n].sub(&hull[i]).angle());
            Bounds::from_points(hull.iter().map(|p| rotation.to_frame(p)))
                .unwrap()
                .area()
        })
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn hull_rows_are_distinct_indices_followed_by_sentinels() {
    let mut rng = StdRng::seed_from_u64(7);
    let batch = random_batch(&mut rng, 64, 40);
    let hulls = giftwrap_host(&batch);

    for set in 0..batch.sets() {
        let row = hulls.row(set).unwrap();
        let len = hulls.hull_len(set).unwrap();
        assert!(len >= 3);
        assert!(row[len..].iter().all(|&slot| slot == SENTINEL));

        let mut seen: Vec<i32> = row[..len].to_vec();
        assert!(seen.iter().all(|&slot| slot >= 0 && (slot as usize) < batch.capacity()));
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), len);

        let points = batch.row(set).unwrap();
        assert_eq!(row[0] as usize, anchor_index(points));
    }
}

#[test]
fn every_point_lies_inside_every_hull_edge() {
    let mut rng = StdRng::seed_from_u64(11);
    let batch = random_batch(&mut rng, 48, 30);
    let hulls = giftwrap_host(&batch);

    for (set, hull) in hull_rows(&hulls, &batch).iter().enumerate() {
        let n = hull.len();
        for i in 0..n {
            let a = hull[i];
            let b = hull[(i + 1) % n];
            for p in batch.row(set).unwrap() {
                let cross = p.sub(&a).cross(&b.sub(&a));
                assert!(cross >= -1e-9, "set {set}: {p:?} outside edge {a:?} -> {b:?}");
            }
        }
    }
}

#[test]
fn hulls_turn_clockwise() {
    let mut rng = StdRng::seed_from_u64(13);
    let batch = random_batch(&mut rng, 32, 25);
    let hulls = giftwrap_host(&batch);

    for hull in hull_rows(&hulls, &batch) {
        let n = hull.len();
        for i in 0..n {
            let edge = hull[(i + 1) % n].sub(&hull[i]);
            let next = hull[(i + 2) % n].sub(&hull[(i + 1) % n]);
            assert!(edge.cross(&next) < 0.0);
        }
    }
}

fn random_grid_batch(rng: &mut StdRng, sets: usize, capacity: usize) -> PointSetBatch {
    let rows = (0..sets)
        .map(|_| {
            (0..capacity)
                .map(|_| Point::new(rng.random_range(0..5) as f64, rng.random_range(0..5) as f64))
                .collect()
        })
        .collect();
    PointSetBatch::from_rows(rows).unwrap()
}

#[test]
fn grid_rows_with_collinear_points_close_on_extreme_vertices() {
    let mut rng = StdRng::seed_from_u64(41);
    let batch = random_grid_batch(&mut rng, 2000, 10);
    let hulls = giftwrap_host(&batch);

    for set in 0..batch.sets() {
        let row = hulls.row(set).unwrap();
        let len = hulls.hull_len(set).unwrap();
        assert!(row[len..].iter().all(|&slot| slot == SENTINEL));

        let mut seen: Vec<i32> = row[..len].to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), len, "set {set}: repeated hull index in {row:?}");

        let points = batch.row(set).unwrap();
        let hull = hulls.resolve_points(&batch, set).unwrap();
        for i in 0..len {
            let a = hull[i];
            let b = hull[(i + 1) % len];
            for p in points {
                assert!(p.sub(&a).cross(&b.sub(&a)) >= 0.0, "set {set}: {p:?} outside");
            }
        }
        // Every vertex of a proper polygon is a strict turn, so no vertex sits on an edge.
        if len >= 3 {
            for i in 0..len {
                let edge = hull[(i + 1) % len].sub(&hull[i]);
                let next = hull[(i + 2) % len].sub(&hull[(i + 1) % len]);
                assert!(edge.cross(&next) < 0.0, "set {set}: non-extreme vertex in {row:?}");
            }
        }
    }
}

#[test]
fn rebuilding_gives_the_same_buffer() {
    let mut rng = StdRng::seed_from_u64(17);
    let batch = random_batch(&mut rng, 20, 16);
    assert_eq!(giftwrap_host(&batch), giftwrap_host(&batch));
}

#[test]
fn rows_do_not_influence_each_other() {
    let mut rng = StdRng::seed_from_u64(19);
    let first = random_batch(&mut rng, 9, 12);
    let second = random_batch(&mut rng, 5, 12);

    let joined = giftwrap_host(&first.concat(&second).unwrap());
    let separate = giftwrap_host(&first)
        .concat(&giftwrap_host(&second))
        .unwrap();
    assert_eq!(joined, separate);
}

#[test]
fn single_distinct_point_sets_yield_one_vertex() {
    let rows = vec![vec![Point::new(-2.5, 8.0); 7], vec![Point::new(0.0, 0.0); 7]];
    let batch = PointSetBatch::from_rows(rows).unwrap();
    let hulls = giftwrap_host(&batch);
    for set in 0..2 {
        assert_eq!(hulls.row(set).unwrap(), &[0, -1, -1, -1, -1, -1, -1]);
    }
}

#[tokio::test]
async fn device_launch_matches_host_for_uneven_groups() {
    let mut rng = StdRng::seed_from_u64(23);
    let batch = random_batch(&mut rng, 101, 20);

    for threads_per_group in [1, 7, 32, 128] {
        let launch = LaunchConfig::for_batch(batch.sets(), threads_per_group, 3).unwrap();
        let device = giftwrap_device(&batch, &launch).await.unwrap();
        assert_eq!(device, giftwrap_host(&batch));
    }
}

#[tokio::test]
async fn pipeline_reports_agree_across_execution_strategies() {
    let mut rng = StdRng::seed_from_u64(29);
    let batch = random_batch(&mut rng, 40, 18);

    let mut config = PipelineConfig {
        execution: Execution::Host,
        threads_per_group: 16,
        concurrent_groups: 2,
        compute_rectangles: true,
    };
    let host = HullPipeline::new(config.clone())
        .generate_report(&batch)
        .await
        .unwrap();
    config.execution = Execution::Device;
    let device = HullPipeline::new(config)
        .generate_report(&batch)
        .await
        .unwrap();

    assert_eq!(host.hulls, device.hulls);
    assert_eq!(host.sets, device.sets);
}

#[test]
fn calipers_find_the_best_edge_aligned_rectangle() {
    let mut rng = StdRng::seed_from_u64(31);
    let batch = random_batch(&mut rng, 40, 24);
    let hulls = giftwrap_host(&batch);

    for hull in hull_rows(&hulls, &batch) {
        let result = min_area_rect(&hull).unwrap();
        assert_relative_eq!(result.area, brute_force_min_area(&hull), max_relative = 1e-6);

        let axis_aligned = Bounds::from_points(hull.iter().copied()).unwrap();
        assert!(result.area <= axis_aligned.area() * (1.0 + 1e-9));
    }
}

/// Distance of `angle` from the nearest multiple of a quarter turn, in turns.
fn quarter_turn_residual(angle: f64) -> f64 {
    let turns = angle / FRAC_PI_2;
    (turns - turns.round()).abs()
}

#[test]
fn calipers_follow_a_rotated_input() {
    let mut rng = StdRng::seed_from_u64(37);
    let batch = random_batch(&mut rng, 12, 20);
    let hulls = giftwrap_host(&batch);

    for hull in hull_rows(&hulls, &batch) {
        let base = min_area_rect(&hull).unwrap();
        let theta: f64 = rng.random_range(-3.0..3.0);
        let (s, c) = theta.sin_cos();
        let rotated: Vec<Point> = hull
            .iter()
            .map(|p| Point::new(p.x * c - p.y * s, p.x * s + p.y * c))
            .collect();

        // Rotation keeps the walk clockwise, only the starting vertex may move.
        let turned = min_area_rect(&rotated).unwrap();
        assert_relative_eq!(turned.area, base.area, max_relative = 1e-6);
        assert!(quarter_turn_residual(turned.angles()[0] - base.angles()[0] - theta) < 1e-6);
    }
}
