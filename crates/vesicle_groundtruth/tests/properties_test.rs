//! # Ground Truth Property Tests
//!
//! Invariants that must hold for any painted input: separation, bounds,
//! determinism, and the worked examples for radius and threshold.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vesicle_core::{Point3, Resolution, Shape, Volume, VoxelCoord};
use vesicle_groundtruth::{
    extract_centroids, GroundTruthConfig, GroundTruthGenerator, MarkerClass, PerClass,
    SeparationEnforcer, SeparationScope, SphereRasterizer,
};

/// Paints `count` small random strokes into a fresh volume.
fn random_layer(rng: &mut ChaCha8Rng, shape: Shape, count: usize) -> Volume<u16> {
    let mut vol = Volume::zeros(shape);
    for _ in 0..count {
        let z = rng.gen_range(0..shape.z);
        let y = rng.gen_range(0..shape.y);
        let x = rng.gen_range(0..shape.x);
        let len = rng.gen_range(1..4);
        for step in 0..len {
            vol.set(VoxelCoord::new(z, y + step, x + step), rng.gen_range(1..5));
        }
    }
    vol
}

fn config(diameter: f64, resolution: Resolution, min_distance: i64) -> GroundTruthConfig {
    GroundTruthConfig {
        diameter,
        resolution,
        min_distance,
        ..GroundTruthConfig::default()
    }
}

/// Test: every accepted pair within a class is at least T apart.
#[test]
fn test_accepted_centroids_respect_threshold() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let shape = Shape::new(16, 32, 32);

    for min_distance in 0..4 {
        let pos = random_layer(&mut rng, shape, 40);
        let neg = random_layer(&mut rng, shape, 40);
        let resolution = Resolution::new(40.0, 20.0, 20.0);
        let generator =
            GroundTruthGenerator::new(config(120.0, resolution, min_distance)).unwrap();

        let gt = generator.compute(shape, &PerClass::new(&pos, &neg)).unwrap();
        let t = gt.report.threshold as f64;

        for class in MarkerClass::ALL {
            let accepted = gt.accepted(class);
            for (i, a) in accepted.iter().enumerate() {
                for b in &accepted[i + 1..] {
                    assert!(
                        a.position.distance(b.position) >= t,
                        "{class} centroids {:?} and {:?} closer than {t}",
                        a.position,
                        b.position
                    );
                }
            }
        }
    }
}

/// Test: joint separation holds across both classes.
#[test]
fn test_joint_threshold_across_classes() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let shape = Shape::new(12, 24, 24);
    let pos = random_layer(&mut rng, shape, 30);
    let neg = random_layer(&mut rng, shape, 30);

    let cfg = GroundTruthConfig {
        separation: SeparationScope::Joint,
        ..config(60.0, Resolution::isotropic(20.0), 2)
    };
    let gt = GroundTruthGenerator::new(cfg)
        .unwrap()
        .compute(shape, &PerClass::new(&pos, &neg))
        .unwrap();

    let all: Vec<_> = gt
        .accepted(MarkerClass::Pos)
        .iter()
        .chain(gt.accepted(MarkerClass::Neg))
        .collect();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert!(a.position.distance(b.position) >= 5.0);
        }
    }
}

/// Test: two runs with identical input are bit-identical.
#[test]
fn test_pipeline_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let shape = Shape::new(10, 40, 40);
    let pos = random_layer(&mut rng, shape, 25);
    let neg = random_layer(&mut rng, shape, 25);
    let painted = PerClass::new(&pos, &neg);

    let generator =
        GroundTruthGenerator::new(config(90.0, Resolution::new(30.0, 15.0, 15.0), 1)).unwrap();
    let first = generator.compute(shape, &painted).unwrap();
    let second = generator.compute(shape, &painted).unwrap();

    assert_eq!(first.volume.as_bytes(), second.volume.as_bytes());
    assert_eq!(first.report, second.report);
}

/// Test: thread count does not change the output.
#[test]
fn test_workers_do_not_change_output() {
    let mut rng = ChaCha8Rng::seed_from_u64(19);
    let shape = Shape::new(12, 32, 32);
    let pos = random_layer(&mut rng, shape, 30);
    let neg = random_layer(&mut rng, shape, 30);
    let painted = PerClass::new(&pos, &neg);

    let single = GroundTruthGenerator::new(config(100.0, Resolution::isotropic(20.0), 1))
        .unwrap()
        .compute(shape, &painted)
        .unwrap();
    let threaded = GroundTruthGenerator::new(GroundTruthConfig {
        workers: 4,
        ..config(100.0, Resolution::isotropic(20.0), 1)
    })
    .unwrap()
    .compute(shape, &painted)
    .unwrap();

    assert_eq!(single.volume, threaded.volume);
    assert_eq!(single.report, threaded.report);
}

/// Test: one 26-connected blob gives one centroid at the coordinate mean.
#[test]
fn test_connected_blob_yields_mean() {
    let shape = Shape::new(10, 10, 10);
    let mut vol: Volume<u8> = Volume::zeros(shape);
    let voxels = [(2, 2, 2), (3, 3, 3), (3, 4, 3), (4, 5, 4), (4, 5, 5)];
    for &(z, y, x) in &voxels {
        vol.set(VoxelCoord::new(z, y, x), 1);
    }

    let centroids = extract_centroids(MarkerClass::Pos, &vol);
    assert_eq!(centroids.len(), 1);
    assert_eq!(centroids[0].voxel_count, 5);
    assert_eq!(centroids[0].position, Point3::new(16.0 / 5.0, 19.0 / 5.0, 17.0 / 5.0));
}

/// Test: two isolated voxels farther than T apart both survive.
#[test]
fn test_far_voxels_both_accepted() {
    let shape = Shape::new(10, 10, 20);
    let mut vol: Volume<u8> = Volume::zeros(shape);
    vol.set(VoxelCoord::new(5, 5, 2), 1);
    vol.set(VoxelCoord::new(5, 5, 9), 1);

    let centroids = extract_centroids(MarkerClass::Neg, &vol);
    assert_eq!(centroids.len(), 2);

    let outcome = SeparationEnforcer::new(2).enforce(&centroids);
    assert_eq!(outcome.accepted.len(), 2);
}

/// Test: resolution 10, diameter 100 gives radius 5 with a sharp boundary.
#[test]
fn test_isotropic_radius_example() {
    let rasterizer = SphereRasterizer::new(100.0, Resolution::isotropic(10.0)).unwrap();
    assert_eq!(rasterizer.radii(), [5.0, 5.0, 5.0]);

    let center = Point3::new(10.0, 10.0, 10.0);
    assert!(rasterizer.contains(center, VoxelCoord::new(15, 10, 10)));
    assert!(!rasterizer.contains(center, VoxelCoord::new(16, 10, 10)));
}

/// Test: min_distance 2 merges at distance 4 and keeps both at distance 5.
#[test]
fn test_threshold_example() {
    let shape = Shape::new(1, 1, 16);
    let enforcer = SeparationEnforcer::new(2);
    assert_eq!(enforcer.threshold(), 5);

    let mut close: Volume<u8> = Volume::zeros(shape);
    close.set(VoxelCoord::new(0, 0, 2), 1);
    close.set(VoxelCoord::new(0, 0, 6), 1);
    let outcome = enforcer.enforce(&extract_centroids(MarkerClass::Pos, &close));
    assert_eq!(outcome.accepted.len(), 1);

    let mut apart: Volume<u8> = Volume::zeros(shape);
    apart.set(VoxelCoord::new(0, 0, 2), 1);
    apart.set(VoxelCoord::new(0, 0, 7), 1);
    let outcome = enforcer.enforce(&extract_centroids(MarkerClass::Pos, &apart));
    assert_eq!(outcome.accepted.len(), 2);
}

/// Test: coarser z spacing flattens the sphere along z.
#[test]
fn test_anisotropic_sphere_is_flattened() {
    let shape = Shape::new(21, 21, 21);
    let mut pos: Volume<u8> = Volume::zeros(shape);
    pos.set(VoxelCoord::new(10, 10, 10), 1);
    let neg: Volume<u8> = Volume::zeros(shape);

    let gt = GroundTruthGenerator::new(config(100.0, Resolution::new(20.0, 10.0, 10.0), 1))
        .unwrap()
        .compute(shape, &PerClass::new(&pos, &neg))
        .unwrap();

    assert_eq!(gt.report.radii, [2.5, 5.0, 5.0]);

    let extent = |axis: usize| {
        gt.volume
            .painted()
            .map(|(c, _)| c.as_array()[axis])
            .fold((usize::MAX, 0), |(lo, hi), v| (lo.min(v), hi.max(v)))
    };
    assert_eq!(extent(0), (8, 12));
    assert_eq!(extent(1), (5, 15));
    assert_eq!(extent(2), (5, 15));
}

/// Test: doubling the diameter doubles the radius and grows the footprint.
#[test]
fn test_radius_scales_with_diameter() {
    let shape = Shape::new(40, 40, 40);
    let center = Point3::new(20.0, 20.0, 20.0);

    let small = SphereRasterizer::new(60.0, Resolution::isotropic(10.0)).unwrap();
    let large = SphereRasterizer::new(120.0, Resolution::isotropic(10.0)).unwrap();
    assert_eq!(large.radii()[0], 2.0 * small.radii()[0]);

    let small_voxels = small.footprint(center, shape).indices.len() as f64;
    let large_voxels = large.footprint(center, shape).indices.len() as f64;
    let ratio = large_voxels / small_voxels;
    assert!((6.0..10.0).contains(&ratio), "volume ratio {ratio}");
}

/// Test: a sphere at the corner is clipped without error.
#[test]
fn test_corner_sphere_is_clipped() {
    let shape = Shape::new(8, 8, 8);
    let mut pos: Volume<u8> = Volume::zeros(shape);
    pos.set(VoxelCoord::new(0, 0, 0), 1);
    let neg: Volume<u8> = Volume::zeros(shape);

    let gt = GroundTruthGenerator::new(config(100.0, Resolution::isotropic(10.0), 1))
        .unwrap()
        .compute(shape, &PerClass::new(&pos, &neg))
        .unwrap();

    assert_eq!(gt.volume.shape(), shape);
    assert_eq!(gt.report.classes.pos.clipped_spheres, 1);
    assert_eq!(gt.volume.get(VoxelCoord::new(0, 0, 5)), Some(1));
    assert_eq!(gt.volume.get(VoxelCoord::new(7, 7, 7)), Some(0));
    // One octant of a radius-5 ball.
    assert!(gt.report.labeled_voxels < shape.len());
}
