//! Example: hypothesize-and-verify with the seven-point solver
//!
//! Synthetic matches between two calibrated views are contaminated with
//! outliers. Random seven-point samples are fed to the solver and every
//! hypothesis is scored by counting matches within a Sampson-distance
//! threshold, which is the job a RANSAC loop would do around this crate.

use nalgebra::{Point3, Rotation3, Vector3};
use rand::Rng;
use seven_point::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Seven-Point Fundamental Matrix Example ===\n");

    let n_points = 60;
    let n_outliers = 20;
    let n_total = n_points + n_outliers;

    let mut rng = rand::thread_rng();
    let rotation = Rotation3::new(Vector3::new(0.05, -0.1, 0.02));
    let translation = Vector3::new(0.5, 0.1, 0.05);

    let mut data = DataMatrix::zeros(n_total, 4);
    for i in 0..n_points {
        // 3D point in front of the first camera
        let p = Point3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(3.0..6.0),
        );
        let q = rotation * p + translation;
        data[(i, 0)] = p.x / p.z + rng.gen_range(-1e-4..1e-4);
        data[(i, 1)] = p.y / p.z + rng.gen_range(-1e-4..1e-4);
        data[(i, 2)] = q.x / q.z + rng.gen_range(-1e-4..1e-4);
        data[(i, 3)] = q.y / q.z + rng.gen_range(-1e-4..1e-4);
    }
    for i in n_points..n_total {
        for c in 0..4 {
            data[(i, c)] = rng.gen_range(-0.4..0.4);
        }
    }

    println!("Generated {} inliers and {} outliers\n", n_points, n_outliers);

    let estimator = FundamentalEstimator::new();
    let threshold = 1e-3; // normalized image coordinates
    let iterations = 200;

    let mut best: Option<(FundamentalMatrix, usize)> = None;
    let mut degenerate = 0;
    for _ in 0..iterations {
        let mut sample = Vec::with_capacity(estimator.sample_size());
        while sample.len() < estimator.sample_size() {
            let idx = rng.gen_range(0..n_total);
            if !sample.contains(&idx) {
                sample.push(idx);
            }
        }

        let models = estimator.estimate_model(&data, &sample);
        if models.is_empty() {
            degenerate += 1;
            continue;
        }

        for model in models {
            if !estimator.is_valid_model(&model, &data, &sample, 1.0) {
                continue;
            }
            let inliers = (0..n_total)
                .filter(|&r| {
                    model.sampson_distance(data[(r, 0)], data[(r, 1)], data[(r, 2)], data[(r, 3)])
                        < threshold
                })
                .count();
            if best.as_ref().map_or(true, |(_, count)| inliers > *count) {
                best = Some((model, inliers));
            }
        }
    }

    let (model, inliers) = best.ok_or("no hypothesis survived")?;
    println!("Estimation results:");
    println!("  Iterations: {}", iterations);
    println!("  Degenerate samples: {}", degenerate);
    println!(
        "  Inliers: {} / {} ({:.2}%)",
        inliers,
        n_total,
        100.0 * inliers as f64 / n_total as f64
    );

    println!("\nEstimated fundamental matrix:");
    for i in 0..3 {
        println!(
            "  [{:10.6}, {:10.6}, {:10.6}]",
            model.f[(i, 0)],
            model.f[(i, 1)],
            model.f[(i, 2)]
        );
    }

    let truth = translation.cross_matrix() * rotation.matrix();
    let truth = truth / truth[(2, 2)];
    println!("\nGround truth (scaled to F[2,2] = 1):");
    for i in 0..3 {
        println!(
            "  [{:10.6}, {:10.6}, {:10.6}]",
            truth[(i, 0)],
            truth[(i, 1)],
            truth[(i, 2)]
        );
    }

    Ok(())
}
