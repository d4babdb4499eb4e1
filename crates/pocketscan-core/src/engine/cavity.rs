use crate::core::utils::spatial::AtomIndex;
use crate::engine::config::CavityConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Point3;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Whether a nearest-atom distance falls inside the closed cavity band.
#[inline]
pub fn is_cavity_distance(distance: f64, config: &CavityConfig) -> bool {
    distance >= config.min_distance && distance <= config.max_distance
}

/// Keeps the sample points whose nearest atom lies within the cavity distance band.
///
/// Points are classified independently in chunks of `config.chunk_size`; the output
/// preserves input order and does not depend on the chunk size.
#[instrument(skip_all, name = "cavity_filter", fields(grid_points = points.len()))]
pub fn find_cavity_points(
    points: &[Point3<f64>],
    atoms: &AtomIndex,
    config: &CavityConfig,
    reporter: &ProgressReporter,
) -> Vec<Point3<f64>> {
    let chunk_size = config.chunk_size.max(1);
    reporter.report(Progress::TaskStart {
        total_steps: points.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let chunk_iter = points.chunks(chunk_size);

    #[cfg(feature = "parallel")]
    let chunk_iter = points.par_chunks(chunk_size);

    let kept_per_chunk: Vec<Vec<Point3<f64>>> = chunk_iter
        .map(|chunk| {
            let kept = chunk
                .iter()
                .filter(|point| {
                    atoms
                        .nearest_distance(point)
                        .is_some_and(|d| is_cavity_distance(d, config))
                })
                .copied()
                .collect();
            reporter.report(Progress::TaskAdvance {
                steps: chunk.len() as u64,
            });
            kept
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let cavity_points: Vec<Point3<f64>> = kept_per_chunk.into_iter().flatten().collect();
    info!(
        cavity_points = cavity_points.len(),
        min_distance = config.min_distance,
        max_distance = config.max_distance,
        "Cavity points classified."
    );
    cavity_points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_points() -> Vec<Point3<f64>> {
        (0..40)
            .map(|i| Point3::new(i as f64 * 0.25, 0.1 * (i % 3) as f64, -0.05 * (i % 5) as f64))
            .collect()
    }

    #[test]
    fn distance_band_is_closed() {
        let config = CavityConfig::default();
        assert!(!is_cavity_distance(2.4999, &config));
        assert!(is_cavity_distance(2.5, &config));
        assert!(is_cavity_distance(8.0, &config));
        assert!(!is_cavity_distance(8.0001, &config));
        assert!(!is_cavity_distance(f64::NAN, &config));
    }

    #[test]
    fn keeps_points_inside_band_in_input_order() {
        let atoms = AtomIndex::new(&[Point3::origin()]);
        let points = vec![
            Point3::new(9.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, -2.5, 0.0),
            Point3::new(0.0, 0.0, 8.0),
        ];
        let kept = find_cavity_points(
            &points,
            &atoms,
            &CavityConfig::default(),
            &ProgressReporter::new(),
        );
        assert_eq!(
            kept,
            vec![
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(0.0, -2.5, 0.0),
                Point3::new(0.0, 0.0, 8.0),
            ]
        );
    }

    #[test]
    fn chunk_size_does_not_change_classification() {
        let atoms = AtomIndex::new(&[Point3::new(0.0, 0.0, 0.0), Point3::new(9.5, 0.0, 0.0)]);
        let points = probe_points();
        let reference = find_cavity_points(
            &points,
            &atoms,
            &CavityConfig {
                min_distance: 1.0,
                max_distance: 3.0,
                chunk_size: points.len(),
            },
            &ProgressReporter::new(),
        );
        assert!(!reference.is_empty());
        for chunk_size in [1, 3, 7, 1000] {
            let config = CavityConfig {
                min_distance: 1.0,
                max_distance: 3.0,
                chunk_size,
            };
            let result = find_cavity_points(&points, &atoms, &config, &ProgressReporter::new());
            assert_eq!(result, reference, "chunk_size = {chunk_size}");
        }
    }

    #[test]
    fn reports_progress_for_every_point() {
        use std::sync::atomic::{AtomicU64, Ordering};

        let advanced = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::TaskAdvance { steps } = event {
                advanced.fetch_add(steps, Ordering::Relaxed);
            }
        }));
        let atoms = AtomIndex::new(&[Point3::origin()]);
        let config = CavityConfig {
            chunk_size: 6,
            ..CavityConfig::default()
        };
        find_cavity_points(&probe_points(), &atoms, &config, &reporter);
        drop(reporter);
        assert_eq!(advanced.into_inner(), 40);
    }
}
