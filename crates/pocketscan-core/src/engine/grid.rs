use crate::core::utils::geometry::{BoundingBox, axis_sample_count, axis_samples};
use crate::engine::config::GridConfig;
use crate::engine::error::EngineError;
use crate::engine::utils::sampling::uniform_points_in_box;
use nalgebra::Point3;
use rand::Rng;
use tracing::{info, instrument};

/// How the sample points of a [`SampleGrid`] were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// The full cartesian lattice fit under the point cap.
    Lattice,
    /// The lattice would have held `lattice_points` points, over the cap, so the cap's
    /// worth of points was drawn uniformly inside the box instead.
    RandomFallback { lattice_points: usize },
}

#[derive(Debug, Clone)]
pub struct SampleGrid {
    pub points: Vec<Point3<f64>>,
    pub spacing: f64,
    pub mode: SamplingMode,
    pub bounds: BoundingBox,
}

/// Builds the sample points around an atom cloud.
///
/// The atom bounding box is expanded by `config.margin`; the spacing and point cap come
/// from the atom-count tier. Lattice points are emitted with y outermost, then x, then z.
/// The random fallback only consumes `rng` when it is taken.
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] for an empty atom list and
/// [`EngineError::DegenerateInput`] when the sampling volume yields no points.
#[instrument(skip_all, name = "grid_generation", fields(atoms = positions.len()))]
pub fn generate(
    positions: &[Point3<f64>],
    config: &GridConfig,
    rng: &mut impl Rng,
) -> Result<SampleGrid, EngineError> {
    let bounds = BoundingBox::from_points(positions)
        .ok_or(EngineError::EmptyInput)?
        .expanded(config.margin);
    let tier = config.tier_for(positions.len());

    let lattice_points = (0..3)
        .map(|axis| axis_sample_count(bounds.min[axis], bounds.max[axis], tier.spacing))
        .try_fold(1usize, |total, count| total.checked_mul(count))
        .unwrap_or(usize::MAX);

    let (points, mode) = if lattice_points > tier.max_points {
        info!(
            lattice_points,
            max_points = tier.max_points,
            "Lattice exceeds point cap, falling back to uniform random sampling."
        );
        (
            uniform_points_in_box(&bounds, tier.max_points, rng),
            SamplingMode::RandomFallback { lattice_points },
        )
    } else {
        let xs = axis_samples(bounds.min.x, bounds.max.x, tier.spacing);
        let ys = axis_samples(bounds.min.y, bounds.max.y, tier.spacing);
        let zs = axis_samples(bounds.min.z, bounds.max.z, tier.spacing);
        let mut points = Vec::with_capacity(lattice_points);
        for &y in &ys {
            for &x in &xs {
                for &z in &zs {
                    points.push(Point3::new(x, y, z));
                }
            }
        }
        (points, SamplingMode::Lattice)
    };

    if points.is_empty() {
        return Err(EngineError::DegenerateInput(format!(
            "sampling box {:?}..{:?} produced no points at spacing {}",
            bounds.min, bounds.max, tier.spacing
        )));
    }

    info!(
        grid_points = points.len(),
        spacing = tier.spacing,
        mode = ?mode,
        "Sample grid generated."
    );

    Ok(SampleGrid {
        points,
        spacing: tier.spacing,
        mode,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::GridTier;
    use crate::engine::utils::sampling::seeded_rng;

    #[test]
    fn lattice_covers_expanded_box_in_y_x_z_order() {
        let config = GridConfig {
            margin: 1.0,
            ..GridConfig::default()
        };
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.5, 0.0)];
        let grid = generate(&positions, &config, &mut seeded_rng(0)).unwrap();

        // x: [-1, 2) -> -1, 0.5 ; y: [-1, 1.5) -> -1, 0.5 ; z: [-1, 1) -> -1, 0.5
        assert_eq!(grid.mode, SamplingMode::Lattice);
        assert_eq!(grid.spacing, 1.5);
        assert_eq!(
            grid.points,
            vec![
                Point3::new(-1.0, -1.0, -1.0),
                Point3::new(-1.0, -1.0, 0.5),
                Point3::new(0.5, -1.0, -1.0),
                Point3::new(0.5, -1.0, 0.5),
                Point3::new(-1.0, 0.5, -1.0),
                Point3::new(-1.0, 0.5, 0.5),
                Point3::new(0.5, 0.5, -1.0),
                Point3::new(0.5, 0.5, 0.5),
            ]
        );
    }

    #[test]
    fn single_atom_default_lattice_has_expected_size() {
        let grid = generate(&[Point3::origin()], &GridConfig::default(), &mut seeded_rng(0))
            .unwrap();
        // 10 / 1.5 -> 7 samples per axis
        assert_eq!(grid.points.len(), 7 * 7 * 7);
        assert_eq!(grid.points[0], Point3::new(-5.0, -5.0, -5.0));
    }

    #[test]
    fn large_protein_uses_coarse_tier() {
        let config = GridConfig {
            large_protein_atoms: 2,
            ..GridConfig::default()
        };
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-1.0, 0.5, 2.0),
        ];
        let grid = generate(&positions, &config, &mut seeded_rng(0)).unwrap();
        assert_eq!(grid.spacing, 2.0);
    }

    #[test]
    fn oversized_lattice_falls_back_to_seeded_random_points() {
        let config = GridConfig {
            fine: GridTier {
                spacing: 1.5,
                max_points: 100,
            },
            ..GridConfig::default()
        };
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 4.0, 4.0)];

        let first = generate(&positions, &config, &mut seeded_rng(21)).unwrap();
        let second = generate(&positions, &config, &mut seeded_rng(21)).unwrap();

        assert_eq!(first.points.len(), 100);
        assert!(matches!(
            first.mode,
            SamplingMode::RandomFallback { lattice_points } if lattice_points == 10 * 10 * 10
        ));
        assert_eq!(first.points, second.points);
        assert!(first.points.iter().all(|p| first.bounds.contains(p)));
    }

    #[test]
    fn astronomically_fine_spacing_falls_back_on_counts_alone() {
        let config = GridConfig {
            fine: GridTier {
                spacing: 1e-9,
                max_points: 50,
            },
            ..GridConfig::default()
        };
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
        let grid = generate(&positions, &config, &mut seeded_rng(3)).unwrap();

        assert_eq!(grid.points.len(), 50);
        assert!(matches!(
            grid.mode,
            SamplingMode::RandomFallback { lattice_points } if lattice_points == usize::MAX
        ));
    }

    #[test]
    fn empty_positions_are_rejected() {
        let result = generate(&[], &GridConfig::default(), &mut seeded_rng(0));
        assert!(matches!(result, Err(EngineError::EmptyInput)));
    }

    #[test]
    fn zero_volume_box_is_degenerate() {
        let config = GridConfig {
            margin: 0.0,
            ..GridConfig::default()
        };
        let result = generate(&[Point3::new(1.0, 1.0, 1.0)], &config, &mut seeded_rng(0));
        assert!(matches!(result, Err(EngineError::DegenerateInput(_))));
    }
}
