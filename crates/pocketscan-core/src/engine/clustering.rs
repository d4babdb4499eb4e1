use crate::engine::config::ClusterConfig;
use crate::engine::utils::sampling::subsample;
use nalgebra::Point3;
use rand::Rng;
use tracing::{debug, info, instrument};

/// A group of cavity points gathered around a single seed point.
#[derive(Debug, Clone, PartialEq)]
pub struct CavityCluster {
    /// The seed first, then its neighbours in list order.
    pub points: Vec<Point3<f64>>,
}

impl CavityCluster {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Retained clusters in discovery order.
    pub clusters: Vec<CavityCluster>,
    /// Number of groups dropped for being below the minimum size.
    pub discarded_groups: usize,
    /// Original cavity point count when the input was subsampled first.
    pub subsampled_from: Option<usize>,
}

/// Single-pass seed-centered grouping.
///
/// Walks `points` in order; every still-unassigned point opens a group containing itself
/// and each other unassigned point within `radius` (inclusive) of it. Neighbours of
/// neighbours are not followed. Groups smaller than `min_size` are dropped and their
/// points stay assigned.
pub fn group_by_seed(
    points: &[Point3<f64>],
    radius: f64,
    min_size: usize,
) -> (Vec<CavityCluster>, usize) {
    let mut assigned = vec![false; points.len()];
    let mut clusters = Vec::new();
    let mut discarded = 0;

    for seed_idx in 0..points.len() {
        if assigned[seed_idx] {
            continue;
        }
        assigned[seed_idx] = true;
        let seed = points[seed_idx];
        let mut members = vec![seed];

        for other_idx in (seed_idx + 1)..points.len() {
            if !assigned[other_idx] && (points[other_idx] - seed).norm() <= radius {
                assigned[other_idx] = true;
                members.push(points[other_idx]);
            }
        }

        if members.len() >= min_size {
            clusters.push(CavityCluster { points: members });
        } else {
            discarded += 1;
        }
    }

    (clusters, discarded)
}

/// Groups cavity points into pockets using the tier chosen by `atom_count`.
///
/// Inputs larger than `config.subsample_trigger` are first reduced to
/// `config.subsample_target` points drawn from `rng`; `rng` is untouched otherwise.
#[instrument(
    skip_all,
    name = "cavity_clustering",
    fields(cavity_points = points.len(), atom_count = atom_count)
)]
pub fn cluster_cavity_points(
    points: Vec<Point3<f64>>,
    atom_count: usize,
    config: &ClusterConfig,
    rng: &mut impl Rng,
) -> Clustering {
    let (points, subsampled_from) = if points.len() > config.subsample_trigger {
        let original = points.len();
        let reduced = subsample(&points, config.subsample_target, rng);
        debug!(from = original, to = reduced.len(), "Subsampled cavity points.");
        (reduced, Some(original))
    } else {
        (points, None)
    };

    let tier = config.tier_for(atom_count);
    let (clusters, discarded_groups) = group_by_seed(&points, tier.radius, tier.min_size);

    info!(
        clusters = clusters.len(),
        discarded_groups,
        radius = tier.radius,
        min_size = tier.min_size,
        "Cavity points clustered."
    );

    Clustering {
        clusters,
        discarded_groups,
        subsampled_from,
    }
}
