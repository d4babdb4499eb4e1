use crate::core::models::protein::Protein;
use crate::core::models::residue::{NearbyResidue, ResidueClass};
use crate::core::models::site::{BindingSite, SurfaceAccessibility};
use crate::core::utils::geometry::centroid;
use crate::core::utils::spatial::AtomIndex;
use crate::engine::clustering::CavityCluster;
use crate::engine::config::ScoringConfig;
use crate::engine::error::EngineError;
use nalgebra::Point3;
use tracing::{trace, warn};

const SIZE_SMALL_VOLUME: f64 = 200.0;
const SIZE_OPTIMAL_MIN_VOLUME: f64 = 300.0;
const SIZE_OPTIMAL_MAX_VOLUME: f64 = 800.0;
const SIZE_LARGE_VOLUME: f64 = 1500.0;

const HYDROPHOBIC_BALANCED_MIN: f64 = 0.3;
const HYDROPHOBIC_BALANCED_MAX: f64 = 0.7;
const POLAR_BALANCED_MIN: f64 = 0.2;
const HYDROPHOBIC_EXCESS: f64 = 0.8;
const HYDROPHOBIC_DEFICIT: f64 = 0.2;
const CHARGED_EXCESS: f64 = 0.4;
const CHARGED_PENALTY: f64 = 0.7;

const DEPTH_SHALLOW_RESIDUES: usize = 5;
const DEPTH_OPEN_RESIDUES: usize = 20;

/// Counts of nearby residues per chemical class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResidueComposition {
    pub hydrophobic: usize,
    pub polar: usize,
    pub charged: usize,
    pub total: usize,
}

impl ResidueComposition {
    pub fn of(residues: &[NearbyResidue]) -> Self {
        residues
            .iter()
            .fold(Self::default(), |mut acc, residue| {
                match residue.class() {
                    ResidueClass::Hydrophobic => acc.hydrophobic += 1,
                    ResidueClass::Polar => acc.polar += 1,
                    ResidueClass::Charged => acc.charged += 1,
                    ResidueClass::Other => {}
                }
                acc.total += 1;
                acc
            })
    }

    fn ratio(count: usize, total: usize) -> f64 {
        if total == 0 { 0.0 } else { count as f64 / total as f64 }
    }

    pub fn hydrophobic_ratio(&self) -> f64 {
        Self::ratio(self.hydrophobic, self.total)
    }

    pub fn polar_ratio(&self) -> f64 {
        Self::ratio(self.polar, self.total)
    }

    pub fn charged_ratio(&self) -> f64 {
        Self::ratio(self.charged, self.total)
    }
}

pub fn size_score(volume: f64) -> f64 {
    if volume < SIZE_SMALL_VOLUME {
        0.1
    } else if volume > SIZE_LARGE_VOLUME {
        0.3
    } else if (SIZE_OPTIMAL_MIN_VOLUME..=SIZE_OPTIMAL_MAX_VOLUME).contains(&volume) {
        1.0
    } else {
        0.7
    }
}

/// Scores the residue mix lining a pocket. Must not be called with an empty composition;
/// that case short-circuits to the minimal score in [`druggability_score`].
pub fn composition_score(composition: &ResidueComposition) -> f64 {
    let hydrophobic = composition.hydrophobic_ratio();
    let polar = composition.polar_ratio();

    let base = if (HYDROPHOBIC_BALANCED_MIN..=HYDROPHOBIC_BALANCED_MAX).contains(&hydrophobic)
        && polar >= POLAR_BALANCED_MIN
    {
        1.0
    } else if hydrophobic > HYDROPHOBIC_EXCESS {
        0.4
    } else if hydrophobic < HYDROPHOBIC_DEFICIT {
        0.3
    } else {
        0.6
    };

    if composition.charged_ratio() > CHARGED_EXCESS {
        base * CHARGED_PENALTY
    } else {
        base
    }
}

pub fn depth_score(residue_count: usize) -> f64 {
    if residue_count < DEPTH_SHALLOW_RESIDUES {
        0.2
    } else if residue_count > DEPTH_OPEN_RESIDUES {
        0.6
    } else {
        1.0
    }
}

/// Weighted druggability score, rounded to three decimals and capped at
/// `config.max_score`.
///
/// A pocket without nearby residues gets `config.minimal_score` outright.
pub fn druggability_score(volume: f64, residues: &[NearbyResidue], config: &ScoringConfig) -> f64 {
    if residues.is_empty() {
        return config.minimal_score;
    }
    let composition = ResidueComposition::of(residues);
    let weighted = config.size_weight * size_score(volume)
        + config.composition_weight * composition_score(&composition)
        + config.depth_weight * depth_score(composition.total);
    round_score(weighted).min(config.max_score)
}

/// Scores compare and tie at this precision.
fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

pub fn hydrophobicity(residues: &[NearbyResidue]) -> f64 {
    ResidueComposition::of(residues).hydrophobic_ratio()
}

/// Collects the residues with at least one atom within `radius` of `center`.
///
/// Each (chain, residue number, residue name) appears once with its smallest atom
/// distance. The result is sorted by distance; ties keep atom order.
pub fn find_nearby_residues(
    center: &Point3<f64>,
    protein: &Protein,
    atoms: &AtomIndex,
    radius: f64,
) -> Vec<NearbyResidue> {
    let mut residues: Vec<NearbyResidue> = Vec::new();

    for (atom_idx, distance) in atoms.within(center, radius) {
        let Some(atom) = protein.atoms().get(atom_idx) else {
            continue;
        };
        match residues.iter_mut().find(|r| r.key() == atom.residue_key()) {
            Some(existing) => existing.distance = existing.distance.min(distance),
            None => residues.push(NearbyResidue {
                chain: atom.chain_id().to_string(),
                residue_number: atom.residue_number(),
                residue_name: atom.residue_name().to_string(),
                distance,
            }),
        }
    }

    residues.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    residues
}

fn try_score(
    site_id: usize,
    cluster: &CavityCluster,
    protein: &Protein,
    atoms: &AtomIndex,
    config: &ScoringConfig,
) -> Result<BindingSite, EngineError> {
    let center = centroid(&cluster.points).ok_or_else(|| EngineError::Numeric {
        stage: "scoring",
        reason: "cluster has no points".to_string(),
    })?;
    if !center.iter().all(|c| c.is_finite()) {
        return Err(EngineError::Numeric {
            stage: "scoring",
            reason: format!("cluster center {center:?} is not finite"),
        });
    }

    let volume = cluster.len() as f64 * config.unit_cell_volume;
    let nearby_residues = find_nearby_residues(&center, protein, atoms, config.probe_radius);
    let nearest_atom = atoms.nearest_distance(&center).ok_or_else(|| EngineError::Numeric {
        stage: "scoring",
        reason: "no atoms to measure accessibility against".to_string(),
    })?;

    let druggability_score = druggability_score(volume, &nearby_residues, config);
    if !druggability_score.is_finite() {
        return Err(EngineError::Numeric {
            stage: "scoring",
            reason: format!("druggability score evaluated to {druggability_score}"),
        });
    }

    trace!(
        site_id,
        volume,
        residues = nearby_residues.len(),
        druggability_score,
        "Scored cluster."
    );

    Ok(BindingSite {
        site_id,
        center,
        volume,
        druggability_score,
        hydrophobicity: hydrophobicity(&nearby_residues),
        nearby_residues,
        cavity_points: cluster.len(),
        surface_accessibility: SurfaceAccessibility::from_distance(nearest_atom),
    })
}

fn minimal_site(site_id: usize, cluster: &CavityCluster, config: &ScoringConfig) -> BindingSite {
    let center = centroid(&cluster.points)
        .filter(|c| c.iter().all(|v| v.is_finite()))
        .unwrap_or_else(Point3::origin);
    BindingSite {
        site_id,
        center,
        volume: cluster.len() as f64 * config.unit_cell_volume,
        druggability_score: config.minimal_score,
        hydrophobicity: 0.0,
        nearby_residues: Vec::new(),
        cavity_points: cluster.len(),
        surface_accessibility: SurfaceAccessibility::Exposed,
    }
}

/// Derives the descriptors and druggability score of one cluster.
///
/// Never fails: a numeric problem yields a minimal-score site, logged at `warn`.
pub fn score_cluster(
    site_id: usize,
    cluster: &CavityCluster,
    protein: &Protein,
    atoms: &AtomIndex,
    config: &ScoringConfig,
) -> BindingSite {
    match try_score(site_id, cluster, protein, atoms, config) {
        Ok(site) => site,
        Err(e) => {
            warn!(site_id, error = %e, "Falling back to a minimal-score site.");
            minimal_site(site_id, cluster, config)
        }
    }
}
