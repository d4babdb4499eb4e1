use crate::core::models::protein::Protein;
use crate::core::models::site::BindingSite;
use crate::core::utils::spatial::AtomIndex;
use crate::engine::cavity::find_cavity_points;
use crate::engine::clustering::cluster_cavity_points;
use crate::engine::config::DetectionConfig;
use crate::engine::error::EngineError;
use crate::engine::grid::{self, SamplingMode};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::ranking::rank_sites;
use crate::engine::scoring::score_cluster;
use crate::engine::utils::sampling::{fresh_seed, seeded_rng};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Counters describing how a detection run went, stage by stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionStats {
    /// The seed actually used, whether supplied or drawn.
    pub seed: u64,
    pub atoms: usize,
    pub grid_points: usize,
    pub sampling_mode: SamplingMode,
    pub grid_spacing: f64,
    pub cavity_points: usize,
    /// Cavity point count before subsampling, if subsampling happened.
    pub subsampled_from: Option<usize>,
    pub clusters: usize,
    pub discarded_groups: usize,
    pub scored_sites: usize,
    /// The acceptance threshold that produced `Detection::sites`.
    pub threshold: f64,
    pub threshold_relaxed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Accepted sites, sorted by descending druggability score.
    pub sites: Vec<BindingSite>,
    pub stats: DetectionStats,
}

/// Runs the whole cavity-detection pipeline on one protein.
///
/// # Arguments
///
/// * `protein` - The heavy atoms of the structure.
/// * `config` - Stage parameters and the optional random seed.
/// * `reporter` - Receives one phase per stage.
///
/// # Return
///
/// The accepted sites with run statistics. Finding no cavity is a successful, empty
/// result.
///
/// # Errors
///
/// Returns [`EngineError::Config`] for an invalid configuration,
/// [`EngineError::EmptyInput`] for a protein without atoms and
/// [`EngineError::DegenerateInput`] when the structure yields no sample points.
#[instrument(skip_all, name = "detection_workflow", fields(atoms = protein.len()))]
pub fn run(
    protein: &Protein,
    config: &DetectionConfig,
    reporter: &ProgressReporter,
) -> Result<Detection, EngineError> {
    config.validate()?;
    if protein.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    let seed = config.seed.unwrap_or_else(fresh_seed);
    info!(seed, "Starting binding-site detection.");

    let positions = protein.positions();

    // === Phase 1: Sample the space around the protein ===
    let sample_grid = reporter.phase("Generating Sample Grid", || {
        grid::generate(&positions, &config.grid, &mut seeded_rng(seed))
    })?;

    // === Phase 2: Keep points inside the cavity distance band ===
    let atom_index = AtomIndex::new(&positions);
    let cavity_points = reporter.phase("Filtering Cavity Points", || {
        find_cavity_points(&sample_grid.points, &atom_index, &config.cavity, reporter)
    });
    let cavity_point_count = cavity_points.len();

    // === Phase 3: Group cavity points into pockets ===
    let clustering = reporter.phase("Clustering Cavity Points", || {
        cluster_cavity_points(
            cavity_points,
            protein.len(),
            &config.clustering,
            &mut seeded_rng(seed.wrapping_add(1)),
        )
    });

    // === Phase 4: Score every retained cluster ===
    let scored = reporter.phase("Scoring Sites", || {
        reporter.report(Progress::TaskStart {
            total_steps: clustering.clusters.len() as u64,
        });

        #[cfg(not(feature = "parallel"))]
        let cluster_iter = clustering.clusters.iter().enumerate();

        #[cfg(feature = "parallel")]
        let cluster_iter = clustering.clusters.par_iter().enumerate();

        let sites: Vec<BindingSite> = cluster_iter
            .map(|(i, cluster)| {
                let site = score_cluster(i + 1, cluster, protein, &atom_index, &config.scoring);
                reporter.report(Progress::TaskAdvance { steps: 1 });
                site
            })
            .collect();

        reporter.report(Progress::TaskFinish);
        sites
    });
    let scored_sites = scored.len();

    // === Phase 5: Rank and apply the acceptance threshold ===
    let ranked = reporter.phase("Ranking Sites", || rank_sites(scored, &config.ranking));

    let stats = DetectionStats {
        seed,
        atoms: protein.len(),
        grid_points: sample_grid.points.len(),
        sampling_mode: sample_grid.mode,
        grid_spacing: sample_grid.spacing,
        cavity_points: cavity_point_count,
        subsampled_from: clustering.subsampled_from,
        clusters: clustering.clusters.len(),
        discarded_groups: clustering.discarded_groups,
        scored_sites,
        threshold: ranked.threshold,
        threshold_relaxed: ranked.relaxed,
    };

    info!(
        sites = ranked.sites.len(),
        threshold = ranked.threshold,
        "Detection complete."
    );
    Ok(Detection {
        sites: ranked.sites,
        stats,
    })
}

/// Detects binding sites, collapsing every failure into an empty list.
///
/// Failures are logged at `warn`; callers decide whether an empty list is an error.
pub fn detect_binding_sites(protein: &Protein, config: &DetectionConfig) -> Vec<BindingSite> {
    match run(protein, config, &ProgressReporter::new()) {
        Ok(detection) => detection.sites,
        Err(e) => {
            warn!(error = %e, "Binding-site detection failed, returning no sites.");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AtomRecord;
    use crate::engine::config::RankingConfig;
    use nalgebra::Point3;
    use std::sync::Mutex;

    fn tetrahedron() -> Protein {
        [
            [3.0, 3.0, 3.0],
            [3.0, -3.0, -3.0],
            [-3.0, 3.0, -3.0],
            [-3.0, -3.0, 3.0],
        ]
        .into_iter()
        .enumerate()
        .map(|(i, xyz)| {
            AtomRecord::new("A", i as isize + 1, "LEU", "CD1", "C", Point3::from(xyz)).unwrap()
        })
        .collect()
    }

    #[test]
    fn empty_protein_is_an_input_error() {
        let result = run(
            &Protein::default(),
            &DetectionConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::EmptyInput)));
        assert!(detect_binding_sites(&Protein::default(), &DetectionConfig::default()).is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_before_any_stage() {
        let config = DetectionConfig {
            ranking: RankingConfig {
                threshold: 2.0,
                relaxed_threshold: 0.25,
            },
            ..DetectionConfig::default()
        };
        let result = run(&tetrahedron(), &config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Config { .. })));
    }

    #[test]
    fn reports_each_stage_as_a_phase() {
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));
        let config = DetectionConfig {
            seed: Some(1),
            ..DetectionConfig::default()
        };
        run(&tetrahedron(), &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            phases.into_inner().unwrap(),
            vec![
                "Generating Sample Grid",
                "Filtering Cavity Points",
                "Clustering Cavity Points",
                "Scoring Sites",
                "Ranking Sites",
            ]
        );
    }

    #[test]
    fn stats_record_the_supplied_seed_and_stage_counts() {
        let config = DetectionConfig {
            seed: Some(99),
            ..DetectionConfig::default()
        };
        let detection = run(&tetrahedron(), &config, &ProgressReporter::new()).unwrap();
        let stats = &detection.stats;

        assert_eq!(stats.seed, 99);
        assert_eq!(stats.atoms, 4);
        assert_eq!(stats.sampling_mode, SamplingMode::Lattice);
        assert_eq!(stats.grid_spacing, 1.5);
        assert!(stats.cavity_points <= stats.grid_points);
        assert_eq!(stats.scored_sites, stats.clusters);
        assert!(detection.sites.len() <= stats.scored_sites);
        assert!(detection.sites.iter().all(|s| s.druggability_score >= stats.threshold));
    }

    #[test]
    fn flat_sheet_of_atoms_is_processed() {
        let sheet: Protein = (0..8)
            .flat_map(|j| (0..8).map(move |k| (j, k)))
            .enumerate()
            .map(|(i, (j, k))| {
                let position = Point3::new(1.0, j as f64 * 1.5, k as f64 * 1.5);
                AtomRecord::new("A", i as isize + 1, "ALA", "CA", "C", position).unwrap()
            })
            .collect();
        let config = DetectionConfig {
            seed: Some(5),
            ..DetectionConfig::default()
        };

        let detection = run(&sheet, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(detection.stats.atoms, 64);
        assert!(detection.stats.grid_points > 0);
        assert_eq!(detection.sites.len(), detect_binding_sites(&sheet, &config).len());
    }
}
