use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be a positive finite number, got {value}")))
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be a non-negative finite number, got {value}")))
    }
}

fn require_unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, format!("must lie in [0, 1], got {value}")))
    }
}

fn require_nonzero(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(invalid(name, "must be greater than zero"))
    }
}

/// Lattice spacing and point cap for one protein-size tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTier {
    pub spacing: f64,
    pub max_points: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Padding added to every side of the atom bounding box.
    pub margin: f64,
    /// Proteins with strictly more atoms than this use the coarse tier.
    pub large_protein_atoms: usize,
    pub fine: GridTier,
    pub coarse: GridTier,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            margin: 5.0,
            large_protein_atoms: 5000,
            fine: GridTier {
                spacing: 1.5,
                max_points: 50_000,
            },
            coarse: GridTier {
                spacing: 2.0,
                max_points: 20_000,
            },
        }
    }
}

impl GridConfig {
    pub fn tier_for(&self, atom_count: usize) -> GridTier {
        if atom_count > self.large_protein_atoms {
            self.coarse
        } else {
            self.fine
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("grid.margin", self.margin)?;
        require_positive("grid.fine.spacing", self.fine.spacing)?;
        require_positive("grid.coarse.spacing", self.coarse.spacing)?;
        require_nonzero("grid.fine.max_points", self.fine.max_points)?;
        require_nonzero("grid.coarse.max_points", self.coarse.max_points)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CavityConfig {
    /// Inclusive lower bound on the nearest-atom distance of a cavity point.
    pub min_distance: f64,
    /// Inclusive upper bound on the nearest-atom distance of a cavity point.
    pub max_distance: f64,
    pub chunk_size: usize,
}

impl Default for CavityConfig {
    fn default() -> Self {
        Self {
            min_distance: 2.5,
            max_distance: 8.0,
            chunk_size: 10_000,
        }
    }
}

impl CavityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("cavity.min_distance", self.min_distance)?;
        require_positive("cavity.max_distance", self.max_distance)?;
        if self.max_distance < self.min_distance {
            return Err(invalid(
                "cavity.max_distance",
                format!(
                    "must not be below cavity.min_distance ({} < {})",
                    self.max_distance, self.min_distance
                ),
            ));
        }
        require_nonzero("cavity.chunk_size", self.chunk_size)
    }
}

/// Grouping radius and minimum retained cluster size for one protein-size tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterTier {
    pub radius: f64,
    pub min_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub small: ClusterTier,
    pub medium: ClusterTier,
    pub large: ClusterTier,
    /// Proteins with fewer atoms than this use the small tier.
    pub small_protein_atoms: usize,
    /// Proteins with fewer atoms than this (and not small) use the medium tier.
    pub medium_protein_atoms: usize,
    /// Cavity point counts strictly above this are subsampled first.
    pub subsample_trigger: usize,
    pub subsample_target: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            small: ClusterTier {
                radius: 3.5,
                min_size: 3,
            },
            medium: ClusterTier {
                radius: 4.0,
                min_size: 5,
            },
            large: ClusterTier {
                radius: 4.5,
                min_size: 8,
            },
            small_protein_atoms: 1000,
            medium_protein_atoms: 3000,
            subsample_trigger: 10_000,
            subsample_target: 5000,
        }
    }
}

impl ClusterConfig {
    pub fn tier_for(&self, atom_count: usize) -> ClusterTier {
        if atom_count < self.small_protein_atoms {
            self.small
        } else if atom_count < self.medium_protein_atoms {
            self.medium
        } else {
            self.large
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, tier) in [
            ("clustering.small", &self.small),
            ("clustering.medium", &self.medium),
            ("clustering.large", &self.large),
        ] {
            require_positive(name, tier.radius)?;
            require_nonzero(name, tier.min_size)?;
        }
        if self.medium_protein_atoms < self.small_protein_atoms {
            return Err(invalid(
                "clustering.medium_protein_atoms",
                "must not be below clustering.small_protein_atoms",
            ));
        }
        require_nonzero("clustering.subsample_target", self.subsample_target)?;
        if self.subsample_target > self.subsample_trigger {
            return Err(invalid(
                "clustering.subsample_target",
                format!(
                    "must not exceed clustering.subsample_trigger ({} > {})",
                    self.subsample_target, self.subsample_trigger
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Volume attributed to each cavity point (1.5^3).
    pub unit_cell_volume: f64,
    /// Atoms within this distance of a site center count as nearby residues.
    pub probe_radius: f64,
    pub size_weight: f64,
    pub composition_weight: f64,
    pub depth_weight: f64,
    pub max_score: f64,
    /// Score assigned when a site has no nearby residues or cannot be scored.
    pub minimal_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            unit_cell_volume: 3.375,
            probe_radius: 6.0,
            size_weight: 0.4,
            composition_weight: 0.4,
            depth_weight: 0.2,
            max_score: 1.0,
            minimal_score: 0.1,
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_positive("scoring.unit_cell_volume", self.unit_cell_volume)?;
        require_positive("scoring.probe_radius", self.probe_radius)?;
        require_non_negative("scoring.size_weight", self.size_weight)?;
        require_non_negative("scoring.composition_weight", self.composition_weight)?;
        require_non_negative("scoring.depth_weight", self.depth_weight)?;
        require_unit_interval("scoring.max_score", self.max_score)?;
        require_unit_interval("scoring.minimal_score", self.minimal_score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub threshold: f64,
    /// Used only when nothing clears `threshold`.
    pub relaxed_threshold: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            relaxed_threshold: 0.25,
        }
    }
}

impl RankingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_unit_interval("ranking.threshold", self.threshold)?;
        require_unit_interval("ranking.relaxed_threshold", self.relaxed_threshold)?;
        if self.relaxed_threshold > self.threshold {
            return Err(invalid(
                "ranking.relaxed_threshold",
                format!(
                    "must not exceed ranking.threshold ({} > {})",
                    self.relaxed_threshold, self.threshold
                ),
            ));
        }
        Ok(())
    }
}

/// Complete, immutable parameter set of one detection run.
///
/// `Default` reproduces the reference constants of every stage. `seed` drives both
/// randomized steps (grid fallback sampling and cavity-point subsampling); `None` means a
/// fresh seed is drawn once when the run starts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectionConfig {
    pub grid: GridConfig,
    pub cavity: CavityConfig,
    pub clustering: ClusterConfig,
    pub scoring: ScoringConfig,
    pub ranking: RankingConfig,
    pub seed: Option<u64>,
}

impl DetectionConfig {
    pub fn builder() -> DetectionConfigBuilder {
        DetectionConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.cavity.validate()?;
        self.clustering.validate()?;
        self.scoring.validate()?;
        self.ranking.validate()
    }
}

#[derive(Default)]
pub struct DetectionConfigBuilder {
    grid: Option<GridConfig>,
    cavity: Option<CavityConfig>,
    clustering: Option<ClusterConfig>,
    scoring: Option<ScoringConfig>,
    ranking: Option<RankingConfig>,
    seed: Option<u64>,
    margin: Option<f64>,
    min_distance: Option<f64>,
    max_distance: Option<f64>,
    chunk_size: Option<usize>,
    probe_radius: Option<f64>,
    threshold: Option<f64>,
    relaxed_threshold: Option<f64>,
}

impl DetectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(mut self, grid: GridConfig) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn cavity(mut self, cavity: CavityConfig) -> Self {
        self.cavity = Some(cavity);
        self
    }

    pub fn clustering(mut self, clustering: ClusterConfig) -> Self {
        self.clustering = Some(clustering);
        self
    }

    pub fn scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = Some(scoring);
        self
    }

    pub fn ranking(mut self, ranking: RankingConfig) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn cavity_distance_range(mut self, min_distance: f64, max_distance: f64) -> Self {
        self.min_distance = Some(min_distance);
        self.max_distance = Some(max_distance);
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn relaxed_threshold(mut self, threshold: f64) -> Self {
        self.relaxed_threshold = Some(threshold);
        self
    }

    /// Assembles the configuration. Sections that were not supplied take their defaults;
    /// individual knobs override the corresponding field of their section.
    pub fn build(self) -> Result<DetectionConfig, ConfigError> {
        let mut grid = self.grid.unwrap_or_default();
        if let Some(margin) = self.margin {
            grid.margin = margin;
        }

        let mut cavity = self.cavity.unwrap_or_default();
        if let Some(min_distance) = self.min_distance {
            cavity.min_distance = min_distance;
        }
        if let Some(max_distance) = self.max_distance {
            cavity.max_distance = max_distance;
        }
        if let Some(chunk_size) = self.chunk_size {
            cavity.chunk_size = chunk_size;
        }

        let mut scoring = self.scoring.unwrap_or_default();
        if let Some(probe_radius) = self.probe_radius {
            scoring.probe_radius = probe_radius;
        }

        let mut ranking = self.ranking.unwrap_or_default();
        if let Some(threshold) = self.threshold {
            ranking.threshold = threshold;
        }
        if let Some(relaxed_threshold) = self.relaxed_threshold {
            ranking.relaxed_threshold = relaxed_threshold;
        }

        let config = DetectionConfig {
            grid,
            cavity,
            clustering: self.clustering.unwrap_or_default(),
            scoring,
            ranking,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
