use crate::cli::DetectArgs;
use crate::error::{CliError, Result};
use pocketscan::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialGridTier {
    spacing: Option<f64>,
    max_points: Option<usize>,
}

impl PartialGridTier {
    fn apply_to(self, tier: &mut core_config::GridTier) {
        if let Some(spacing) = self.spacing {
            tier.spacing = spacing;
        }
        if let Some(max_points) = self.max_points {
            tier.max_points = max_points;
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialGridConfig {
    margin: Option<f64>,
    large_protein_atoms: Option<usize>,
    fine: Option<PartialGridTier>,
    coarse: Option<PartialGridTier>,
}

impl PartialGridConfig {
    fn into_core(self) -> core_config::GridConfig {
        let mut grid = core_config::GridConfig::default();
        if let Some(margin) = self.margin {
            grid.margin = margin;
        }
        if let Some(atoms) = self.large_protein_atoms {
            grid.large_protein_atoms = atoms;
        }
        if let Some(fine) = self.fine {
            fine.apply_to(&mut grid.fine);
        }
        if let Some(coarse) = self.coarse {
            coarse.apply_to(&mut grid.coarse);
        }
        grid
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialCavityConfig {
    min_distance: Option<f64>,
    max_distance: Option<f64>,
    chunk_size: Option<usize>,
}

impl PartialCavityConfig {
    fn into_core(self) -> core_config::CavityConfig {
        let defaults = core_config::CavityConfig::default();
        core_config::CavityConfig {
            min_distance: self.min_distance.unwrap_or(defaults.min_distance),
            max_distance: self.max_distance.unwrap_or(defaults.max_distance),
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialClusterTier {
    radius: Option<f64>,
    min_size: Option<usize>,
}

impl PartialClusterTier {
    fn apply_to(self, tier: &mut core_config::ClusterTier) {
        if let Some(radius) = self.radius {
            tier.radius = radius;
        }
        if let Some(min_size) = self.min_size {
            tier.min_size = min_size;
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialClusterConfig {
    small: Option<PartialClusterTier>,
    medium: Option<PartialClusterTier>,
    large: Option<PartialClusterTier>,
    small_protein_atoms: Option<usize>,
    medium_protein_atoms: Option<usize>,
    subsample_trigger: Option<usize>,
    subsample_target: Option<usize>,
}

impl PartialClusterConfig {
    fn into_core(self) -> core_config::ClusterConfig {
        let mut clustering = core_config::ClusterConfig::default();
        for (partial, tier) in [
            (self.small, &mut clustering.small),
            (self.medium, &mut clustering.medium),
            (self.large, &mut clustering.large),
        ] {
            if let Some(partial) = partial {
                partial.apply_to(tier);
            }
        }
        if let Some(atoms) = self.small_protein_atoms {
            clustering.small_protein_atoms = atoms;
        }
        if let Some(atoms) = self.medium_protein_atoms {
            clustering.medium_protein_atoms = atoms;
        }
        if let Some(trigger) = self.subsample_trigger {
            clustering.subsample_trigger = trigger;
        }
        if let Some(target) = self.subsample_target {
            clustering.subsample_target = target;
        }
        clustering
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialScoringConfig {
    unit_cell_volume: Option<f64>,
    probe_radius: Option<f64>,
    size_weight: Option<f64>,
    composition_weight: Option<f64>,
    depth_weight: Option<f64>,
    max_score: Option<f64>,
    minimal_score: Option<f64>,
}

impl PartialScoringConfig {
    fn into_core(self) -> core_config::ScoringConfig {
        let defaults = core_config::ScoringConfig::default();
        core_config::ScoringConfig {
            unit_cell_volume: self.unit_cell_volume.unwrap_or(defaults.unit_cell_volume),
            probe_radius: self.probe_radius.unwrap_or(defaults.probe_radius),
            size_weight: self.size_weight.unwrap_or(defaults.size_weight),
            composition_weight: self.composition_weight.unwrap_or(defaults.composition_weight),
            depth_weight: self.depth_weight.unwrap_or(defaults.depth_weight),
            max_score: self.max_score.unwrap_or(defaults.max_score),
            minimal_score: self.minimal_score.unwrap_or(defaults.minimal_score),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialRankingConfig {
    threshold: Option<f64>,
    relaxed_threshold: Option<f64>,
}

impl PartialRankingConfig {
    fn into_core(self) -> core_config::RankingConfig {
        let defaults = core_config::RankingConfig::default();
        core_config::RankingConfig {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            relaxed_threshold: self.relaxed_threshold.unwrap_or(defaults.relaxed_threshold),
        }
    }
}

/// The detection settings as read from a TOML file. Every key is optional; missing keys
/// fall back to the library defaults when merged.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialDetectionConfig {
    seed: Option<u64>,
    grid: Option<PartialGridConfig>,
    cavity: Option<PartialCavityConfig>,
    clustering: Option<PartialClusterConfig>,
    scoring: Option<PartialScoringConfig>,
    ranking: Option<PartialRankingConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialDetectionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Produces the final configuration. Precedence, highest first: `-S` pairs and
    /// dedicated flags (`--seed`, `--threshold`), the config file, library defaults.
    pub fn merge_with_cli(mut self, args: &DetectArgs) -> Result<core_config::DetectionConfig> {
        self.apply_set_values(&args.set_values)?;

        let mut builder = core_config::DetectionConfig::builder()
            .grid(self.grid.unwrap_or_default().into_core())
            .cavity(self.cavity.unwrap_or_default().into_core())
            .clustering(self.clustering.unwrap_or_default().into_core())
            .scoring(self.scoring.unwrap_or_default().into_core())
            .ranking(self.ranking.unwrap_or_default().into_core());

        if let Some(seed) = args.seed.or(self.seed) {
            builder = builder.seed(seed);
        }
        if let Some(threshold) = args.threshold {
            builder = builder.threshold(threshold);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
            if parts.len() != 2 {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            }
            let key = parts[0].trim();
            let value = parts[1];

            match key {
                "seed" => self.seed = Some(parse_value(key, value, "integer")?),
                "grid.margin" => {
                    self.grid.get_or_insert_with(Default::default).margin =
                        Some(parse_value(key, value, "float")?);
                }
                "grid.large-protein-atoms" => {
                    self.grid.get_or_insert_with(Default::default).large_protein_atoms =
                        Some(parse_value(key, value, "integer")?);
                }
                "grid.fine.spacing" => {
                    self.grid
                        .get_or_insert_with(Default::default)
                        .fine
                        .get_or_insert_with(Default::default)
                        .spacing = Some(parse_value(key, value, "float")?);
                }
                "grid.fine.max-points" => {
                    self.grid
                        .get_or_insert_with(Default::default)
                        .fine
                        .get_or_insert_with(Default::default)
                        .max_points = Some(parse_value(key, value, "integer")?);
                }
                "grid.coarse.spacing" => {
                    self.grid
                        .get_or_insert_with(Default::default)
                        .coarse
                        .get_or_insert_with(Default::default)
                        .spacing = Some(parse_value(key, value, "float")?);
                }
                "grid.coarse.max-points" => {
                    self.grid
                        .get_or_insert_with(Default::default)
                        .coarse
                        .get_or_insert_with(Default::default)
                        .max_points = Some(parse_value(key, value, "integer")?);
                }
                "cavity.min-distance" => {
                    self.cavity.get_or_insert_with(Default::default).min_distance =
                        Some(parse_value(key, value, "float")?);
                }
                "cavity.max-distance" => {
                    self.cavity.get_or_insert_with(Default::default).max_distance =
                        Some(parse_value(key, value, "float")?);
                }
                "cavity.chunk-size" => {
                    self.cavity.get_or_insert_with(Default::default).chunk_size =
                        Some(parse_value(key, value, "integer")?);
                }
                "clustering.subsample-trigger" => {
                    self.clustering
                        .get_or_insert_with(Default::default)
                        .subsample_trigger = Some(parse_value(key, value, "integer")?);
                }
                "clustering.subsample-target" => {
                    self.clustering
                        .get_or_insert_with(Default::default)
                        .subsample_target = Some(parse_value(key, value, "integer")?);
                }
                "scoring.probe-radius" => {
                    self.scoring.get_or_insert_with(Default::default).probe_radius =
                        Some(parse_value(key, value, "float")?);
                }
                "scoring.size-weight" => {
                    self.scoring.get_or_insert_with(Default::default).size_weight =
                        Some(parse_value(key, value, "float")?);
                }
                "scoring.composition-weight" => {
                    self.scoring
                        .get_or_insert_with(Default::default)
                        .composition_weight = Some(parse_value(key, value, "float")?);
                }
                "scoring.depth-weight" => {
                    self.scoring.get_or_insert_with(Default::default).depth_weight =
                        Some(parse_value(key, value, "float")?);
                }
                "ranking.threshold" => {
                    self.ranking.get_or_insert_with(Default::default).threshold =
                        Some(parse_value(key, value, "float")?);
                }
                "ranking.relaxed-threshold" => {
                    self.ranking
                        .get_or_insert_with(Default::default)
                        .relaxed_threshold = Some(parse_value(key, value, "float")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
