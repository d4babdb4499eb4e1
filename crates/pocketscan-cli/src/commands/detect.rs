use crate::cli::DetectArgs;
use crate::config::PartialDetectionConfig;
use crate::error::{CliError, Result};
use crate::output;
use crate::source;
use crate::utils::progress::CliProgressHandler;
use pocketscan::core::models::site::BindingSite;
use pocketscan::engine::error::EngineError;
use pocketscan::engine::grid::SamplingMode;
use pocketscan::engine::progress::ProgressReporter;
use pocketscan::workflows::detect::{self, DetectionStats};
use tracing::{info, warn};

pub async fn run(args: DetectArgs) -> Result<()> {
    info!("Starting 'detect' command...");

    let partial = match &args.config {
        Some(path) => PartialDetectionConfig::from_file(path)?,
        None => PartialDetectionConfig::default(),
    };
    let config = partial.merge_with_cli(&args)?;
    info!("Configuration successfully loaded and merged.");

    let protein = source::load_protein(&args.source).await?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Running binding-site detection...");
    let result = tokio::task::block_in_place(|| detect::run(&protein, &config, &reporter));

    let sites: Vec<BindingSite> = match result {
        Ok(detection) => {
            report_stats(&detection.stats);
            detection.sites
        }
        Err(EngineError::EmptyInput) => {
            warn!("The structure contains no heavy atoms of standard residues.");
            Vec::new()
        }
        Err(e) => return Err(CliError::Engine(e)),
    };

    if sites.is_empty() {
        warn!("No binding site passed the acceptance threshold.");
        eprintln!("⚠️  No binding sites detected.");
    } else {
        info!(sites = sites.len(), "Writing ranked binding sites.");
    }

    let writer = output::open_output(args.output.as_deref())?;
    output::write_sites(&sites, args.format, writer)?;

    if let Some(path) = &args.output {
        println!("Wrote {} site(s) to {:?}", sites.len(), path);
    }
    Ok(())
}

fn report_stats(stats: &DetectionStats) {
    if let SamplingMode::RandomFallback { lattice_points } = stats.sampling_mode {
        warn!(
            lattice_points,
            grid_points = stats.grid_points,
            "Lattice exceeded the point cap; sampled uniformly instead."
        );
    }
    if stats.threshold_relaxed {
        warn!(
            threshold = stats.threshold,
            "No site reached the primary threshold; accepted sites under the relaxed one."
        );
    }
    info!(
        seed = stats.seed,
        grid_points = stats.grid_points,
        cavity_points = stats.cavity_points,
        clusters = stats.clusters,
        scored_sites = stats.scored_sites,
        accepted_threshold = stats.threshold,
        "Detection finished."
    );
}
