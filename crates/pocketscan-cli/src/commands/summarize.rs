use crate::cli::SummarizeArgs;
use crate::error::Result;
use crate::output;
use crate::source;
use pocketscan::workflows::summarize;
use tracing::{info, warn};

pub async fn run(args: SummarizeArgs) -> Result<()> {
    info!("Starting 'summarize' command...");

    let protein = source::load_protein(&args.source).await?;
    if protein.is_empty() {
        warn!("The structure contains no heavy atoms of standard residues.");
    }

    let summary = summarize::run(&protein);
    info!(
        chains = summary.num_chains,
        residues = summary.num_residues,
        "Structure summarized."
    );

    let writer = output::open_output(args.output.as_deref())?;
    output::write_json(&summary, writer)
}
