use crate::error::{CliError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

const RCSB_DOWNLOAD_BASE: &str = "https://files.rcsb.org/download";

/// Builds the RCSB download URL for an accession code. Codes are upper-cased; only ASCII
/// letters, digits and underscores (extended `PDB_` codes) are accepted.
pub fn rcsb_url(pdb_id: &str) -> Result<String> {
    let id = pdb_id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CliError::Argument(format!(
            "'{}' is not a valid PDB accession code",
            pdb_id
        )));
    }
    Ok(format!("{}/{}.pdb", RCSB_DOWNLOAD_BASE, id.to_ascii_uppercase()))
}

/// Downloads the PDB-format text of an entry. Non-success HTTP statuses are errors.
pub async fn download_pdb(pdb_id: &str) -> Result<String> {
    let url = rcsb_url(pdb_id)?;
    info!(url = %url, "Downloading structure from RCSB.");

    let client = reqwest::Client::new();
    let mut response = client.get(&url).send().await?.error_for_status()?;

    let pb = match response.content_length() {
        Some(total) => ProgressBar::new(total).with_style(
            ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        ),
        None => ProgressBar::new_spinner(),
    };
    pb.set_message(format!("Downloading {}", pdb_id.trim().to_ascii_uppercase()));

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();
    debug!(bytes = body.len(), "Download complete.");

    String::from_utf8(body).map_err(|e| {
        CliError::Other(anyhow::anyhow!(
            "Downloaded entry {} is not valid UTF-8: {}",
            pdb_id,
            e
        ))
    })
}
