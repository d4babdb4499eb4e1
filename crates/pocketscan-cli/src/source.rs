use crate::cli::InputSource;
use crate::error::{CliError, Result};
use crate::fetch;
use pocketscan::core::io::pdb::PdbFile;
use pocketscan::core::io::traits::StructureFile;
use pocketscan::core::models::protein::Protein;
use tracing::info;

/// Loads the heavy atoms of the selected structure, from disk or from RCSB.
pub async fn load_protein(source: &InputSource) -> Result<Protein> {
    let protein = match (&source.input, &source.pdb_id) {
        (Some(path), _) => {
            info!("Reading structure from {:?}", path);
            PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?
        }
        (None, Some(pdb_id)) => {
            let content = fetch::download_pdb(pdb_id).await?;
            parse_pdb_text(pdb_id, &content)?
        }
        (None, None) => {
            return Err(CliError::Argument(
                "Either --input or --pdb-id must be provided.".to_string(),
            ));
        }
    };

    info!(atoms = protein.len(), "Structure loaded.");
    Ok(protein)
}

fn parse_pdb_text(label: &str, content: &str) -> Result<Protein> {
    PdbFile::read_from_str(content).map_err(|e| CliError::StructureParsing {
        label: label.to_string(),
        source: e.into(),
    })
}
