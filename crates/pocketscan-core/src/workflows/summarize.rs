use crate::core::models::protein::Protein;
use crate::core::models::site::point_xyz;
use crate::core::utils::geometry::centroid;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{info, instrument};

/// Average mass of an amino-acid residue, in Daltons.
pub const AVERAGE_RESIDUE_MASS: f64 = 110.0;
/// Heavy atoms expected per residue when estimating completeness.
const EXPECTED_ATOMS_PER_RESIDUE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProteinClass {
    Peptide,
    SmallProtein,
    MediumProtein,
    LargeProtein,
}

impl ProteinClass {
    pub fn from_residue_count(residues: usize) -> Self {
        match residues {
            0..50 => ProteinClass::Peptide,
            50..150 => ProteinClass::SmallProtein,
            150..500 => ProteinClass::MediumProtein,
            _ => ProteinClass::LargeProtein,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub chain_id: String,
    pub num_residues: usize,
    pub num_atoms: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSummary {
    pub num_chains: usize,
    pub num_residues: usize,
    pub num_atoms: usize,
    #[serde(rename = "chain_information")]
    pub chains: Vec<ChainSummary>,
    pub molecular_weight: f64,
    pub amino_acid_composition: BTreeMap<String, usize>,
    #[serde(with = "point_xyz")]
    pub center_of_mass: Point3<f64>,
    #[serde(rename = "protein_classification")]
    pub classification: ProteinClass,
    /// Observed heavy atoms over the expected count, capped at 1.
    pub completeness: f64,
}

/// Computes whole-structure descriptors of a protein.
#[instrument(skip_all, name = "summarize_workflow", fields(atoms = protein.len()))]
pub fn run(protein: &Protein) -> StructureSummary {
    let mut chains: Vec<ChainSummary> = Vec::new();
    let mut seen_residues: HashSet<(&str, isize, &str)> = HashSet::new();
    let mut composition: BTreeMap<String, usize> = BTreeMap::new();

    for atom in protein {
        let chain_idx = match chains.iter().position(|c| c.chain_id == atom.chain_id()) {
            Some(idx) => idx,
            None => {
                chains.push(ChainSummary {
                    chain_id: atom.chain_id().to_string(),
                    num_residues: 0,
                    num_atoms: 0,
                });
                chains.len() - 1
            }
        };
        let chain = &mut chains[chain_idx];
        chain.num_atoms += 1;

        if seen_residues.insert(atom.residue_key()) {
            chain.num_residues += 1;
            *composition.entry(atom.residue_name().to_string()).or_default() += 1;
        }
    }

    let num_residues = seen_residues.len();
    let num_atoms = protein.len();
    let completeness = if num_residues == 0 {
        0.0
    } else {
        (num_atoms as f64 / (num_residues as f64 * EXPECTED_ATOMS_PER_RESIDUE)).min(1.0)
    };

    let summary = StructureSummary {
        num_chains: chains.len(),
        num_residues,
        num_atoms,
        chains,
        molecular_weight: num_residues as f64 * AVERAGE_RESIDUE_MASS,
        amino_acid_composition: composition,
        center_of_mass: centroid(&protein.positions()).unwrap_or_else(Point3::origin),
        classification: ProteinClass::from_residue_count(num_residues),
        completeness,
    };
    info!(
        chains = summary.num_chains,
        residues = summary.num_residues,
        "Structure summarized."
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AtomRecord;

    fn atom(chain: &str, number: isize, name: &str, xyz: [f64; 3]) -> AtomRecord {
        AtomRecord::new(chain, number, name, "CA", "C", Point3::from(xyz)).unwrap()
    }

    #[test]
    fn counts_chains_residues_and_atoms_in_first_seen_order() {
        let protein = Protein::new(vec![
            atom("B", 1, "GLY", [0.0, 0.0, 0.0]),
            atom("B", 1, "GLY", [1.0, 0.0, 0.0]),
            atom("A", 1, "ALA", [2.0, 0.0, 0.0]),
            atom("B", 2, "LEU", [3.0, 0.0, 0.0]),
        ]);
        let summary = run(&protein);

        assert_eq!(summary.num_chains, 2);
        assert_eq!(summary.num_residues, 3);
        assert_eq!(summary.num_atoms, 4);
        assert_eq!(
            summary.chains,
            vec![
                ChainSummary {
                    chain_id: "B".into(),
                    num_residues: 2,
                    num_atoms: 3
                },
                ChainSummary {
                    chain_id: "A".into(),
                    num_residues: 1,
                    num_atoms: 1
                },
            ]
        );
        assert_eq!(summary.molecular_weight, 330.0);
        assert_eq!(summary.center_of_mass, Point3::new(1.5, 0.0, 0.0));
        assert_eq!(summary.classification, ProteinClass::Peptide);
        assert!((summary.completeness - 4.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn composition_counts_residues_not_atoms() {
        let protein = Protein::new(vec![
            atom("A", 1, "GLY", [0.0, 0.0, 0.0]),
            atom("A", 1, "GLY", [0.0, 1.0, 0.0]),
            atom("A", 2, "GLY", [0.0, 2.0, 0.0]),
            atom("A", 3, "SER", [0.0, 3.0, 0.0]),
        ]);
        let summary = run(&protein);
        let expected: BTreeMap<String, usize> =
            [("GLY".to_string(), 2), ("SER".to_string(), 1)].into_iter().collect();
        assert_eq!(summary.amino_acid_composition, expected);
    }

    #[test]
    fn empty_protein_summarizes_to_zeroes() {
        let summary = run(&Protein::default());
        assert_eq!(summary.num_atoms, 0);
        assert_eq!(summary.num_residues, 0);
        assert_eq!(summary.center_of_mass, Point3::origin());
        assert_eq!(summary.completeness, 0.0);
        assert!(summary.chains.is_empty());
    }

    #[test]
    fn completeness_is_capped_at_one() {
        let protein: Protein = (0..10)
            .map(|i| atom("A", 1, "TRP", [i as f64, 0.0, 0.0]))
            .collect();
        assert_eq!(run(&protein).completeness, 1.0);
    }

    #[test]
    fn classification_breakpoints() {
        assert_eq!(ProteinClass::from_residue_count(49), ProteinClass::Peptide);
        assert_eq!(ProteinClass::from_residue_count(50), ProteinClass::SmallProtein);
        assert_eq!(ProteinClass::from_residue_count(149), ProteinClass::SmallProtein);
        assert_eq!(ProteinClass::from_residue_count(150), ProteinClass::MediumProtein);
        assert_eq!(ProteinClass::from_residue_count(500), ProteinClass::LargeProtein);
    }

    #[test]
    fn summary_serializes_with_output_field_names() {
        let summary = run(&Protein::new(vec![atom("A", 1, "GLY", [0.0, 0.0, 0.0])]));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["protein_classification"], serde_json::json!("peptide"));
        assert_eq!(json["chain_information"][0]["chain_id"], serde_json::json!("A"));
        assert_eq!(
            json["center_of_mass"],
            serde_json::json!({"x": 0.0, "y": 0.0, "z": 0.0})
        );

        let back: StructureSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }
}
