use crate::core::utils::identifiers::{
    is_charged_residue, is_hydrophobic_residue, is_polar_residue,
};
use serde::{Deserialize, Serialize};

/// The chemical class a residue contributes to a pocket's composition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueClass {
    // ALA, VAL, LEU, ILE, PHE, TRP, MET, PRO
    Hydrophobic,
    // SER, THR, ASN, GLN, TYR
    Polar,
    // ARG, LYS, ASP, GLU, HIS
    Charged,
    // Everything else (GLY, CYS, histidine variants, ...)
    Other,
}

impl ResidueClass {
    /// Classifies a residue by its three-letter name.
    ///
    /// Matching is case-sensitive after trimming surrounding whitespace.
    pub fn of(residue_name: &str) -> Self {
        let name = residue_name.trim();
        if is_hydrophobic_residue(name) {
            ResidueClass::Hydrophobic
        } else if is_polar_residue(name) {
            ResidueClass::Polar
        } else if is_charged_residue(name) {
            ResidueClass::Charged
        } else {
            ResidueClass::Other
        }
    }
}

/// A residue lining a binding site, with its closest approach to the site center.
///
/// Unique per (chain, residue number, residue name) within one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyResidue {
    pub chain: String,
    pub residue_number: isize,
    pub residue_name: String,
    pub distance: f64,
}

impl NearbyResidue {
    pub fn class(&self) -> ResidueClass {
        ResidueClass::of(&self.residue_name)
    }

    pub fn key(&self) -> (&str, isize, &str) {
        (&self.chain, self.residue_number, &self.residue_name)
    }
}
