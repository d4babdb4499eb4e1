use phf::{Set, phf_set};

static HYDROPHOBIC_RESIDUES: Set<&'static str> = phf_set! {
    "ALA", "VAL", "LEU", "ILE", "PHE", "TRP", "MET", "PRO",
};

static POLAR_RESIDUES: Set<&'static str> = phf_set! {
    "SER", "THR", "ASN", "GLN", "TYR",
};

static CHARGED_RESIDUES: Set<&'static str> = phf_set! {
    "ARG", "LYS", "ASP", "GLU", "HIS",
};

static AMINO_ACID_RESIDUES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "HID", "HIE", "HIP", "HSD", "HSE", "HSP", "MSE", "SEC", "PYL",
};

pub fn is_hydrophobic_residue(residue_name: &str) -> bool {
    HYDROPHOBIC_RESIDUES.contains(residue_name.trim())
}

pub fn is_polar_residue(residue_name: &str) -> bool {
    POLAR_RESIDUES.contains(residue_name.trim())
}

pub fn is_charged_residue(residue_name: &str) -> bool {
    CHARGED_RESIDUES.contains(residue_name.trim())
}

pub fn is_amino_acid(residue_name: &str) -> bool {
    AMINO_ACID_RESIDUES.contains(residue_name.trim())
}

/// Returns `false` for hydrogen and deuterium element symbols.
pub fn is_heavy_element(element: &str) -> bool {
    !matches!(element.trim().to_ascii_uppercase().as_str(), "H" | "D")
}

/// Guesses an element symbol from a PDB atom name when the element column is blank.
///
/// Leading digits (as in "1HB2") are skipped and the first letter is taken.
pub fn infer_element(atom_name: &str) -> Option<String> {
    atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
}
