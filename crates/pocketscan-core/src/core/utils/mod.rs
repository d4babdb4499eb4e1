//! Geometric helpers, the atom spatial index and residue lookup tables shared by the
//! pipeline stages and the PDB reader.

pub mod geometry;
pub mod identifiers;
pub mod spatial;
