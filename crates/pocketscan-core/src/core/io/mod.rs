//! Reading atomic-coordinate files into [`Protein`](crate::core::models::protein::Protein)
//! values.
//!
//! The detection pipeline never touches the filesystem itself; these readers play the
//! structure-acquisition role in front of it. Only the fixed-column PDB format is
//! supported.

pub mod pdb;
pub mod traits;
