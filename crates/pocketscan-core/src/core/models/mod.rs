//! # Core Models Module
//!
//! Fixed-field records describing the input structure and the detected binding sites.
//!
//! ## Key Components
//!
//! - [`atom`] - A single heavy-atom record with residue metadata and coordinates
//! - [`protein`] - The ordered atom list for one structure, the pipeline's only input
//! - [`residue`] - Residue classes and the per-residue proximity record of a site
//! - [`site`] - The scored binding site emitted by the pipeline
//!
//! ## Usage
//!
//! ```ignore
//! use pocketscan::core::models::{atom::AtomRecord, protein::Protein};
//! use nalgebra::Point3;
//!
//! let atom = AtomRecord::new("A", 12, "LEU", "CD1", "C", Point3::new(1.0, 2.0, 3.0))?;
//! let protein = Protein::new(vec![atom]);
//! ```

pub mod atom;
pub mod protein;
pub mod residue;
pub mod site;
