//! # Core Module
//!
//! The foundation of pocketscan: the data models every pipeline stage consumes or
//! produces, the lookup tables used to classify residues, and small geometric utilities.
//!
//! ## Architecture
//!
//! - **Structural Records** ([`models`]) - Atoms, proteins, nearby residues and binding sites
//! - **File I/O** ([`io`]) - Fixed-column PDB reading into heavy-atom records
//! - **Utilities** ([`utils`]) - Bounding boxes, centroids, spatial indexing and residue tables
//!
//! Nothing in this module holds mutable state between calls. Records are validated when
//! they are constructed, so later stages can rely on finite coordinates and non-empty
//! identifiers without re-checking.

pub mod io;
pub mod models;
pub mod utils;
