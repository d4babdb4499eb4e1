//! # Workflows Module
//!
//! End-to-end entry points of the library.
//!
//! - **Detection** ([`detect`]) - Runs grid generation, cavity filtering, clustering,
//!   scoring and ranking on a protein, either reporting failures explicitly
//!   ([`detect::run`]) or collapsing them to an empty site list
//!   ([`detect::detect_binding_sites`]).
//! - **Summary** ([`summarize`]) - Chain, residue and composition descriptors of a
//!   structure, independent of any cavity search.

pub mod detect;
pub mod summarize;
