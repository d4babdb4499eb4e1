//! # pocketscan Core Library
//!
//! A library for locating candidate drug-binding cavities on a protein structure and
//! ranking them by a heuristic druggability score.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that the geometric pipeline
//! stays pure, deterministic under a seed, and independently testable.
//!
//! - **[`core`]: The Foundation.** Immutable data models (`AtomRecord`, `Protein`,
//!   `BindingSite`), residue classification tables, geometry helpers and the PDB reader
//!   that acts as the structure-acquisition collaborator.
//!
//! - **[`engine`]: The Logic Core.** The five pipeline stages (grid generation, cavity
//!   filtering, seed-centered clustering, site scoring and ranking), together with the
//!   immutable `DetectionConfig`, error types, progress reporting and seeded sampling.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie the stages
//!   together: binding-site detection and whole-structure summaries.

pub mod core;
pub mod engine;
pub mod workflows;
