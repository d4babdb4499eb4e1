//! # Engine Module
//!
//! The cavity-detection pipeline. Each stage is a stateless function over immutable
//! inputs, so a run owns everything it allocates and concurrent runs need no
//! coordination.
//!
//! ## Stages
//!
//! 1. [`grid`] - Lattice (or seeded random fallback) sampling of the padded atom bounding box
//! 2. [`cavity`] - Nearest-atom distance band filter, chunked and optionally parallel
//! 3. [`clustering`] - Single-pass seed-centered grouping with size tiers and subsampling
//! 4. [`scoring`] - Geometric and chemical descriptors plus the druggability score
//! 5. [`ranking`] - Descending sort with an adaptive acceptance threshold
//!
//! ## Supporting Modules
//!
//! - **Configuration** ([`config`]) - `DetectionConfig`, its sections and builder
//! - **Error Handling** ([`error`]) - `EngineError`
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends

pub mod cavity;
pub mod clustering;
pub mod config;
pub mod error;
pub mod grid;
pub mod progress;
pub mod ranking;
pub mod scoring;
pub(crate) mod utils;
