//! Helpers shared by the pipeline stages: seeded random sampling of boxes and index sets.

pub mod sampling;
