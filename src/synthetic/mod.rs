//! Synthetic orientation data

/// Seeded Voronoi microstructure generator
pub mod microstructure;

pub use microstructure::{Microstructure, MicrostructureParams, generate};
