// src/physics/mod.rs
pub mod grid;

pub use grid::{divisions_for_spacing, uniform_grid};
