// src/lib.rs

//! Bispectrum & powerspectrum descriptors of periodic crystals, evaluated on
//! real-space grid points by an external numerical kernel.

pub mod config;
pub mod features;
pub mod io;
pub mod model;
pub mod physics;
pub mod utils;

pub use config::FeatureConfig;
pub use features::{bispectrum, FeatureAdapter, FeatureForm, FeaturesError, Kernel, KernelError, RowMajor};
pub use model::{Crystal, Structure};
