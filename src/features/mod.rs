// src/features/mod.rs

//! Grid-point bispectrum/powerspectrum features.
//!
//! [`adapter::bispectrum`] marshals caller arrays into the kernel's layout,
//! lets a [`kernel::Kernel`] fill the output and hands the result back one
//! row per grid point.

pub mod adapter;
pub mod error;
pub mod form;
pub mod kernel;
pub mod layout;

pub use adapter::{bispectrum, FeatureAdapter};
pub use error::FeaturesError;
pub use form::FeatureForm;
pub use kernel::{Kernel, KernelError, KernelInput};
pub use layout::{from_kernel_layout, rows_to_kernel_layout, to_kernel_layout, RowMajor};
