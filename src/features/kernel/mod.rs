// src/features/kernel/mod.rs

//! Narrow interface to the numerical backend.
//!
//! A kernel answers two questions: how many features a given
//! `(lmax, nmax, form)` produces, and what those features are for a set of
//! grid points. All arrays crossing this interface are in kernel layout
//! (column-major, coordinate index fastest), see [`crate::features::layout`].

#[cfg(feature = "fortran")]
pub mod fortran;

#[cfg(feature = "fortran")]
pub use fortran::FortranKernel;

use crate::features::form::FeatureForm;
use nalgebra::DMatrix;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Backend not compiled in or not loadable
    Unavailable(String),
    /// Failure reported from inside the backend
    Fault(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KernelError::ShapeMismatch { what, expected, actual } => write!(
                f,
                "{} has shape {}x{}, expected {}x{}",
                what, actual.0, actual.1, expected.0, expected.1
            ),
            KernelError::Unavailable(msg) => write!(f, "Kernel unavailable: {}", msg),
            KernelError::Fault(msg) => write!(f, "Kernel fault: {}", msg),
        }
    }
}

impl std::error::Error for KernelError {}

/// Arguments of a single compute call, already in kernel layout.
#[derive(Clone, Copy, Debug)]
pub struct KernelInput<'a> {
    /// 3x3, column i = lattice vector i
    pub cell: &'a DMatrix<f64>,
    /// 3xN fractional coordinates
    pub atom_positions: &'a DMatrix<f64>,
    /// 3xG cartesian coordinates
    pub grid_coordinates: &'a DMatrix<f64>,
    pub rcut: f64,
    pub parallel: bool,
    pub lmax: u32,
    pub nmax: u32,
    pub form: FeatureForm,
}

pub trait Kernel {
    /// Number of features per grid point. Pure lookup.
    fn feature_count(&self, lmax: u32, nmax: u32, form: FeatureForm) -> Result<usize, KernelError>;

    /// Fill `x` (features x grid points) in place.
    fn compute(&self, input: &KernelInput<'_>, x: &mut DMatrix<f64>) -> Result<(), KernelError>;
}

impl<K: Kernel + ?Sized> Kernel for &K {
    fn feature_count(&self, lmax: u32, nmax: u32, form: FeatureForm) -> Result<usize, KernelError> {
        (**self).feature_count(lmax, nmax, form)
    }

    fn compute(&self, input: &KernelInput<'_>, x: &mut DMatrix<f64>) -> Result<(), KernelError> {
        (**self).compute(input, x)
    }
}

impl<K: Kernel + ?Sized> Kernel for Box<K> {
    fn feature_count(&self, lmax: u32, nmax: u32, form: FeatureForm) -> Result<usize, KernelError> {
        (**self).feature_count(lmax, nmax, form)
    }

    fn compute(&self, input: &KernelInput<'_>, x: &mut DMatrix<f64>) -> Result<(), KernelError> {
        (**self).compute(input, x)
    }
}

impl<K: Kernel + ?Sized> Kernel for Arc<K> {
    fn feature_count(&self, lmax: u32, nmax: u32, form: FeatureForm) -> Result<usize, KernelError> {
        (**self).feature_count(lmax, nmax, form)
    }

    fn compute(&self, input: &KernelInput<'_>, x: &mut DMatrix<f64>) -> Result<(), KernelError> {
        (**self).compute(input, x)
    }
}
