// src/features/error.rs

use crate::features::kernel::KernelError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FeaturesError {
    /// Unrecognised feature form or out-of-range setting
    InvalidConfiguration(String),
    /// Structure cannot be turned into a single-species crystal
    InvalidStructure(String),
    /// Raised by the numerical kernel, passed through untouched
    Kernel(KernelError),
}

impl fmt::Display for FeaturesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeaturesError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            FeaturesError::InvalidStructure(msg) => write!(f, "Invalid structure: {}", msg),
            FeaturesError::Kernel(e) => write!(f, "Kernel error: {}", e),
        }
    }
}

impl std::error::Error for FeaturesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeaturesError::Kernel(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KernelError> for FeaturesError {
    fn from(e: KernelError) -> Self {
        FeaturesError::Kernel(e)
    }
}
