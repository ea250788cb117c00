//src/model/mod.rs
pub mod crystal;
pub mod structure;

// Re-exports for cleaner imports
pub use crystal::Crystal;
pub use structure::{Atom, Structure};
