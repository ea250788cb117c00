// src/features/adapter.rs

use crate::config::FeatureConfig;
use crate::features::error::FeaturesError;
use crate::features::form::FeatureForm;
use crate::features::kernel::{Kernel, KernelInput};
use crate::features::layout::{from_kernel_layout, rows_to_kernel_layout, RowMajor};
use crate::model::Crystal;
use nalgebra::DMatrix;

/// Bispectrum/powerspectrum features for a series of grid points.
///
/// The points are embedded in an infinite periodic crystal given by the
/// cartesian cell vectors and the fractional coordinates of its atoms
/// (single species). Interactions are finite because the kernel tapers them
/// to zero at `config.rcut`.
///
/// # Arguments
/// * `cell` - `cell[i][x]` is the x-th cartesian component of lattice vector i
/// * `atom_pos_uvw` - fractional coordinates of the N atoms in the cell
/// * `xyz` - cartesian coordinates of the G grid points
/// * `config` - nmax, lmax, rcut, parallel flag and form
///
/// # Returns
/// A `(G, F)` array, one row of F features per grid point.
///
/// # Errors
/// `InvalidConfiguration` for an unknown form, raised before the kernel is
/// touched. Anything else comes from the kernel unchanged.
pub fn bispectrum<K: Kernel + ?Sized>(
    kernel: &K,
    cell: &[[f64; 3]; 3],
    atom_pos_uvw: &[[f64; 3]],
    xyz: &[[f64; 3]],
    config: &FeatureConfig,
) -> Result<RowMajor, FeaturesError> {
    let form: FeatureForm = config.form.parse()?;

    let num_features = kernel.feature_count(config.lmax, config.nmax, form)?;
    log::debug!(
        "{}: nmax={} lmax={} -> {} features x {} grid points",
        form,
        config.nmax,
        config.lmax,
        num_features,
        xyz.len()
    );

    // feature index fastest
    let mut x = DMatrix::<f64>::zeros(num_features, xyz.len());

    let cell = rows_to_kernel_layout(cell);
    let atom_positions = rows_to_kernel_layout(atom_pos_uvw);
    let grid_coordinates = rows_to_kernel_layout(xyz);

    let input = KernelInput {
        cell: &cell,
        atom_positions: &atom_positions,
        grid_coordinates: &grid_coordinates,
        rcut: config.rcut,
        parallel: config.parallel,
        lmax: config.lmax,
        nmax: config.nmax,
        form,
    };
    kernel.compute(&input, &mut x)?;
    log::trace!("kernel filled {}x{} buffer", x.nrows(), x.ncols());

    Ok(from_kernel_layout(x))
}

/// A kernel paired with the parameters it should be called with.
pub struct FeatureAdapter<K> {
    kernel: K,
    config: FeatureConfig,
}

impl<K: Kernel> FeatureAdapter<K> {
    pub fn new(kernel: K, config: FeatureConfig) -> Self {
        Self { kernel, config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Feature count F for the current configuration.
    pub fn num_features(&self) -> Result<usize, FeaturesError> {
        let form = self.config.feature_form()?;
        Ok(self.kernel.feature_count(self.config.lmax, self.config.nmax, form)?)
    }

    pub fn compute(
        &self,
        cell: &[[f64; 3]; 3],
        atom_pos_uvw: &[[f64; 3]],
        xyz: &[[f64; 3]],
    ) -> Result<RowMajor, FeaturesError> {
        bispectrum(&self.kernel, cell, atom_pos_uvw, xyz, &self.config)
    }

    pub fn compute_crystal(&self, crystal: &Crystal, xyz: &[[f64; 3]]) -> Result<RowMajor, FeaturesError> {
        self.compute(&crystal.cell, &crystal.positions, xyz)
    }
}
