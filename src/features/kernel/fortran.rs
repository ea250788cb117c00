// src/features/kernel/fortran.rs

//! Binding to the precompiled kernel library (`libfeatures`).
//!
//! The library exports the wrapper subroutines generated for its
//! `check_cardinality` function and `calculate` subroutine. Every scalar is
//! passed by reference, logicals are C ints, and each assumed-shape array is
//! followed by its extents in the trailing `n*` arguments.

use super::{Kernel, KernelError, KernelInput};
use crate::features::form::FeatureForm;
use nalgebra::DMatrix;
use std::os::raw::c_int;

#[link(name = "features")]
extern "C" {
    #[link_name = "f90wrap_check_cardinality_"]
    fn check_cardinality(lmax: *const c_int, nmax: *const c_int, calc_type: *const c_int, ret: *mut c_int);

    #[link_name = "f90wrap_calculate_"]
    fn calculate(
        cell: *const f64,
        atom_positions: *const f64,
        grid_coordinates: *const f64,
        rcut: *const f64,
        parallel: *const c_int,
        lmax: *const c_int,
        nmax: *const c_int,
        calc_type: *const c_int,
        x: *mut f64,
        n0: *const c_int,
        n1: *const c_int,
        n2: *const c_int,
        n3: *const c_int,
        n4: *const c_int,
        n5: *const c_int,
        n6: *const c_int,
        n7: *const c_int,
    );
}

/// Kernel backed by the native library.
#[derive(Clone, Copy, Debug, Default)]
pub struct FortranKernel;

impl FortranKernel {
    pub fn new() -> Self {
        FortranKernel
    }
}

fn to_c_int(value: usize, what: &str) -> Result<c_int, KernelError> {
    c_int::try_from(value).map_err(|_| KernelError::Fault(format!("{} = {} overflows a C int", what, value)))
}

fn expect_rows(what: &'static str, m: &DMatrix<f64>, rows: usize) -> Result<(), KernelError> {
    if m.nrows() != rows {
        return Err(KernelError::ShapeMismatch {
            what,
            expected: (rows, m.ncols()),
            actual: m.shape(),
        });
    }
    Ok(())
}

impl Kernel for FortranKernel {
    fn feature_count(&self, lmax: u32, nmax: u32, form: FeatureForm) -> Result<usize, KernelError> {
        let lmax = to_c_int(lmax as usize, "lmax")?;
        let nmax = to_c_int(nmax as usize, "nmax")?;
        let calc_type: c_int = form.calc_type();
        let mut ret: c_int = 0;

        // SAFETY: all pointers reference live locals for the duration of the call
        unsafe { check_cardinality(&lmax, &nmax, &calc_type, &mut ret) };

        usize::try_from(ret).map_err(|_| KernelError::Fault(format!("negative feature count {}", ret)))
    }

    fn compute(&self, input: &KernelInput<'_>, x: &mut DMatrix<f64>) -> Result<(), KernelError> {
        if input.cell.shape() != (3, 3) {
            return Err(KernelError::ShapeMismatch {
                what: "cell",
                expected: (3, 3),
                actual: input.cell.shape(),
            });
        }
        expect_rows("atom positions", input.atom_positions, 3)?;
        expect_rows("grid coordinates", input.grid_coordinates, 3)?;
        if x.ncols() != input.grid_coordinates.ncols() {
            return Err(KernelError::ShapeMismatch {
                what: "output buffer",
                expected: (x.nrows(), input.grid_coordinates.ncols()),
                actual: x.shape(),
            });
        }

        let dims = [
            to_c_int(3, "cell rows")?,
            to_c_int(3, "cell cols")?,
            to_c_int(3, "atom rows")?,
            to_c_int(input.atom_positions.ncols(), "atom count")?,
            to_c_int(3, "grid rows")?,
            to_c_int(input.grid_coordinates.ncols(), "grid point count")?,
            to_c_int(x.nrows(), "feature count")?,
            to_c_int(x.ncols(), "grid point count")?,
        ];
        let rcut = input.rcut;
        let parallel: c_int = input.parallel as c_int;
        let lmax = to_c_int(input.lmax as usize, "lmax")?;
        let nmax = to_c_int(input.nmax as usize, "nmax")?;
        let calc_type: c_int = input.form.calc_type();

        log::debug!(
            "calculate: {} atoms, {} grid points, {} features, parallel={}",
            dims[3],
            dims[5],
            dims[6],
            input.parallel
        );

        // SAFETY: shapes were checked against the extents passed alongside each
        // array; every buffer is contiguous column-major storage owned by a
        // DMatrix that outlives the call, and `x` is borrowed mutably.
        unsafe {
            calculate(
                input.cell.as_ptr(),
                input.atom_positions.as_ptr(),
                input.grid_coordinates.as_ptr(),
                &rcut,
                &parallel,
                &lmax,
                &nmax,
                &calc_type,
                x.as_mut_ptr(),
                &dims[0],
                &dims[1],
                &dims[2],
                &dims[3],
                &dims[4],
                &dims[5],
                &dims[6],
                &dims[7],
            );
        }
        Ok(())
    }
}
