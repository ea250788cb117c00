use crate::features::error::FeaturesError;
use crate::utils::linalg::basis_matrix;
use nalgebra::Vector3;

/// Cartesian points of the uniform fractional grid `(i/nx, j/ny, k/nz)`.
///
/// Points are ordered with `i` fastest, then `j`, then `k`.
pub fn uniform_grid(lattice: [[f64; 3]; 3], divisions: [usize; 3]) -> Result<Vec<[f64; 3]>, FeaturesError> {
    let [nx, ny, nz] = divisions;
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(FeaturesError::InvalidConfiguration(format!(
            "grid divisions must be positive, got {}x{}x{}",
            nx, ny, nz
        )));
    }

    let basis = basis_matrix(lattice);
    let mut points = Vec::with_capacity(nx * ny * nz);

    for k in 0..nz {
        let fk = k as f64 / nz as f64;
        for j in 0..ny {
            let fj = j as f64 / ny as f64;
            for i in 0..nx {
                let fi = i as f64 / nx as f64;
                let cart = basis * Vector3::new(fi, fj, fk);
                points.push([cart.x, cart.y, cart.z]);
            }
        }
    }

    Ok(points)
}

/// Divisions giving a spacing no larger than `spacing` along each lattice vector.
pub fn divisions_for_spacing(lattice: [[f64; 3]; 3], spacing: f64) -> Result<[usize; 3], FeaturesError> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(FeaturesError::InvalidConfiguration(format!(
            "grid spacing must be positive, got {}",
            spacing
        )));
    }
    let n = |v: [f64; 3]| ((Vector3::from(v).norm() / spacing).ceil() as usize).max(1);
    Ok([n(lattice[0]), n(lattice[1]), n(lattice[2])])
}
