// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

/// Columns are the lattice vectors, so `basis * frac = cart`.
///
/// `lattice` is given row-wise: `[[ax, ay, az], [bx, by, bz], [cx, cy, cz]]`.
pub fn basis_matrix(lattice: [[f64; 3]; 3]) -> Matrix3<f64> {
  Matrix3::from_fn(|x, i| lattice[i][x])
}

/// Fractional -> cartesian (Angstroms)
pub fn frac_to_cart(frac: [f64; 3], lattice: [[f64; 3]; 3]) -> [f64; 3] {
  let cart = basis_matrix(lattice) * Vector3::from(frac);
  [cart.x, cart.y, cart.z]
}

/// Cartesian -> fractional, `None` if the lattice is singular
pub fn cart_to_frac(cart: [f64; 3], lattice: [[f64; 3]; 3]) -> Option<[f64; 3]> {
  let inv = basis_matrix(lattice).try_inverse()?;
  let frac = inv * Vector3::from(cart);
  Some([frac.x, frac.y, frac.z])
}

/// Cell volume in cubic Angstroms (absolute value of the triple product)
pub fn cell_volume(lattice: [[f64; 3]; 3]) -> f64 {
  basis_matrix(lattice).determinant().abs()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cubic_lattice() {
    let lattice = [[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]];
    let cart = frac_to_cart([0.5, 0.5, 0.5], lattice);

    for x in cart {
      assert!((x - 2.5).abs() < 1e-10);
    }
  }

  #[test]
  fn test_hexagonal_roundtrip() {
    let lattice = [[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.0, 0.0, 5.0]];

    let frac = [0.333, 0.667, 0.25];
    let cart = frac_to_cart(frac, lattice);
    assert!((cart[0] - (0.333 * 4.0 + 0.667 * 2.0)).abs() < 1e-10);

    let back = cart_to_frac(cart, lattice).unwrap();
    for k in 0..3 {
      assert!((back[k] - frac[k]).abs() < 1e-10);
    }
  }

  #[test]
  fn test_singular_lattice() {
    let lattice = [[1.0, 1.0, 0.0], [2.0, 2.0, 0.0], [0.0, 0.0, 1.0]];
    assert!(cart_to_frac([1.0, 1.0, 1.0], lattice).is_none());
    assert_eq!(cell_volume(lattice), 0.0);
  }

  #[test]
  fn test_volume() {
    let lattice = [[3.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 5.0]];
    assert!((cell_volume(lattice) - 60.0).abs() < 1e-10);
  }
}
