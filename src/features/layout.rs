// src/features/layout.rs

//! Conversion between the caller's row-major arrays and the kernel's
//! column-major matrices.
//!
//! A row-major `r x c` buffer and a column-major `c x r` matrix share the
//! same memory order, so both directions hand the buffer over unchanged:
//!
//! ```text
//! caller (r, c) at data[r * ncols + c]  ==  kernel (c, r) at data[c + ncols * r]
//! ```

use nalgebra::DMatrix;
use serde::Serialize;

/// Row-major 2-D array of `f64`, the layout returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowMajor {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl RowMajor {
    /// Returns `None` when `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<f64>) -> Option<Self> {
        if nrows.checked_mul(ncols)? != data.len() {
            return None;
        }
        Some(Self { nrows, ncols, data })
    }

    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        Self {
            nrows: rows.len(),
            ncols: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self { nrows, ncols, data: vec![0.0; nrows * ncols] }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        if r < self.nrows && c < self.ncols {
            Some(self.data[r * self.ncols + c])
        } else {
            None
        }
    }

    /// Panics if `r >= nrows`.
    pub fn row(&self, r: usize) -> &[f64] {
        let start = r * self.ncols;
        &self.data[start..start + self.ncols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.nrows).map(move |r| self.row(r))
    }

    pub fn column(&self, c: usize) -> Vec<f64> {
        (0..self.nrows).map(|r| self.data[r * self.ncols + c]).collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        (0..self.nrows).map(|r| self.row(r).to_vec()).collect()
    }
}

/// Caller `(r, c)` row-major -> kernel `(c, r)` column-major.
pub fn to_kernel_layout(array: &RowMajor) -> DMatrix<f64> {
    DMatrix::from_column_slice(array.ncols, array.nrows, &array.data)
}

/// Fixed-width rows (cell, atom positions, grid points) -> kernel `(N, len)` matrix.
pub fn rows_to_kernel_layout<const N: usize>(rows: &[[f64; N]]) -> DMatrix<f64> {
    DMatrix::from_iterator(N, rows.len(), rows.iter().flatten().copied())
}

/// Kernel `(F, G)` column-major -> caller `(G, F)` row-major, without reordering.
pub fn from_kernel_layout(matrix: DMatrix<f64>) -> RowMajor {
    let (nfeat, npoints) = matrix.shape();
    RowMajor {
        nrows: npoints,
        ncols: nfeat,
        data: matrix.data.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(values: &[f64]) -> Vec<u64> {
        values.iter().map(|v| v.to_bits()).collect()
    }

    #[test]
    fn test_kernel_layout_is_transpose() {
        let a = RowMajor::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let m = to_kernel_layout(&a);

        assert_eq!(m.shape(), (3, 2));
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(m[(c, r)], a.get(r, c).unwrap());
            }
        }
    }

    #[test]
    fn test_rows_match_generic_conversion() {
        let rows = [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9], [1.0, 1.1, 1.2]];
        let direct = rows_to_kernel_layout(&rows);
        let generic = to_kernel_layout(&RowMajor::from_rows(&rows));
        assert_eq!(direct, generic);
    }

    #[test]
    fn test_cell_layout() {
        // cell[i][x] is the x component of vector i; the kernel sees cell(x, i)
        let cell = [[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.0, 0.0, 5.0]];
        let m = rows_to_kernel_layout(&cell);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 1)], 3.46);
        assert_eq!(m[(1, 0)], 0.0);
    }

    #[test]
    fn test_roundtrip_bit_identical() {
        let values = vec![
            0.1,
            -0.0,
            f64::MIN_POSITIVE / 2.0,
            f64::MAX,
            f64::from_bits(0x7ff8_0000_0000_1234),
            1.0 / 3.0,
            -7.25e-300,
            f64::INFINITY,
            f64::NEG_INFINITY,
            2.0_f64.sqrt(),
            123456789.123456789,
            -1.0,
        ];
        for &(r, c) in &[(1, 12), (12, 1), (3, 4), (4, 3), (2, 6)] {
            let a = RowMajor::from_vec(r, c, values.clone()).unwrap();
            let back = from_kernel_layout(to_kernel_layout(&a));
            assert_eq!(back.shape(), (r, c));
            assert_eq!(bits(back.as_slice()), bits(&values));
        }
    }

    #[test]
    fn test_roundtrip_empty() {
        let a = RowMajor::from_vec(0, 5, Vec::new()).unwrap();
        let back = from_kernel_layout(to_kernel_layout(&a));
        assert_eq!(back.shape(), (0, 5));
        assert!(back.is_empty());
        assert_eq!(back.rows().count(), 0);
    }

    #[test]
    fn test_featureless_points_keep_their_rows() {
        let out = from_kernel_layout(DMatrix::zeros(0, 4));
        assert_eq!(out.shape(), (4, 0));
        assert_eq!(out.rows().count(), 4);
        assert!(out.rows().all(|r| r.is_empty()));
        assert_eq!(out.to_nested(), vec![Vec::<f64>::new(); 4]);
    }

    #[test]
    fn test_from_kernel_layout_rows_are_points() {
        // 2 features x 3 points
        let m = DMatrix::from_fn(2, 3, |f, g| (10 * g + f) as f64);
        let out = from_kernel_layout(m);

        assert_eq!(out.shape(), (3, 2));
        assert_eq!(out.row(0), &[0.0, 1.0]);
        assert_eq!(out.row(2), &[20.0, 21.0]);
        assert_eq!(out.column(1), vec![1.0, 11.0, 21.0]);
    }

    #[test]
    fn test_from_vec_rejects_bad_length() {
        assert!(RowMajor::from_vec(2, 3, vec![0.0; 5]).is_none());
        assert!(RowMajor::from_vec(usize::MAX, 2, Vec::new()).is_none());
    }

    #[test]
    fn test_rows_iterator() {
        let a = RowMajor::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let rows: Vec<&[f64]> = a.rows().collect();
        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..], &[5.0, 6.0][..]]);
        assert_eq!(a.to_nested()[1], vec![3.0, 4.0]);
    }
}
