// src/utils/report.rs

use crate::config::FeatureConfig;
use crate::features::layout::RowMajor;
use crate::model::Crystal;
use crate::utils::linalg::cell_volume;

const MAX_LISTED: usize = 20;

/// Cell, species and the first few fractional positions
pub fn crystal_summary(crystal: &Crystal, filename: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("File: {}\n", filename));
    out.push_str(&format!(
        "Species: {} ({} atoms), cell volume {:.4} Å^3\n",
        crystal.species,
        crystal.natoms(),
        cell_volume(crystal.cell)
    ));
    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!("{:<8} {:<10} {:<10} {:<10}\n", "Index", "u", "v", "w"));
    out.push_str("--------------------------------------------------\n");

    for (i, p) in crystal.positions.iter().take(MAX_LISTED).enumerate() {
        out.push_str(&format!("{:<8} {:<10.4} {:<10.4} {:<10.4}\n", i, p[0], p[1], p[2]));
    }

    if crystal.natoms() > MAX_LISTED {
        out.push_str(&format!("... and {} more atoms.\n", crystal.natoms() - MAX_LISTED));
    }

    out
}

/// Shape plus min/max/mean of the leading feature columns
pub fn feature_summary(features: &RowMajor, config: &FeatureConfig) -> String {
    let (npoints, nfeat) = features.shape();

    let mut out = String::new();
    out.push_str(&format!(
        "{}: nmax={} lmax={} rcut={:.3}\n",
        config.form, config.nmax, config.lmax, config.rcut
    ));
    out.push_str(&format!("{} grid points x {} features\n", npoints, nfeat));

    if npoints == 0 {
        return out;
    }

    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!("{:<8} {:<14} {:<14} {:<14}\n", "Feature", "Min", "Max", "Mean"));
    out.push_str("--------------------------------------------------\n");

    for c in 0..nfeat.min(MAX_LISTED) {
        let col = features.column(c);
        let min = col.iter().copied().fold(f64::INFINITY, f64::min);
        let max = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = col.iter().sum::<f64>() / npoints as f64;
        out.push_str(&format!("{:<8} {:<14.6e} {:<14.6e} {:<14.6e}\n", c, min, max, mean));
    }

    if nfeat > MAX_LISTED {
        out.push_str(&format!("... and {} more features.\n", nfeat - MAX_LISTED));
    }

    out
}
