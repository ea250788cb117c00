// src/io/features.rs

use crate::config::FeatureConfig;
use crate::features::layout::RowMajor;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// On-disk result of a feature calculation, one feature row per grid point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureOutput {
    pub form: String,
    pub nmax: u32,
    pub lmax: u32,
    pub rcut: f64,
    pub species: Option<String>,
    pub points: Vec<[f64; 3]>,
    pub features: Vec<Vec<f64>>,
}

impl FeatureOutput {
    pub fn new(config: &FeatureConfig, species: Option<&str>, points: &[[f64; 3]], features: &RowMajor) -> Self {
        Self {
            form: config.form.clone(),
            nmax: config.nmax,
            lmax: config.lmax,
            rcut: config.rcut,
            species: species.map(str::to_string),
            points: points.to_vec(),
            features: features.to_nested(),
        }
    }

    /// Back to the caller layout; `None` if the rows are ragged.
    pub fn to_row_major(&self) -> Option<RowMajor> {
        let ncols = self.features.first().map_or(0, Vec::len);
        if self.features.iter().any(|row| row.len() != ncols) {
            return None;
        }
        RowMajor::from_vec(self.features.len(), ncols, self.features.concat())
    }

    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, self).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
