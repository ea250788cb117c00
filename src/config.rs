// src/config.rs

use crate::features::error::FeaturesError;
use crate::features::form::FeatureForm;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

fn default_nmax() -> u32 {
  6
}

fn default_lmax() -> u32 {
  6
}

fn default_rcut() -> f64 {
  6.0
}

fn default_parallel() -> bool {
  true
}

fn default_form() -> String {
  FeatureForm::Powerspectrum.as_str().to_string()
}

/// Parameters of a feature calculation.
///
/// `form` stays a string so that a bad value read from disk is reported
/// when the calculation is requested, naming the offending value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeatureConfig {
  /// Radial terms n = 1..=nmax
  #[serde(default = "default_nmax")]
  pub nmax: u32,

  /// Angular terms l = 0..=lmax
  #[serde(default = "default_lmax")]
  pub lmax: u32,

  /// Cutoff radius in Angstroms (contributions are tapered to zero here)
  #[serde(default = "default_rcut")]
  pub rcut: f64,

  #[serde(default = "default_parallel")]
  pub parallel: bool,

  #[serde(default = "default_form")]
  pub form: String,
}

impl Default for FeatureConfig {
  fn default() -> Self {
    Self {
      nmax: default_nmax(),
      lmax: default_lmax(),
      rcut: default_rcut(),
      parallel: default_parallel(),
      form: default_form(),
    }
  }
}

impl FeatureConfig {
  pub fn new(nmax: u32, lmax: u32) -> Self {
    Self {
      nmax,
      lmax,
      ..Default::default()
    }
  }

  pub fn with_form(mut self, form: FeatureForm) -> Self {
    self.form = form.as_str().to_string();
    self
  }

  pub fn with_rcut(mut self, rcut: f64) -> Self {
    self.rcut = rcut;
    self
  }

  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  pub fn feature_form(&self) -> Result<FeatureForm, FeaturesError> {
    self.form.parse()
  }

  /// Validate configuration
  pub fn validate(&self) -> Result<(), FeaturesError> {
    if self.nmax < 1 {
      return Err(FeaturesError::InvalidConfiguration(format!(
        "nmax must be at least 1, got {}",
        self.nmax
      )));
    }
    if !(self.rcut.is_finite() && self.rcut > 0.0) {
      return Err(FeaturesError::InvalidConfiguration(format!(
        "rcut must be positive, got {}",
        self.rcut
      )));
    }
    self.feature_form()?;
    Ok(())
  }

  /// Loads config from standard OS location (e.g., ~/.config/gridfeat/settings.json)
  pub fn load() -> (Self, String) {
    let path = Self::get_path();
    if path.exists() {
      match Self::from_path(&path) {
        Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
        Err(e) => (Self::default(), format!("Error reading config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  pub fn from_path(path: &Path) -> io::Result<Self> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
  }

  pub fn save_to(&self, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    let path = Self::get_path();
    match self.save_to(&path) {
      Ok(()) => format!("Config saved to {:?}", path),
      Err(e) => format!("Failed to save config: {}", e),
    }
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "gridfeat", "gridfeat") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
