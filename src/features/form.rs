// src/features/form.rs

use crate::features::error::FeaturesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which invariant is built from the neighbour-density expansion.
///
/// The kernel identifies the form by an integer discriminator, see
/// [`FeatureForm::calc_type`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureForm {
    #[default]
    Powerspectrum,
    Bispectrum,
}

impl FeatureForm {
    pub const ALL: [FeatureForm; 2] = [FeatureForm::Powerspectrum, FeatureForm::Bispectrum];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureForm::Powerspectrum => "powerspectrum",
            FeatureForm::Bispectrum => "bispectrum",
        }
    }

    /// Discriminator expected by the kernel: 0 = powerspectrum, 1 = bispectrum
    pub fn calc_type(&self) -> i32 {
        match self {
            FeatureForm::Powerspectrum => 0,
            FeatureForm::Bispectrum => 1,
        }
    }
}

impl fmt::Display for FeatureForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureForm {
    type Err = FeaturesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "powerspectrum" => Ok(FeatureForm::Powerspectrum),
            "bispectrum" => Ok(FeatureForm::Bispectrum),
            other => Err(FeaturesError::InvalidConfiguration(format!(
                "bispectrum type {} not supported",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_forms() {
        assert_eq!("powerspectrum".parse::<FeatureForm>().unwrap(), FeatureForm::Powerspectrum);
        assert_eq!("bispectrum".parse::<FeatureForm>().unwrap(), FeatureForm::Bispectrum);
    }

    #[test]
    fn test_unknown_form_names_value() {
        let err = "trispectrum".parse::<FeatureForm>().unwrap_err();
        match err {
            FeaturesError::InvalidConfiguration(msg) => assert!(msg.contains("trispectrum")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Powerspectrum".parse::<FeatureForm>().is_err());
        assert!(" bispectrum".parse::<FeatureForm>().is_err());
    }

    #[test]
    fn test_default_is_powerspectrum() {
        assert_eq!(FeatureForm::default(), FeatureForm::Powerspectrum);
    }

    #[test]
    fn test_calc_type() {
        assert_eq!(FeatureForm::Powerspectrum.calc_type(), 0);
        assert_eq!(FeatureForm::Bispectrum.calc_type(), 1);
    }

    #[test]
    fn test_display_matches_parse() {
        for form in FeatureForm::ALL {
            assert_eq!(form.to_string().parse::<FeatureForm>().unwrap(), form);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&FeatureForm::Bispectrum).unwrap();
        assert_eq!(json, "\"bispectrum\"");
        let back: FeatureForm = serde_json::from_str("\"powerspectrum\"").unwrap();
        assert_eq!(back, FeatureForm::Powerspectrum);
    }
}
