use serde::{
    Serialize,
    Deserialize,
};

use crate::constants::{
    DEFAULT_N_REFERENCES,
    DEFAULT_N_CITERS,
    DEFAULT_THRESHOLD,
    SINGULAR_VALUE_THRESHOLD,
};
use crate::error::{MimlError, Result};


/// Parameters of [`CitationKnn`](super::CitationKnn).
/// Missing fields take their default values when deserialized.
///
/// # Example
/// ```
/// use minimiml::CitationKnnConfig;
///
/// let config = CitationKnnConfig::from_json(r#"{ "n_references": 3 }"#)
///     .unwrap();
/// assert_eq!(config.n_references, 3);
/// assert_eq!(config.n_citers, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationKnnConfig {
    /// Number of references `R`.
    pub n_references: usize,
    /// Number of citers `C`.
    pub n_citers: usize,
    /// A label is relevant iff its score is greater than this value.
    pub threshold: f64,
    /// Singular values below this value are treated as zero.
    pub singular_value_threshold: f64,
    /// Print a summary after training.
    pub verbose: bool,
}


impl Default for CitationKnnConfig {
    fn default() -> Self {
        Self {
            n_references: DEFAULT_N_REFERENCES,
            n_citers: DEFAULT_N_CITERS,
            threshold: DEFAULT_THRESHOLD,
            singular_value_threshold: SINGULAR_VALUE_THRESHOLD,
            verbose: false,
        }
    }
}


impl CitationKnnConfig {
    /// Read a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }


    /// Write the configuration as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }


    /// Check whether the configuration can yield a model.
    pub fn validate(&self) -> Result<()> {
        if self.n_references == 0 {
            return Err(MimlError::InvalidConfig(
                "the number of references must be positive".to_string()
            ));
        }
        if self.n_citers == 0 {
            return Err(MimlError::InvalidConfig(
                "the number of citers must be positive".to_string()
            ));
        }
        if !self.threshold.is_finite() {
            return Err(MimlError::InvalidConfig(format!(
                "the decision threshold must be finite. got {}",
                self.threshold,
            )));
        }
        let cutoff = self.singular_value_threshold;
        if !(cutoff.is_finite() && cutoff >= 0.0) {
            return Err(MimlError::InvalidConfig(format!(
                "the singular value threshold must be non-negative. \
                 got {cutoff}"
            )));
        }
        Ok(())
    }
}
