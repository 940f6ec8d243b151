use serde::{
    Serialize,
    Deserialize,
};

use crate::Bag;
use crate::error::{MimlError, Result};


/// Per-attribute minimum and maximum over every instance seen so far.
/// Attributes are rescaled to `(x - min) / (max - min)`;
/// an attribute whose range is zero maps to `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMaxNormalizer {
    min: Vec<f64>,
    max: Vec<f64>,
}


impl MinMaxNormalizer {
    /// Construct an empty normalizer.
    /// An empty normalizer leaves every value unchanged.
    pub fn new() -> Self {
        Self::default()
    }


    /// Returns `true` if no instance has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.min.is_empty()
    }


    /// Returns the per-attribute minima.
    pub fn min(&self) -> &[f64] {
        &self.min[..]
    }


    /// Returns the per-attribute maxima.
    pub fn max(&self) -> &[f64] {
        &self.max[..]
    }


    /// Extends the statistics with the instances of `bag`.
    pub fn update(&mut self, bag: &Bag) -> Result<()> {
        if bag.n_instances() == 0 { return Ok(()); }

        let n_features = bag.n_features();
        if self.is_empty() {
            self.min = vec![f64::INFINITY; n_features];
            self.max = vec![f64::NEG_INFINITY; n_features];
        } else if self.min.len() != n_features {
            return Err(MimlError::MetricFailure(format!(
                "bag `{}` has {n_features} features, \
                 the normalizer expects {}",
                bag.id(), self.min.len(),
            )));
        }

        for instance in bag.instances() {
            let iter = self.min.iter_mut()
                .zip(self.max.iter_mut())
                .zip(instance);
            for ((lo, hi), &x) in iter {
                *lo = lo.min(x);
                *hi = hi.max(x);
            }
        }
        Ok(())
    }


    /// Rescale `instance` into the unit box spanned by the statistics.
    pub fn scale(&self, instance: &[f64]) -> Vec<f64> {
        if self.is_empty() { return instance.to_vec(); }

        instance.iter()
            .zip(self.min.iter().zip(&self.max))
            .map(|(&x, (&lo, &hi))| {
                let range = hi - lo;
                if range > 0.0 { (x - lo) / range } else { 0.0 }
            })
            .collect()
    }
}
