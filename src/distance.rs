//! Distances between bags.
//!
//! A [`BagDistance`] is an opaque, possibly expensive,
//! set-to-set distance between the instances of two bags.
//! Metrics that keep normalization statistics refresh them in
//! [`BagDistance::update`], which is always called
//! before the metric is used against a bag it has not seen yet.

/// Provides the Hausdorff family of distances.
pub mod hausdorff;
/// Provides min-max statistics over instance attributes.
pub mod normalizer;


pub use hausdorff::{
    HausdorffDistance,
    HausdorffKind,
};

pub use normalizer::MinMaxNormalizer;

use crate::Bag;
use crate::error::Result;


/// A trait that defines a distance between two bags.
/// You only need to implement `distance` method.
pub trait BagDistance {
    /// Computes the distance between `a` and `b`.
    /// The returned value must be non-negative and symmetric.
    fn distance(&self, a: &Bag, b: &Bag) -> Result<f64>;


    /// Refresh internal statistics with `bag`.
    /// By default, this method does nothing.
    fn update(&mut self, _bag: &Bag) -> Result<()> {
        Ok(())
    }
}


/// Euclidean distance between two instances of the same length.
#[inline(always)]
pub(crate) fn euclidean(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y)
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}
