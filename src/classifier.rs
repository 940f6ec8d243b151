//! The core library for multi-label classifiers over bags.
//!
//! A multi-label classifier returns, for a given bag,
//! a bipartition of the label set (relevant / irrelevant)
//! together with a confidence per label.
use serde::{Serialize, Deserialize};

use crate::{Bag, MimlSample};
use crate::error::Result;


/// The prediction for a single bag.
/// `confidences[l]` is `1.0` if the `l`-th label is predicted relevant
/// and `0.0` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLabelOutput {
    bipartition: Vec<bool>,
    confidences: Vec<f64>,
}


impl MultiLabelOutput {
    /// Construct an output whose confidences are the hard
    /// `0/1` values of `bipartition`.
    pub fn from_bipartition(bipartition: Vec<bool>) -> Self {
        let confidences = bipartition.iter()
            .map(|&relevant| if relevant { 1.0 } else { 0.0 })
            .collect();
        Self { bipartition, confidences }
    }


    /// Returns the relevant / irrelevant decision per label.
    pub fn bipartition(&self) -> &[bool] {
        &self.bipartition[..]
    }


    /// Returns the confidence per label.
    pub fn confidences(&self) -> &[f64] {
        &self.confidences[..]
    }


    /// Returns the number of labels.
    pub fn n_labels(&self) -> usize {
        self.bipartition.len()
    }
}


/// A trait that defines the behavor of a multi-label classifier.
/// You only need to implement `predict` method.
pub trait MultiLabelClassifier {
    /// Predicts the labels of `bag`.
    fn predict(&self, bag: &Bag) -> Result<MultiLabelOutput>;


    /// Predicts the labels of every bag in `sample`.
    fn predict_all(&self, sample: &MimlSample)
        -> Result<Vec<MultiLabelOutput>>
    {
        sample.bags()
            .iter()
            .map(|bag| self.predict(bag))
            .collect()
    }
}
