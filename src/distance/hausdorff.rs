use serde::{
    Serialize,
    Deserialize,
};

use crate::Bag;
use crate::error::{MimlError, Result};
use super::{BagDistance, MinMaxNormalizer, euclidean};


/// The way instance-level distances are aggregated into
/// a bag-level distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HausdorffKind {
    /// `max( max_a min_b d(a, b), max_b min_a d(a, b) )`.
    Maximal,
    /// `min_{a, b} d(a, b)`.
    Minimal,
    /// `( sum_a min_b d(a, b) + sum_b min_a d(a, b) ) / ( |A| + |B| )`.
    Average,
}


/// Hausdorff distances between bags over the Euclidean instance distance.
///
/// # Example
/// ```
/// use minimiml::{Bag, BagDistance, HausdorffDistance};
///
/// let a = Bag::unlabeled("a", vec![vec![0.0], vec![1.0]]).unwrap();
/// let b = Bag::unlabeled("b", vec![vec![3.0]]).unwrap();
///
/// let metric = HausdorffDistance::maximal();
/// assert_eq!(metric.distance(&a, &b).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HausdorffDistance {
    kind: HausdorffKind,
    normalizer: Option<MinMaxNormalizer>,
}


impl HausdorffDistance {
    /// Construct a new instance of `HausdorffDistance`.
    pub fn new(kind: HausdorffKind) -> Self {
        Self { kind, normalizer: None }
    }


    /// Maximal Hausdorff distance.
    pub fn maximal() -> Self {
        Self::new(HausdorffKind::Maximal)
    }


    /// Minimal Hausdorff distance.
    pub fn minimal() -> Self {
        Self::new(HausdorffKind::Minimal)
    }


    /// Average Hausdorff distance.
    pub fn average() -> Self {
        Self::new(HausdorffKind::Average)
    }


    /// Rescale every attribute with min-max statistics
    /// collected through [`BagDistance::update`].
    pub fn normalized(mut self) -> Self {
        self.normalizer = Some(MinMaxNormalizer::new());
        self
    }


    /// Returns the aggregation rule.
    pub fn kind(&self) -> HausdorffKind {
        self.kind
    }


    /// Returns the normalizer if any.
    pub fn normalizer(&self) -> Option<&MinMaxNormalizer> {
        self.normalizer.as_ref()
    }


    fn instances(&self, bag: &Bag) -> Vec<Vec<f64>> {
        match &self.normalizer {
            Some(normalizer) => bag.instances()
                .iter()
                .map(|instance| normalizer.scale(instance))
                .collect(),
            None => bag.instances().to_vec(),
        }
    }
}


impl BagDistance for HausdorffDistance {
    fn distance(&self, a: &Bag, b: &Bag) -> Result<f64> {
        if a.n_instances() == 0 || b.n_instances() == 0 {
            return Err(MimlError::MetricFailure(format!(
                "cannot measure the distance between `{}` and `{}`: \
                 empty bag",
                a.id(), b.id(),
            )));
        }
        if a.n_features() != b.n_features() {
            return Err(MimlError::MetricFailure(format!(
                "bags `{}` and `{}` have {} and {} features",
                a.id(), b.id(), a.n_features(), b.n_features(),
            )));
        }

        let xs = self.instances(a);
        let ys = self.instances(b);

        // Instance-level distances, `xs.len()` rows by `ys.len()` columns.
        let table = xs.iter()
            .map(|x| ys.iter().map(|y| euclidean(x, y)).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let row_min = table.iter()
            .map(|row| row.iter().copied().fold(f64::INFINITY, f64::min))
            .collect::<Vec<_>>();
        let col_min = (0..ys.len())
            .map(|j| {
                table.iter()
                    .map(|row| row[j])
                    .fold(f64::INFINITY, f64::min)
            })
            .collect::<Vec<_>>();

        let dist = match self.kind {
            HausdorffKind::Maximal => {
                let ab = row_min.iter().copied().fold(0f64, f64::max);
                let ba = col_min.iter().copied().fold(0f64, f64::max);
                ab.max(ba)
            },
            HausdorffKind::Minimal => {
                row_min.iter().copied().fold(f64::INFINITY, f64::min)
            },
            HausdorffKind::Average => {
                let total = row_min.iter().sum::<f64>()
                    + col_min.iter().sum::<f64>();
                total / (xs.len() + ys.len()) as f64
            },
        };
        Ok(dist)
    }


    fn update(&mut self, bag: &Bag) -> Result<()> {
        match self.normalizer.as_mut() {
            Some(normalizer) => normalizer.update(bag),
            None => Ok(()),
        }
    }
}
