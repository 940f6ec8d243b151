//! This file defines `CitationKnn` based on the paper
//! "MIMLkNN: A k-nearest neighbor approach to
//! multi-instance multi-label learning"
//! by Zhang, M.-L.
use std::collections::BTreeSet;
use std::time::Instant;

use colored::Colorize;
use log::{debug, trace};
use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::{
    Bag,
    BagDistance,
    MimlSample,
    MultiLabelClassifier,
    MultiLabelOutput,
};
use crate::constants::PRINT_WIDTH;
use crate::error::{MimlError, Result};

use super::config::CitationKnnConfig;
use super::distance_cache::DistanceCache;
use super::evidence::{evidence, ground_truth};
use super::neighbor::{self, ReferenceMatrix};
use super::weight_learner::learn_weights;


/// Everything derived from a training sample.
/// Nothing here is written after `CitationKnn::train` returns.
struct Model<'a, D> {
    sample: &'a MimlSample,
    metric: D,
    n_references: usize,
    distances: DistanceCache,
    references: ReferenceMatrix,
    evidence: DMatrix<f64>,
    ground_truth: DMatrix<f64>,
    weights: DMatrix<f64>,
}


/// Citation-kNN for multi-instance multi-label learning.
///
/// Training computes all pairwise bag distances,
/// the `R` references of every bag,
/// and the citers of every bag (at most `C`).
/// The per-label counts over each neighborhood are regressed onto
/// the `+1/-1` ground truth, which yields an `L x L` weight matrix.
///
/// Predicting a bag extends the distance matrix by one row,
/// recomputes the references of **every** bag in the enlarged set
/// (`O(n^2)` per query, since the citers of the new bag need them)
/// and scores each label as `W[:, l] . evidence`.
/// The extended matrices are local to the call,
/// so the trained model is shared read-only
/// and predictions may run concurrently.
///
/// # Example
/// ```no_run
/// use minimiml::prelude::*;
///
/// # fn run(train: &MimlSample, test: &MimlSample) -> minimiml::Result<()> {
/// let mut knn = CitationKnn::new(HausdorffDistance::average())
///     .n_references(3)
///     .n_citers(5)
///     .verbose(true);
/// knn.train(train)?;
///
/// let predictions = knn.predict_all(test)?;
/// assert_eq!(predictions.len(), test.n_bags());
/// # Ok(())
/// # }
/// ```
pub struct CitationKnn<'a, D> {
    config: CitationKnnConfig,
    metric: D,
    model: Option<Model<'a, D>>,
}


impl<'a, D> CitationKnn<'a, D> {
    /// Construct a new instance of `CitationKnn`
    /// with the default configuration.
    /// ```text
    /// n_references: 1,
    /// n_citers: 1,
    /// threshold: 0.0,
    /// singular_value_threshold: 1e-10,
    /// ```
    pub fn new(metric: D) -> Self {
        Self::with_config(metric, CitationKnnConfig::default())
    }


    /// Construct a new instance of `CitationKnn` from `config`.
    pub fn with_config(metric: D, config: CitationKnnConfig) -> Self {
        Self { config, metric, model: None }
    }


    /// Set the number of references `R`.
    /// Default value is `1`.
    /// A trained model is discarded.
    pub fn n_references(mut self, n_references: usize) -> Self {
        assert!(n_references > 0, "the number of references must be positive");
        self.config.n_references = n_references;
        self.model = None;
        self
    }


    /// Set the number of citers `C`.
    /// Default value is `1`.
    /// A trained model is discarded.
    pub fn n_citers(mut self, n_citers: usize) -> Self {
        assert!(n_citers > 0, "the number of citers must be positive");
        self.config.n_citers = n_citers;
        self.model = None;
        self
    }


    /// Set the decision threshold.
    /// A label is relevant iff its score is greater than `threshold`.
    /// Default value is `0.0`.
    /// A trained model is discarded.
    pub fn threshold(mut self, threshold: f64) -> Self {
        assert!(threshold.is_finite(), "the threshold must be finite");
        self.config.threshold = threshold;
        self.model = None;
        self
    }


    /// Set the cutoff below which singular values are treated as zero.
    /// Default value is `1e-10`.
    /// A trained model is discarded.
    pub fn singular_value_threshold(mut self, cutoff: f64) -> Self {
        assert!(
            cutoff.is_finite() && cutoff >= 0.0,
            "the singular value threshold must be non-negative. got {cutoff}"
        );
        self.config.singular_value_threshold = cutoff;
        self.model = None;
        self
    }


    /// Print a summary after training if `verbose` is `true`.
    /// Default value is `false`.
    /// Unlike the other setters, this keeps a trained model.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }


    /// Returns the configuration.
    pub fn config(&self) -> &CitationKnnConfig {
        &self.config
    }


    /// Returns the distance metric as configured,
    /// before it has seen any training bag.
    pub fn metric(&self) -> &D {
        &self.metric
    }


    /// Returns `true` if `self` has been trained.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }


    fn model(&self) -> Result<&Model<'a, D>> {
        self.model.as_ref()
            .ok_or_else(|| MimlError::InvalidState(
                "CitationKnn is not trained yet".to_string()
            ))
    }


    /// Returns the number of references actually used,
    /// i.e., `min(R, n - 1)` for a training sample of `n` bags.
    pub fn effective_references(&self) -> Result<usize> {
        Ok(self.model()?.n_references)
    }


    /// Returns the pairwise distances of the training bags.
    pub fn distance_matrix(&self) -> Result<&DistanceCache> {
        Ok(&self.model()?.distances)
    }


    /// Returns the references of the training bags.
    pub fn reference_matrix(&self) -> Result<&ReferenceMatrix> {
        Ok(&self.model()?.references)
    }


    /// Returns the evidence matrix (`n x L`).
    pub fn evidence_matrix(&self) -> Result<&DMatrix<f64>> {
        Ok(&self.model()?.evidence)
    }


    /// Returns the `+1/-1` ground-truth matrix (`n x L`).
    pub fn ground_truth_matrix(&self) -> Result<&DMatrix<f64>> {
        Ok(&self.model()?.ground_truth)
    }


    /// Returns the learned weights (`L x L`).
    pub fn weights(&self) -> Result<&DMatrix<f64>> {
        Ok(&self.model()?.weights)
    }


    /// Returns the references of the `i`-th training bag,
    /// in ascending index order.
    pub fn references(&self, i: usize) -> Result<Vec<usize>> {
        let model = self.model()?;
        model.check_index(i)?;
        Ok(model.references.references_of(i).collect())
    }


    /// Returns the citers of the `i`-th training bag,
    /// nearest first.
    pub fn citers(&self, i: usize) -> Result<Vec<usize>> {
        let model = self.model()?;
        model.check_index(i)?;
        let citers = neighbor::citers(
            &model.distances, &model.references, i, self.config.n_citers
        );
        Ok(citers)
    }


    /// Returns the neighborhood of the `i`-th training bag.
    pub fn neighborhood(&self, i: usize) -> Result<BTreeSet<usize>> {
        let model = self.model()?;
        model.check_index(i)?;
        let union = neighbor::neighborhood(
            &model.distances, &model.references, i, self.config.n_citers
        );
        Ok(union)
    }
}


impl<'a, D> CitationKnn<'a, D>
    where D: BagDistance + Clone + Sync,
{
    /// Train `self` on `sample`.
    /// Any previously trained model is discarded first,
    /// so `self` is untrained if this returns an error.
    pub fn train(&mut self, sample: &'a MimlSample) -> Result<()> {
        // A failed training leaves `self` untrained.
        self.model = None;

        self.config.validate()?;

        let (n_bags, n_labels) = sample.shape();
        if n_bags == 0 {
            return Err(MimlError::InvalidInput(
                "the training sample is empty".to_string()
            ));
        }
        if n_labels == 0 {
            return Err(MimlError::InvalidInput(
                "the training sample has no label".to_string()
            ));
        }

        let n_references = self.config.n_references.min(n_bags - 1);
        let n_citers = self.config.n_citers;
        debug!(
            "training CitationKnn on {n_bags} bags, {n_labels} labels \
             (R = {n_references}, C = {n_citers})"
        );

        let bags = sample.bags();
        let mut metric = self.metric.clone();
        for bag in bags {
            metric.update(bag)?;
        }

        let now = Instant::now();
        let distances = DistanceCache::build_full(bags, &metric)?;
        trace!(
            "built {n_bags} x {n_bags} distance matrix in {} ms",
            now.elapsed().as_millis()
        );

        let references = ReferenceMatrix::compute(&distances, n_references);

        let rows = (0..n_bags).into_par_iter()
            .map(|i| {
                let union = neighbor::neighborhood(
                    &distances, &references, i, n_citers
                );
                evidence(union, bags, n_labels)
            })
            .collect::<Vec<_>>();
        let evidence = DMatrix::from_fn(n_bags, n_labels, |i, l| rows[i][l]);

        let truth = bags.iter()
            .map(|bag| ground_truth(bag.labels()))
            .collect::<Vec<_>>();
        let ground_truth = DMatrix::from_fn(
            n_bags, n_labels, |i, l| truth[i][l]
        );

        let weights = learn_weights(
            &evidence, &ground_truth, self.config.singular_value_threshold
        )?;

        if self.config.verbose {
            println!(
                "{}    {}    {}",
                "[CitationKnn]".bold().red(),
                format!(
                    "[BAGS {n_bags:>PRINT_WIDTH$}] [LABELS {n_labels:>4}]"
                ).bold().green(),
                format!("[R {n_references:>4}] [C {n_citers:>4}]")
                    .bold().yellow(),
            );
        }

        self.model = Some(Model {
            sample,
            metric,
            n_references,
            distances,
            references,
            evidence,
            ground_truth,
            weights,
        });
        Ok(())
    }


    /// Returns the score `W[:, l] . evidence` of every label for `bag`.
    pub fn scores(&self, bag: &Bag) -> Result<Vec<f64>> {
        let model = self.model()?;
        model.sample.check_bag(bag)?;

        let bags = model.sample.bags();
        let n_bags = bags.len();
        let n_labels = model.sample.n_labels();

        let mut metric = model.metric.clone();
        metric.update(bag)?;

        let distances = model.distances.extend_by_one(bags, bag, &metric)?;
        let references = ReferenceMatrix::compute(
            &distances, model.n_references
        );
        let union = neighbor::neighborhood(
            &distances, &references, n_bags, self.config.n_citers
        );
        trace!("bag `{}` has {} neighbors", bag.id(), union.len());

        let evidence = evidence(union, bags, n_labels);
        let scores = model.weights
            .column_iter()
            .map(|column| {
                column.iter()
                    .zip(&evidence)
                    .map(|(w, e)| w * e)
                    .sum::<f64>()
            })
            .collect();
        Ok(scores)
    }
}


impl<'a, D> Model<'a, D> {
    fn check_index(&self, i: usize) -> Result<()> {
        let n_bags = self.sample.n_bags();
        if i >= n_bags {
            return Err(MimlError::InvalidInput(format!(
                "bag index {i} is out of range for {n_bags} training bags"
            )));
        }
        Ok(())
    }
}


impl<'a, D> MultiLabelClassifier for CitationKnn<'a, D>
    where D: BagDistance + Clone + Sync,
{
    fn predict(&self, bag: &Bag) -> Result<MultiLabelOutput> {
        let threshold = self.config.threshold;
        let bipartition = self.scores(bag)?
            .into_iter()
            .map(|score| score > threshold)
            .collect();
        Ok(MultiLabelOutput::from_bipartition(bipartition))
    }


    fn predict_all(&self, sample: &MimlSample)
        -> Result<Vec<MultiLabelOutput>>
    {
        sample.bags()
            .par_iter()
            .map(|bag| self.predict(bag))
            .collect()
    }
}
