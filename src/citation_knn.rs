//! Citation-kNN for multi-instance multi-label learning.

/// Parameters of `CitationKnn`.
pub mod config;
/// Pairwise distances between bags.
pub mod distance_cache;
/// Reference and citer selection.
pub mod neighbor;
/// Per-label counts over a neighborhood.
pub mod evidence;
/// Pseudo-inverse regression of the label weights.
pub mod weight_learner;

mod citation_knn_algorithm;


pub use citation_knn_algorithm::CitationKnn;
pub use config::CitationKnnConfig;
pub use distance_cache::DistanceCache;
pub use neighbor::ReferenceMatrix;
