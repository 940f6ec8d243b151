#![warn(missing_docs)]

//! 
//! A crate that provides Citation-kNN for
//! multi-instance multi-label (MIML) learning.
//! 
//! In MIML learning, each example is a **bag** of instances
//! (feature vectors), and each bag carries several labels at once.
//! 
//! - `Bag` and `MimlSample` hold the training data.
//! - `BagDistance` measures the distance between two bags.
//!     `HausdorffDistance` provides the maximal, minimal and
//!     average Hausdorff distances.
//! - `CitationKnn` collects, for each bag, its nearest bags
//!     (references) and the bags that count it among their own
//!     nearest ones (citers), then learns a linear map from
//!     the label counts over that neighborhood to the labels.

pub mod error;
pub mod constants;
pub mod sample;
pub mod distance;
pub mod classifier;
pub mod citation_knn;
pub mod prelude;


pub use error::{MimlError, Result};

pub use sample::{Bag, MimlSample};

pub use distance::{
    BagDistance,
    HausdorffDistance,
    HausdorffKind,
    MinMaxNormalizer,
};

pub use classifier::{
    MultiLabelClassifier,
    MultiLabelOutput,
};

pub use citation_knn::{
    CitationKnn,
    CitationKnnConfig,
    DistanceCache,
    ReferenceMatrix,
};
