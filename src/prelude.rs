//! Exports the learner, the distances and the traits.
//! 
pub use crate::sample::{
    Bag,
    MimlSample,
};


pub use crate::distance::{
    // Distance trait
    BagDistance,

    // Hausdorff family
    HausdorffDistance,
    HausdorffKind,
};


pub use crate::classifier::{
    MultiLabelClassifier,
    MultiLabelOutput,
};


pub use crate::citation_knn::{
    CitationKnn,
    CitationKnnConfig,
};


pub use crate::error::MimlError;
