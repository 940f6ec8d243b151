//! `Bag` and `MimlSample` represent a multi-instance multi-label sample.

// Provides bag struct.
pub(crate) mod bag;
// Provides sample struct.
pub(crate) mod miml_sample;


pub use bag::Bag;
pub use miml_sample::MimlSample;
