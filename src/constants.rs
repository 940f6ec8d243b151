//! Named defaults used across the crate.

/// Singular values below this cutoff are treated as exactly zero
/// when the pseudo-inverse is formed.
pub const SINGULAR_VALUE_THRESHOLD: f64 = 1e-10;

/// Default number of references (`R`).
pub const DEFAULT_N_REFERENCES: usize = 1;

/// Default number of citers (`C`).
pub const DEFAULT_N_CITERS: usize = 1;

/// Default decision threshold on the per-label score.
pub const DEFAULT_THRESHOLD: f64 = 0.0;

pub(crate) const PRINT_WIDTH: usize = 9;
