//! Least-squares fit of the label-interaction weights.
//!
//! Given the evidence matrix `Phi` (`n x L`) and
//! the ground-truth matrix `T` (`n x L`),
//! the weights `W` (`L x L`) minimize `|| Phi W - T ||`:
//! ```txt
//! W = (Phi^T Phi)^+ Phi^T T,
//! ```
//! where `^+` is the Moore-Penrose pseudo-inverse.
use nalgebra::{DMatrix, SVD};

use crate::error::{MimlError, Result};


/// Computes the pseudo-inverse of a square matrix `a`
/// through its singular value decomposition `a = U S V^T`.
/// Every singular value below `threshold` is treated as zero,
/// so its reciprocal is zero as well.
pub fn pseudo_inverse(a: DMatrix<f64>, threshold: f64) -> DMatrix<f64> {
    let svd = SVD::new(a, true, true);
    let u = svd.u
        .expect("SVD is computed with `compute_u = true`");
    let v_t = svd.v_t
        .expect("SVD is computed with `compute_v = true`");

    let s_inv = svd.singular_values
        .map(|s| if s < threshold { 0f64 } else { 1f64 / s });

    v_t.transpose() * DMatrix::from_diagonal(&s_inv) * u.transpose()
}


/// Solves `Phi W ~ T` for `W`.
/// `phi` and `target` must have the same shape.
pub fn learn_weights(
    phi: &DMatrix<f64>,
    target: &DMatrix<f64>,
    threshold: f64,
) -> Result<DMatrix<f64>>
{
    if phi.shape() != target.shape() {
        return Err(MimlError::InvalidInput(format!(
            "evidence is {:?} but ground truth is {:?}",
            phi.shape(), target.shape(),
        )));
    }

    let phi_t = phi.transpose();
    let a = &phi_t * phi;
    let b = &phi_t * target;

    Ok(pseudo_inverse(a, threshold) * b)
}
