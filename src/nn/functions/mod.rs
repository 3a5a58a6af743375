use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::traits::Scalar;

fn row_max<F: Scalar>(scores: &ArrayView2<F>) -> Array2<F> {
    scores
        .fold_axis(Axis(1), F::neg_infinity(), |&m, &v| m.max(v))
        .insert_axis(Axis(1))
}

/// Row-wise softmax. Each row is shifted by its maximum before exponentiation,
/// so any finite input produces finite probabilities.
pub fn softmax<F: Scalar>(scores: ArrayView2<F>) -> Array2<F> {
    let shifted = &scores - &row_max(&scores);
    let exp = shifted.mapv(F::exp);
    let sum = exp.sum_axis(Axis(1)).insert_axis(Axis(1));
    &exp / &sum
}

/// Row-wise softmax without the max shift. Overflows for large scores.
pub fn softmax_unstable<F: Scalar>(scores: ArrayView2<F>) -> Array2<F> {
    let exp = scores.mapv(F::exp);
    let sum = exp.sum_axis(Axis(1)).insert_axis(Axis(1));
    &exp / &sum
}

/// Row-wise `ln(softmax(scores))`, computed from the max-shifted scores.
pub fn log_softmax<F: Scalar>(scores: ArrayView2<F>) -> Array2<F> {
    let shifted = &scores - &row_max(&scores);
    let log_sum = shifted
        .mapv(F::exp)
        .sum_axis(Axis(1))
        .mapv(F::ln)
        .insert_axis(Axis(1));
    &shifted - &log_sum
}

/// Stable softmax of a single score vector.
pub fn softmax_vector<F: Scalar>(scores: ArrayView1<F>) -> Array1<F> {
    let max = scores.fold(F::neg_infinity(), |m, &v| m.max(v));
    let exp = scores.mapv(|s| (s - max).exp());
    let sum = exp.sum();
    exp / sum
}
