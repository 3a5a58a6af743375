use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::SoftmaxError;
use crate::traits::Scalar;

pub mod naive;
pub mod vectorized;

pub use naive::softmax_loss_naive;
pub use vectorized::softmax_loss_vectorized;

/// Mean cross-entropy loss plus L2 penalty, and its gradient with respect to `W`.
pub type LossAndGrad<F> = (F, Array2<F>);

/// Which kernel computes the loss. Both return the same values up to rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    Naive,
    #[default]
    Vectorized,
}

impl Strategy {
    pub fn compute<F: Scalar>(
        &self,
        w: ArrayView2<F>,
        x: ArrayView2<F>,
        y: ArrayView1<usize>,
        reg: F,
    ) -> Result<LossAndGrad<F>, SoftmaxError> {
        match self {
            Strategy::Naive => softmax_loss_naive(w, x, y, reg),
            Strategy::Vectorized => softmax_loss_vectorized(w, x, y, reg),
        }
    }
}

/// Validates `W` (D, C), `X` (N, D), `y` (N,) and `reg` before any arithmetic.
pub(crate) fn check_inputs<F: Scalar>(
    w: &ArrayView2<F>,
    x: &ArrayView2<F>,
    y: &ArrayView1<usize>,
    reg: F,
) -> Result<(), SoftmaxError> {
    if x.ncols() != w.nrows() {
        return Err(SoftmaxError::shape_mismatch(
            "X·W",
            [x.nrows(), w.nrows()],
            x.shape(),
        ));
    }
    if y.len() != x.nrows() {
        return Err(SoftmaxError::shape_mismatch("labels", [x.nrows()], y.shape()));
    }
    if x.nrows() == 0 {
        return Err(SoftmaxError::EmptyBatch);
    }
    if reg.is_nan() || reg < F::zero() {
        return Err(SoftmaxError::NegativeRegularization);
    }

    let num_classes = w.ncols();
    match y.iter().enumerate().find(|&(_, &label)| label >= num_classes) {
        Some((index, &label)) => Err(SoftmaxError::LabelOutOfRange {
            index,
            label,
            num_classes,
        }),
        None => Ok(()),
    }
}

/// `0.5 * reg * sum(W^2)`
pub(crate) fn l2_penalty<F: Scalar>(w: &ArrayView2<F>, reg: F) -> F {
    let sum_sq = w.fold(F::zero(), |acc, &v| acc + v * v);
    F::from_f64(0.5) * reg * sum_sq
}

pub(crate) fn one_hot<F: Scalar>(y: ArrayView1<usize>, num_classes: usize) -> Array2<F> {
    Array2::from_shape_fn((y.len(), num_classes), |(i, c)| {
        if y[i] == c {
            F::one()
        } else {
            F::zero()
        }
    })
}
