use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::SoftmaxError;
use crate::loss::{check_inputs, l2_penalty, one_hot, LossAndGrad};
use crate::nn::functions::softmax;
use crate::traits::Scalar;

/// Softmax loss and gradient over the whole batch with matrix operations.
///
/// Same inputs and outputs as [`softmax_loss_naive`](crate::loss::softmax_loss_naive).
pub fn softmax_loss_vectorized<F: Scalar>(
    w: ArrayView2<F>,
    x: ArrayView2<F>,
    y: ArrayView1<usize>,
    reg: F,
) -> Result<LossAndGrad<F>, SoftmaxError> {
    check_inputs(&w, &x, &y, reg)?;

    let num_train = x.nrows();
    let n = F::from_usize(num_train);

    let scores = x.dot(&w);
    let probs = softmax(scores.view());

    let correct = Array1::from_shape_fn(num_train, |i| probs[[i, y[i]]]);
    let loss = -correct.mapv(F::ln).sum() / n + l2_penalty(&w, reg);

    // probs stays untouched; dscores is a new array
    let dscores = &probs - &one_hot::<F>(y, w.ncols());
    let mut dw = x.t().dot(&dscores) / n;
    dw.scaled_add(reg, &w);

    tracing::trace!(num_train, num_classes = w.ncols(), ?loss, "vectorized softmax loss");
    Ok((loss, dw))
}
