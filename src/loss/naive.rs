use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::SoftmaxError;
use crate::loss::{check_inputs, l2_penalty, LossAndGrad};
use crate::nn::functions::softmax_vector;
use crate::traits::Scalar;

/// Softmax loss and gradient, one example at a time.
///
/// `w` is (D, C), `x` is (N, D) and `y` holds N labels in `[0, C)`.
/// Returns the mean cross-entropy plus `0.5 * reg * sum(W^2)`, and
/// `dW` of shape (D, C).
pub fn softmax_loss_naive<F: Scalar>(
    w: ArrayView2<F>,
    x: ArrayView2<F>,
    y: ArrayView1<usize>,
    reg: F,
) -> Result<LossAndGrad<F>, SoftmaxError> {
    check_inputs(&w, &x, &y, reg)?;

    let num_train = x.nrows();
    let mut loss = F::zero();
    let mut dw = Array2::<F>::zeros(w.raw_dim());

    for (xi, &yi) in x.outer_iter().zip(y.iter()) {
        let scores = xi.dot(&w);
        let probs = softmax_vector(scores.view());
        loss -= probs[yi].ln();

        let outer = &xi.insert_axis(Axis(1)) * &probs.view().insert_axis(Axis(0));
        dw += &outer;
        let mut true_class = dw.column_mut(yi);
        true_class -= &xi;
    }

    let n = F::from_usize(num_train);
    loss /= n;
    dw /= n;

    loss += l2_penalty(&w, reg);
    dw.scaled_add(reg, &w);

    tracing::trace!(num_train, num_classes = w.ncols(), ?loss, "naive softmax loss");
    Ok((loss, dw))
}
