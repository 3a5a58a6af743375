use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::SoftmaxError;
use crate::loss::{LossAndGrad, Strategy};
use crate::traits::Scalar;

pub mod functions;

/// Standard deviation of the initial weights. Keeps the initial loss close to `ln(C)`.
const INIT_SCALE: f64 = 1e-4;

/// Linear softmax classifier: scores are `X · W` with `W` of shape (D, C).
pub struct SoftmaxClassifier<F> {
    w: Array2<F>,
    reg: F,
    strategy: Strategy,
}

impl<F: Scalar> SoftmaxClassifier<F> {
    pub fn new(dim: usize, num_classes: usize) -> Self {
        let mut rng = rand::thread_rng();
        Self::with_rng(dim, num_classes, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(dim: usize, num_classes: usize, rng: &mut R) -> Self {
        let scale = F::from_f64(INIT_SCALE);
        let w = Array2::from_shape_fn((dim, num_classes), |_| {
            let v: f64 = rng.sample(StandardNormal);
            F::from_f64(v) * scale
        });
        Self::from_weights(w)
    }

    pub fn from_weights(w: Array2<F>) -> Self {
        Self {
            w,
            reg: F::zero(),
            strategy: Strategy::default(),
        }
    }

    pub fn with_reg(mut self, reg: F) -> Self {
        self.reg = reg;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn dim(&self) -> usize {
        self.w.nrows()
    }

    pub fn num_classes(&self) -> usize {
        self.w.ncols()
    }

    pub fn reg(&self) -> F {
        self.reg
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn weights(&self) -> ArrayView2<F> {
        self.w.view()
    }

    /// Mutable access for an external update step between loss evaluations.
    pub fn weights_mut(&mut self) -> &mut Array2<F> {
        &mut self.w
    }

    pub fn loss(&self, x: ArrayView2<F>, y: ArrayView1<usize>) -> Result<LossAndGrad<F>, SoftmaxError> {
        self.strategy.compute(self.w.view(), x, y, self.reg)
    }

    /// Index of the highest score for each row of `x`.
    ///
    /// NaN scores never win; a row with no comparable score predicts class 0.
    pub fn predict(&self, x: ArrayView2<F>) -> Result<Array1<usize>, SoftmaxError> {
        if x.ncols() != self.dim() {
            return Err(SoftmaxError::shape_mismatch(
                "predict",
                [x.nrows(), self.dim()],
                x.shape(),
            ));
        }
        let scores = x.dot(&self.w);
        Ok(scores.map_axis(Axis(1), |row| {
            row.iter()
                .enumerate()
                .fold((0, F::neg_infinity()), |(best, best_score), (c, &s)| {
                    if s > best_score {
                        (c, s)
                    } else {
                        (best, best_score)
                    }
                })
                .0
        }))
    }
}
