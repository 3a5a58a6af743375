use std::fmt::Debug;
use std::iter::Sum;

use ndarray::{LinalgScalar, ScalarOperand};
use num_traits::{Float, NumAssign};

/// Element type accepted by the loss kernels.
pub trait Scalar: Float + NumAssign + LinalgScalar + ScalarOperand + Sum + Debug {
    fn from_usize(n: usize) -> Self;
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                fn from_usize(n: usize) -> Self {
                    n as $t
                }

                fn from_f64(v: f64) -> Self {
                    v as $t
                }
            }
        )*
    };
}

impl_scalar!(f32, f64);
