pub mod error;
pub mod gradcheck;
pub mod loss;
pub mod nn;
pub mod traits;

pub use error::SoftmaxError;
pub use loss::{softmax_loss_naive, softmax_loss_vectorized, LossAndGrad, Strategy};
pub use nn::SoftmaxClassifier;
