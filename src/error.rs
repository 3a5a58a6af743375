use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SoftmaxError {
    #[error("shape mismatch in '{operation}': expected {expected}, got {got}")]
    ShapeMismatch {
        operation: &'static str,
        expected: String,
        got: String,
    },

    #[error("label {label} at index {index} is outside [0, {num_classes})")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        num_classes: usize,
    },

    #[error("cannot average over an empty batch")]
    EmptyBatch,

    #[error("regularization strength must be non-negative")]
    NegativeRegularization,
}

impl SoftmaxError {
    pub(crate) fn shape_mismatch<E: std::fmt::Debug, G: std::fmt::Debug>(
        operation: &'static str,
        expected: E,
        got: G,
    ) -> Self {
        SoftmaxError::ShapeMismatch {
            operation,
            expected: format!("{:?}", expected),
            got: format!("{:?}", got),
        }
    }
}
