use ndarray::{indices, Array2, ArrayView2};
use rand::Rng;

use crate::error::SoftmaxError;
use crate::traits::Scalar;

#[derive(Debug, Clone, PartialEq)]
pub struct GradCheckSample<F> {
    pub index: (usize, usize),
    pub numerical: F,
    pub analytic: F,
    pub rel_error: F,
}

/// `|a - b| / max(|a| + |b|, tiny)`, where `tiny` is the smallest positive normal value.
pub fn rel_error<F: Scalar>(a: F, b: F) -> F {
    let denom = (a.abs() + b.abs()).max(F::min_positive_value());
    (a - b).abs() / denom
}

fn centered_difference<F, L>(
    f: &mut L,
    probe: &mut Array2<F>,
    index: (usize, usize),
    h: F,
) -> Result<F, SoftmaxError>
where
    F: Scalar,
    L: FnMut(ArrayView2<F>) -> Result<F, SoftmaxError>,
{
    let old = probe[index];
    probe[index] = old + h;
    let plus = f(probe.view())?;
    probe[index] = old - h;
    let minus = f(probe.view())?;
    probe[index] = old;
    Ok((plus - minus) / (h + h))
}

/// Centered finite-difference gradient of `f` at `w`, one entry at a time.
pub fn numerical_gradient<F, L>(mut f: L, w: ArrayView2<F>, h: F) -> Result<Array2<F>, SoftmaxError>
where
    F: Scalar,
    L: FnMut(ArrayView2<F>) -> Result<F, SoftmaxError>,
{
    let mut probe = w.to_owned();
    let mut grad = Array2::zeros(w.raw_dim());
    for index in indices(w.dim()) {
        grad[index] = centered_difference(&mut f, &mut probe, index, h)?;
    }
    Ok(grad)
}

/// Compares `analytic` against finite differences at `num_checks` random entries of `w`.
pub fn grad_check_sparse<F, L, R>(
    mut f: L,
    w: ArrayView2<F>,
    analytic: ArrayView2<F>,
    num_checks: usize,
    h: F,
    rng: &mut R,
) -> Result<Vec<GradCheckSample<F>>, SoftmaxError>
where
    F: Scalar,
    L: FnMut(ArrayView2<F>) -> Result<F, SoftmaxError>,
    R: Rng + ?Sized,
{
    if analytic.dim() != w.dim() {
        return Err(SoftmaxError::shape_mismatch(
            "gradient check",
            w.shape(),
            analytic.shape(),
        ));
    }
    if w.is_empty() {
        return Ok(vec![]);
    }

    let (rows, cols) = w.dim();
    let mut probe = w.to_owned();
    let mut samples = Vec::with_capacity(num_checks);
    for _ in 0..num_checks {
        let index = (rng.gen_range(0..rows), rng.gen_range(0..cols));
        let numerical = centered_difference(&mut f, &mut probe, index, h)?;
        let expected = analytic[index];
        let error = rel_error(numerical, expected);
        tracing::debug!(?index, ?numerical, analytic = ?expected, rel_error = ?error, "gradient check");
        samples.push(GradCheckSample {
            index,
            numerical,
            analytic: expected,
            rel_error: error,
        });
    }
    Ok(samples)
}

#[cfg(test)]
mod test {
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::error::SoftmaxError;
    use crate::gradcheck::{grad_check_sparse, numerical_gradient, rel_error};

    fn half_sum_sq(w: ndarray::ArrayView2<f64>) -> Result<f64, SoftmaxError> {
        Ok(0.5 * w.iter().map(|v| v * v).sum::<f64>())
    }

    #[test]
    fn relative_error() {
        assert_eq!(rel_error(0.0, 0.0), 0.0);
        assert_eq!(rel_error(1.0, 1.0), 0.0);
        assert_eq!(rel_error(1.0, -1.0), 1.0);
        assert!((rel_error(3.0f64, 1.0) - 0.5).abs() < 1e-15);

        // subnormal inputs are measured against the smallest normal value
        let tiny = f64::MIN_POSITIVE;
        assert_eq!(rel_error(tiny / 4.0, 0.0), 0.25);
        assert_eq!(rel_error(tiny / 4.0, -tiny / 4.0), 0.5);
    }

    #[test]
    fn quadratic_gradient_is_identity() -> Result<(), SoftmaxError> {
        let w = array![[1.0, -2.0, 0.5], [0.0, 3.0, -0.25]];
        let grad = numerical_gradient(half_sum_sq, w.view(), 1e-4)?;
        for (g, v) in grad.iter().zip(w.iter()) {
            assert!((g - v).abs() < 1e-8);
        }
        Ok(())
    }

    #[test]
    fn sparse_check_samples_requested_count() -> Result<(), SoftmaxError> {
        let w = array![[1.0, 2.0], [3.0, 4.0]];
        let mut rng = StdRng::seed_from_u64(0);
        let samples = grad_check_sparse(half_sum_sq, w.view(), w.view(), 10, 1e-4, &mut rng)?;
        assert_eq!(samples.len(), 10);
        assert!(samples.iter().all(|s| s.rel_error < 1e-8));
        assert!(samples.iter().all(|s| s.index.0 < 2 && s.index.1 < 2));
        Ok(())
    }

    #[test]
    fn sparse_check_rejects_mismatched_gradient() {
        let w = Array2::<f64>::zeros((2, 2));
        let analytic = Array2::<f64>::zeros((2, 3));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            grad_check_sparse(half_sum_sq, w.view(), analytic.view(), 3, 1e-4, &mut rng),
            Err(SoftmaxError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn loss_errors_propagate() {
        let w = Array2::<f64>::zeros((2, 2));
        let res = numerical_gradient(|_| Err(SoftmaxError::EmptyBatch), w.view(), 1e-4);
        assert_eq!(res, Err(SoftmaxError::EmptyBatch));
    }
}
