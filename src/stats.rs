use crate::error::MeanError;
use crate::value::Value;

/// Arithmetic mean of `values`, or `None` if there are none.
///
/// ```
/// use meanlib::{Value, mean};
///
/// assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(Value::Real(3.0)));
/// assert_eq!(mean::<f64>(&[]), None);
/// ```
pub fn mean<V: Copy + Into<Value>>(values: &[V]) -> Option<Value> {
    compute_mean(values.iter().map(|&val| val.into()))
}

/// Weighted mean `Σ(vᵢ·wᵢ) / Σ(wᵢ)`.
///
/// Returns `None` when `values` is empty, whatever the weights.
///
/// # Errors
/// [`MeanError::LengthMismatch`] if the slices differ in length and
/// [`MeanError::ZeroWeightSum`] if the weights sum to zero.
pub fn weighted_mean<V, W>(values: &[V], weights: &[W]) -> Result<Option<Value>, MeanError>
where
    V: Copy + Into<Value>,
    W: Copy + Into<Value>,
{
    if values.is_empty() {
        return Ok(None);
    }
    if values.len() != weights.len() {
        return Err(MeanError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }

    let total_weight: Value = weights.iter().map(|&wgt| wgt.into()).sum();
    if total_weight.is_zero() {
        return Err(MeanError::ZeroWeightSum);
    }

    let weighted_sum: Value = values
        .iter()
        .zip(weights)
        .map(|(&val, &wgt)| val.into() * wgt.into())
        .sum();

    Ok(Some(weighted_sum / total_weight))
}

/// Geometric mean, the `n`-th root of the product of `n` values.
///
/// # Errors
/// [`MeanError::TypeMismatch`] for complex values and
/// [`MeanError::NegativeOrZeroValue`] for values that are not strictly positive.
pub fn geometric_mean<V: Copy + Into<Value>>(values: &[V]) -> Result<Option<Value>, MeanError> {
    let reals = values
        .iter()
        .map(|&val| check_positive(val.into()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(compute_geometric(reals.into_iter()))
}

/// Harmonic mean `n / Σ(1/vᵢ)`.
///
/// # Errors
/// [`MeanError::TypeMismatch`] for complex values, [`MeanError::ZeroValue`]
/// for an exact zero and [`MeanError::NegativeOrZeroValue`] for negatives.
pub fn harmonic_mean<V: Copy + Into<Value>>(values: &[V]) -> Result<Option<Value>, MeanError> {
    let reals = values
        .iter()
        .map(|&val| check_reciprocal(val.into()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(compute_harmonic(reals.into_iter()))
}

pub(crate) fn compute_mean<I: ExactSizeIterator<Item = Value>>(values: I) -> Option<Value> {
    let n_vals = values.len();
    if n_vals == 0 {
        return None;
    }
    let sum: Value = values.sum();
    Some(sum / Value::from(n_vals))
}

pub(crate) fn compute_geometric<I: ExactSizeIterator<Item = f64>>(values: I) -> Option<Value> {
    let n_vals = values.len();
    if n_vals == 0 {
        return None;
    }
    let product: f64 = values.product();
    Some(Value::Real(product.powf(1.0 / n_vals as f64)))
}

pub(crate) fn compute_harmonic<I: ExactSizeIterator<Item = f64>>(values: I) -> Option<Value> {
    let n_vals = values.len();
    if n_vals == 0 {
        return None;
    }
    let recip_sum: f64 = values.map(f64::recip).sum();
    Some(Value::Real(n_vals as f64 / recip_sum))
}

pub(crate) fn check_positive(value: Value) -> Result<f64, MeanError> {
    let val = value
        .as_real()
        .ok_or_else(|| MeanError::real_expected(&value))?;
    if val <= 0.0 {
        return Err(MeanError::NegativeOrZeroValue(val));
    }
    Ok(val)
}

/// Like [`check_positive`], but reports an exact zero as [`MeanError::ZeroValue`].
pub(crate) fn check_reciprocal(value: Value) -> Result<f64, MeanError> {
    let val = value
        .as_real()
        .ok_or_else(|| MeanError::real_expected(&value))?;
    if val == 0.0 {
        return Err(MeanError::ZeroValue);
    }
    if val < 0.0 {
        return Err(MeanError::NegativeOrZeroValue(val));
    }
    Ok(val)
}
