use crate::error::MeanError;
use crate::value::Value;
use crate::window::{MeanKind, Window};

/// Stateful mean that ingests values over time.
///
/// Implemented by [`RunningMean`] and every [`Window`], so callers can pick a
/// variant at runtime and hold it as `Box<dyn Accumulator>`.
pub trait Accumulator {
    /// Push a single value and return the new mean.
    fn update(&mut self, value: Value) -> Result<Option<Value>, MeanError>;

    /// Push a batch of values and return the new mean.
    fn update_list(&mut self, values: &[Value]) -> Result<Option<Value>, MeanError>;

    fn current_mean(&self) -> Option<Value>;

    /// Number of values the mean is currently computed over.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mean of every value ever pushed, kept as a running sum and count.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningMean {
    sum: Value,
    count: usize,
}

impl RunningMean {
    pub fn new() -> Self {
        Self {
            sum: Value::ZERO,
            count: 0,
        }
    }

    pub fn update(&mut self, value: impl Into<Value>) -> Value {
        self.sum = self.sum + value.into();
        self.count += 1;
        self.sum / Value::from(self.count)
    }

    /// Push every value of `values`; an empty batch changes nothing.
    pub fn update_list<V: Copy + Into<Value>>(&mut self, values: &[V]) -> Option<Value> {
        for &val in values {
            self.update(val);
        }
        self.current_mean()
    }

    pub fn current_mean(&self) -> Option<Value> {
        (self.count > 0).then(|| self.sum / Value::from(self.count))
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for RunningMean {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for RunningMean {
    fn update(&mut self, value: Value) -> Result<Option<Value>, MeanError> {
        Ok(Some(RunningMean::update(self, value)))
    }

    fn update_list(&mut self, values: &[Value]) -> Result<Option<Value>, MeanError> {
        Ok(RunningMean::update_list(self, values))
    }

    fn current_mean(&self) -> Option<Value> {
        RunningMean::current_mean(self)
    }

    fn len(&self) -> usize {
        self.count
    }
}

impl<K: MeanKind> Accumulator for Window<K> {
    fn update(&mut self, value: Value) -> Result<Option<Value>, MeanError> {
        Window::update(self, value)
    }

    fn update_list(&mut self, values: &[Value]) -> Result<Option<Value>, MeanError> {
        Window::update_list(self, values)
    }

    fn current_mean(&self) -> Option<Value> {
        Window::current_mean(self)
    }

    fn len(&self) -> usize {
        Window::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{ArithmeticWindow, GeometricWindow, HarmonicWindow};
    use num::complex::Complex64;

    #[test]
    fn running_mean_accepts_complex_values() {
        let mut acc = RunningMean::new();
        assert_eq!(acc.current_mean(), None);

        assert_eq!(acc.update(5), Value::Real(5.0));
        assert_eq!(acc.count(), 1);

        acc.update(10);
        acc.update(15);
        acc.update(20);
        assert_eq!(acc.current_mean(), Some(Value::Real(12.5)));
        assert_eq!(acc.count(), 4);

        acc.update(Complex64::new(2.0, 3.0));
        assert_eq!(
            acc.current_mean(),
            Some(Value::Complex(Complex64::new(10.4, 0.6)))
        );
        assert_eq!(acc.count(), 5);
    }

    #[test]
    fn running_mean_batch_matches_single_updates() {
        let mut single = RunningMean::new();
        for val in [1.5, 2.5, 8.0] {
            single.update(val);
        }
        let mut batch = RunningMean::new();
        assert_eq!(batch.update_list::<f64>(&[]), None);
        batch.update_list(&[1.5, 2.5, 8.0]);
        assert_eq!(single, batch);
    }

    #[test]
    fn accumulators_behind_trait_objects() {
        let mut accs: Vec<Box<dyn Accumulator>> = vec![
            Box::new(RunningMean::new()),
            Box::new(ArithmeticWindow::bounded(2).unwrap()),
            Box::new(GeometricWindow::bounded(2).unwrap()),
            Box::new(HarmonicWindow::bounded(2).unwrap()),
        ];
        let values = [Value::from(1), Value::from(4), Value::from(4)];

        for acc in &mut accs {
            assert!(acc.is_empty());
            acc.update(values[0]).unwrap();
            acc.update_list(&values[1..]).unwrap();
        }

        let means: Vec<_> = accs.iter().map(|acc| acc.current_mean()).collect();
        assert_eq!(
            means,
            vec![
                Some(Value::Real(3.0)),
                Some(Value::Real(4.0)),
                Some(Value::Real(4.0)),
                Some(Value::Real(4.0)),
            ]
        );
        let lens: Vec<_> = accs.iter().map(|acc| acc.len()).collect();
        assert_eq!(lens, vec![3, 2, 2, 2]);
    }

    #[test]
    fn failed_update_through_trait_leaves_state() {
        let mut acc: Box<dyn Accumulator> = Box::new(GeometricWindow::new());
        acc.update(Value::from(9)).unwrap();
        assert!(acc.update(Value::from(Complex64::new(0.0, 1.0))).is_err());
        assert_eq!(acc.len(), 1);
        assert_eq!(acc.current_mean(), Some(Value::Real(9.0)));
    }
}
