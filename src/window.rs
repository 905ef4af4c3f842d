use crate::error::MeanError;
use crate::stats::{
    check_positive, check_reciprocal, compute_geometric, compute_harmonic, compute_mean,
};
use crate::value::Value;
use serde::Deserialize;
use std::{
    collections::VecDeque, fmt::Debug, marker::PhantomData, num::NonZeroUsize, str::FromStr,
};

/// Maximum number of values a [`Window`] retains.
///
/// Deserializes from either an integer or a string holding one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMaxSize")]
pub struct MaxSize(NonZeroUsize);

impl MaxSize {
    /// # Errors
    /// [`MeanError::InvalidConfiguration`] if `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self, MeanError> {
        NonZeroUsize::new(max_size)
            .map(MaxSize)
            .ok_or_else(|| MeanError::InvalidConfiguration(max_size.to_string()))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

macro_rules! impl_max_size_from_int {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for MaxSize {
                type Error = MeanError;

                fn try_from(max_size: $ty) -> Result<Self, Self::Error> {
                    usize::try_from(max_size)
                        .map_err(|_| MeanError::InvalidConfiguration(max_size.to_string()))
                        .and_then(MaxSize::new)
                }
            }
        )*
    };
}

impl_max_size_from_int!(i32, i64, u32, usize);

impl FromStr for MaxSize {
    type Err = MeanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let max_size: i64 = s
            .trim()
            .parse()
            .map_err(|_| MeanError::InvalidConfiguration(s.to_string()))?;
        MaxSize::try_from(max_size)
    }
}

impl TryFrom<&str> for MaxSize {
    type Error = MeanError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMaxSize {
    Int(i64),
    Text(String),
}

impl TryFrom<RawMaxSize> for MaxSize {
    type Error = MeanError;

    fn try_from(raw: RawMaxSize) -> Result<Self, Self::Error> {
        match raw {
            RawMaxSize::Int(max_size) => MaxSize::try_from(max_size),
            RawMaxSize::Text(max_size) => max_size.parse(),
        }
    }
}

/// Admission rule and reducer of a [`Window`].
pub trait MeanKind {
    /// What the window stores once a value is admitted.
    type Item: Copy + Debug + Into<Value>;

    const NAME: &'static str;

    /// Converts `value` into a window item, or rejects it.
    fn admit(value: Value) -> Result<Self::Item, MeanError>;

    /// Mean of admitted items; `None` if there are none.
    fn reduce<I: ExactSizeIterator<Item = Self::Item>>(items: I) -> Option<Value>;
}

/// Arithmetic mean over real and complex values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arithmetic;

impl MeanKind for Arithmetic {
    type Item = Value;

    const NAME: &'static str = "arithmetic";

    fn admit(value: Value) -> Result<Value, MeanError> {
        Ok(value)
    }

    fn reduce<I: ExactSizeIterator<Item = Value>>(items: I) -> Option<Value> {
        compute_mean(items)
    }
}

/// Geometric mean over strictly positive reals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geometric;

impl MeanKind for Geometric {
    type Item = f64;

    const NAME: &'static str = "geometric";

    fn admit(value: Value) -> Result<f64, MeanError> {
        check_positive(value)
    }

    fn reduce<I: ExactSizeIterator<Item = f64>>(items: I) -> Option<Value> {
        compute_geometric(items)
    }
}

/// Harmonic mean over strictly positive reals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Harmonic;

impl MeanKind for Harmonic {
    type Item = f64;

    const NAME: &'static str = "harmonic";

    fn admit(value: Value) -> Result<f64, MeanError> {
        check_reciprocal(value)
    }

    fn reduce<I: ExactSizeIterator<Item = f64>>(items: I) -> Option<Value> {
        compute_harmonic(items)
    }
}

pub type ArithmeticWindow = Window<Arithmetic>;
pub type GeometricWindow = Window<Geometric>;
pub type HarmonicWindow = Window<Harmonic>;

/// Sliding window of the most recent values, optionally bounded.
///
/// Values are kept in insertion order; once the window grows past its
/// [`MaxSize`] the oldest ones are evicted. Failed updates leave the window untouched: every value is admitted before
/// anything is appended or evicted.
#[derive(Debug, Clone)]
pub struct Window<K: MeanKind> {
    vals: VecDeque<K::Item>,
    max_size: Option<MaxSize>,
    kind: PhantomData<K>,
}

impl<K: MeanKind> Window<K> {
    /// Create an unbounded window.
    pub fn new() -> Self {
        Self {
            vals: VecDeque::new(),
            max_size: None,
            kind: PhantomData,
        }
    }

    /// Create a window that retains at most `max_size` values.
    pub fn with_max_size(max_size: MaxSize) -> Self {
        log::debug!("created {} window with max size {}", K::NAME, max_size.get());
        Self {
            vals: VecDeque::new(),
            max_size: Some(max_size),
            kind: PhantomData,
        }
    }

    /// Create a bounded window from anything that can be read as a maximum
    /// size, such as `5` or `"5"`.
    ///
    /// # Errors
    /// [`MeanError::InvalidConfiguration`] if `max_size` is not a positive integer.
    pub fn bounded<T>(max_size: T) -> Result<Self, MeanError>
    where
        T: TryInto<MaxSize, Error = MeanError>,
    {
        Ok(Self::with_max_size(max_size.try_into()?))
    }

    /// Push a single value and return the new mean.
    ///
    /// # Errors
    /// Whatever the mean kind reports for an inadmissible value; the window is
    /// left unchanged.
    pub fn update(&mut self, value: impl Into<Value>) -> Result<Option<Value>, MeanError> {
        let item = K::admit(value.into())?;
        self.vals.push_back(item);
        self.evict();
        Ok(self.current_mean())
    }

    /// Push a batch of values and return the new mean.
    ///
    /// An empty batch changes nothing. If any value of the batch is rejected,
    /// none of them is applied.
    pub fn update_list<V: Copy + Into<Value>>(
        &mut self,
        values: &[V],
    ) -> Result<Option<Value>, MeanError> {
        if values.is_empty() {
            return Ok(self.current_mean());
        }

        let items = values
            .iter()
            .map(|&val| K::admit(val.into()))
            .collect::<Result<Vec<_>, _>>()?;
        self.vals.extend(items);
        self.evict();
        Ok(self.current_mean())
    }

    pub fn current_mean(&self) -> Option<Value> {
        K::reduce(self.vals.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    pub fn max_size(&self) -> Option<MaxSize> {
        self.max_size
    }

    /// Retained values, oldest first.
    pub fn values(&self) -> impl ExactSizeIterator<Item = K::Item> + '_ {
        self.vals.iter().copied()
    }

    fn evict(&mut self) {
        let Some(max_size) = self.max_size else {
            return;
        };
        let excess = self.vals.len().saturating_sub(max_size.get());
        if excess > 0 {
            self.vals.drain(..excess);
            log::trace!("evicted {excess} values from {} window", K::NAME);
        }
    }
}

impl<K: MeanKind> Default for Window<K> {
    fn default() -> Self {
        Self::new()
    }
}
