//! Running and batch means.
//!
//! One-shot reducers ([`mean`], [`weighted_mean`], [`geometric_mean`],
//! [`harmonic_mean`]) and stateful accumulators: [`RunningMean`] over every
//! value ever pushed, and [`Window`] over the most recent values.
//!
//! ```
//! use meanlib::{ArithmeticWindow, Value};
//!
//! let mut window = ArithmeticWindow::bounded(2)?;
//! window.update(1)?;
//! window.update(2)?;
//! assert_eq!(window.update(6)?, Some(Value::Real(4.0)));
//! # Ok::<(), meanlib::MeanError>(())
//! ```

mod accumulator;
pub mod config;
mod error;
mod stats;
mod value;
pub mod window;

pub use accumulator::{Accumulator, RunningMean};
pub use config::{Config, Kind, StreamConfig};
pub use error::MeanError;
pub use stats::{geometric_mean, harmonic_mean, mean, weighted_mean};
pub use value::Value;
pub use window::{ArithmeticWindow, GeometricWindow, HarmonicWindow, MaxSize, MeanKind, Window};
