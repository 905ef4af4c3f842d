use crate::error::MeanError;
use num::complex::Complex64;
use std::{
    fmt,
    iter::Sum,
    ops::{Add, Div, Mul},
    str::FromStr,
};

/// A real or complex number.
///
/// Arithmetic between a real and a complex value promotes to complex.
/// Geometric and harmonic means only accept [`Value::Real`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Real(f64),
    Complex(Complex64),
}

impl Value {
    /// Additive identity; the starting sum of every accumulation.
    pub const ZERO: Value = Value::Real(0.0);

    /// The real part if the value is real, `None` if it is complex.
    pub fn as_real(&self) -> Option<f64> {
        match *self {
            Value::Real(val) => Some(val),
            Value::Complex(_) => None,
        }
    }

    pub fn to_complex(self) -> Complex64 {
        match self {
            Value::Real(val) => Complex64::new(val, 0.0),
            Value::Complex(val) => val,
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Value::Real(val) => val == 0.0,
            Value::Complex(val) => val.re == 0.0 && val.im == 0.0,
        }
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Real(a), Value::Real(b)) => Value::Real(a + b),
            (a, b) => Value::Complex(a.to_complex() + b.to_complex()),
        }
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Real(a), Value::Real(b)) => Value::Real(a * b),
            (a, b) => Value::Complex(a.to_complex() * b.to_complex()),
        }
    }
}

impl Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Real(a), Value::Real(b)) => Value::Real(a / b),
            // Dividing by a real scales each component.
            (Value::Complex(a), Value::Real(b)) => Value::Complex(a / b),
            (a, b) => Value::Complex(a.to_complex() / b.to_complex()),
        }
    }
}

impl Sum for Value {
    fn sum<I: Iterator<Item = Value>>(iter: I) -> Value {
        iter.fold(Value::ZERO, Add::add)
    }
}

macro_rules! impl_from_real {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(val: $ty) -> Self {
                    Value::Real(val as f64)
                }
            }
        )*
    };
}

impl_from_real!(f64, f32, i32, i64, u32, usize);

impl From<Complex64> for Value {
    fn from(val: Complex64) -> Self {
        Value::Complex(val)
    }
}

/// Reals print like `40.0`, complex values like `(10.4+0.6j)`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(val) => write!(f, "{val:?}"),
            Value::Complex(val) => {
                let sign = if val.im.is_sign_negative() { "" } else { "+" };
                write!(f, "({:?}{sign}{:?}j)", val.re, val.im)
            }
        }
    }
}

/// Parses real literals (`3`, `-2.5`, `1e3`) and complex literals written as
/// `2+3j`, `2-3j`, `3j` or `(2+3j)`. `i` is accepted in place of `j`.
impl FromStr for Value {
    type Err = MeanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let inner = text
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(text)
            .trim();

        if let Ok(val) = inner.parse::<f64>() {
            return Ok(Value::Real(val));
        }

        parse_complex(inner)
            .map(Value::Complex)
            .ok_or_else(|| MeanError::type_mismatch(text, "a real or complex number"))
    }
}

fn parse_complex(text: &str) -> Option<Complex64> {
    let body = text.strip_suffix(|c: char| c == 'j' || c == 'i')?;

    // Split before the last sign that is neither leading nor part of an exponent.
    let bytes = body.as_bytes();
    let split = body
        .char_indices()
        .rev()
        .find(|&(idx, c)| {
            idx > 0 && (c == '+' || c == '-') && !matches!(bytes[idx - 1], b'e' | b'E')
        })
        .map(|(idx, _)| idx);

    match split {
        Some(idx) => {
            let re = body[..idx].parse().ok()?;
            let im = parse_imag(&body[idx..])?;
            Some(Complex64::new(re, im))
        }
        None => Some(Complex64::new(0.0, parse_imag(body)?)),
    }
}

fn parse_imag(text: &str) -> Option<f64> {
    match text {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => text.parse().ok(),
    }
}
