//! Reducing parameter holders to plain numbers.

use crate::error::CurveError;
use crate::traits::NumericSource;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Extracts the current value of `source`.
pub fn coerce<S: NumericSource + ?Sized>(source: &S) -> Result<f64, CurveError> {
    source.numeric_value()
}

macro_rules! lossless_source {
    ($($t:ty),*) => {
        $(
            impl NumericSource for $t {
                fn numeric_value(&self) -> Result<f64, CurveError> {
                    Ok(f64::from(*self))
                }
            }
        )*
    };
}

lossless_source!(f64, f32, i8, i16, i32, u8, u16, u32);

macro_rules! widening_source {
    ($($t:ty),*) => {
        $(
            impl NumericSource for $t {
                fn numeric_value(&self) -> Result<f64, CurveError> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

widening_source!(i64, u64, isize, usize);

impl NumericSource for str {
    fn numeric_value(&self) -> Result<f64, CurveError> {
        self.trim()
            .parse::<f64>()
            .map_err(|_| CurveError::conversion::<str>())
    }
}

impl NumericSource for String {
    fn numeric_value(&self) -> Result<f64, CurveError> {
        self.trim()
            .parse::<f64>()
            .map_err(|_| CurveError::conversion::<String>())
    }
}

impl<T: NumericSource + ?Sized> NumericSource for &T {
    fn numeric_value(&self) -> Result<f64, CurveError> {
        (**self).numeric_value()
    }
}

impl<T: NumericSource + ?Sized> NumericSource for Box<T> {
    fn numeric_value(&self) -> Result<f64, CurveError> {
        (**self).numeric_value()
    }
}

impl<T: NumericSource + ?Sized> NumericSource for Rc<T> {
    fn numeric_value(&self) -> Result<f64, CurveError> {
        (**self).numeric_value()
    }
}

impl<T: NumericSource + ?Sized> NumericSource for Arc<T> {
    fn numeric_value(&self) -> Result<f64, CurveError> {
        (**self).numeric_value()
    }
}

/// A shared, thread-safe numeric cell, the native counterpart of a UI slider.
///
/// Clones share the same storage: setting the value through one handle is
/// seen by every bound curve holding another.
#[derive(Debug, Clone)]
pub struct LiveValue {
    bits: Arc<AtomicU64>,
}

impl LiveValue {
    pub fn new(value: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(value.to_bits())),
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl From<f64> for LiveValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl NumericSource for LiveValue {
    fn numeric_value(&self) -> Result<f64, CurveError> {
        Ok(self.get())
    }
}
