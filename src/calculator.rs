//! Arithmetic utility
//!
//! A stateless calculator over `f64` operands. The only guarded operation is
//! division, which reports a zero divisor as [`CalcError::DivideByZero`]
//! instead of producing an infinity or NaN.

use thiserror::Error;

/// Errors raised by [`Calculator`] operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Cannot divide by zero")]
    DivideByZero,
}

/// Stateless calculator. Any instance is interchangeable with any other.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calculator;

impl Calculator {
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn add(self, a: f64, b: f64) -> f64 {
        a + b
    }

    #[must_use]
    pub fn subtract(self, a: f64, b: f64) -> f64 {
        a - b
    }

    #[must_use]
    pub fn multiply(self, a: f64, b: f64) -> f64 {
        a * b
    }

    /// Divide `a` by `b`.
    ///
    /// Both `0.0` and `-0.0` count as a zero divisor.
    pub fn divide(self, a: f64, b: f64) -> Result<f64, CalcError> {
        if b == 0.0 {
            return Err(CalcError::DivideByZero);
        }
        Ok(a / b)
    }

    /// Raise `base` to the integer power `exponent`
    #[must_use]
    pub fn power(self, base: f64, exponent: i32) -> f64 {
        base.powi(exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> Calculator {
        Calculator::new()
    }

    #[test]
    fn test_add() {
        assert!((calc().add(2.0, 3.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_subtract() {
        assert!((calc().subtract(5.0, 3.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multiply() {
        assert!((calc().multiply(4.0, 3.0) - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_divide() {
        let result = calc().divide(10.0, 2.0).unwrap();
        assert!((result - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_divide_by_zero() {
        let err = calc().divide(10.0, 0.0).unwrap_err();
        assert_eq!(err, CalcError::DivideByZero);
        assert_eq!(err.to_string(), "Cannot divide by zero");
    }

    #[test]
    fn test_divide_by_negative_zero() {
        assert_eq!(calc().divide(1.0, -0.0), Err(CalcError::DivideByZero));
    }

    #[test]
    fn test_power() {
        assert!((calc().power(2.0, 3) - 8.0).abs() < f64::EPSILON);
        assert!((calc().power(2.0, 0) - 1.0).abs() < f64::EPSILON);
        assert!((calc().power(2.0, -1) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_instances_are_interchangeable() {
        let a = Calculator::new();
        let b = Calculator;
        assert_eq!(a, b);
        assert!((a.add(1.5, 2.5) - b.add(1.5, 2.5)).abs() < f64::EPSILON);
    }
}
