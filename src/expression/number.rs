use std::fmt;

use crate::expression::errors::ArithmeticError;

/// Floats at or above this magnitude are written in exponent form
const EXPONENT_UPPER: f64 = 1e16;
/// Non-zero floats below this magnitude are written in exponent form
const EXPONENT_LOWER: f64 = 1e-4;

/// Host-native numeric value: integers stay exact until a float is involved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn checked_add(self, rhs: Number) -> Result<Number, ArithmeticError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                a.checked_add(b).map(Number::Int).ok_or(ArithmeticError::Overflow)
            }
            (a, b) => Ok(Number::Float(a.as_f64() + b.as_f64())),
        }
    }

    pub fn checked_sub(self, rhs: Number) -> Result<Number, ArithmeticError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                a.checked_sub(b).map(Number::Int).ok_or(ArithmeticError::Overflow)
            }
            (a, b) => Ok(Number::Float(a.as_f64() - b.as_f64())),
        }
    }

    pub fn checked_mul(self, rhs: Number) -> Result<Number, ArithmeticError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                a.checked_mul(b).map(Number::Int).ok_or(ArithmeticError::Overflow)
            }
            (a, b) => Ok(Number::Float(a.as_f64() * b.as_f64())),
        }
    }

    pub fn checked_neg(self) -> Result<Number, ArithmeticError> {
        match self {
            Number::Int(a) => a.checked_neg().map(Number::Int).ok_or(ArithmeticError::Overflow),
            Number::Float(f) => Ok(Number::Float(-f)),
        }
    }

    /// Quotient rounded toward negative infinity
    pub fn floor_div(self, rhs: Number) -> Result<Number, ArithmeticError> {
        self.div_mod(rhs).map(|(quotient, _)| quotient)
    }

    /// Remainder carrying the sign of the divisor
    pub fn floor_mod(self, rhs: Number) -> Result<Number, ArithmeticError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => int_floor_mod(a, b).map(Number::Int),
            _ => self.div_mod(rhs).map(|(_, remainder)| remainder),
        }
    }

    /// Floor quotient and remainder such that `quotient * rhs + remainder == self`
    pub fn div_mod(self, rhs: Number) -> Result<(Number, Number), ArithmeticError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                let (quotient, remainder) = int_div_mod(a, b)?;
                Ok((Number::Int(quotient), Number::Int(remainder)))
            }
            (a, b) => {
                let (quotient, remainder) = float_div_mod(a.as_f64(), b.as_f64())?;
                Ok((Number::Float(quotient), Number::Float(remainder)))
            }
        }
    }

    /// Integer powers stay exact for non-negative exponents; everything else goes through `f64`
    pub fn pow(self, rhs: Number) -> Result<Number, ArithmeticError> {
        match (self, rhs) {
            (Number::Int(base), Number::Int(exponent)) if exponent >= 0 => {
                int_pow(base, exponent).map(Number::Int)
            }
            (Number::Int(0), Number::Int(_)) => Err(ArithmeticError::ZeroToNegativePower),
            (a, b) => float_pow(a.as_f64(), b.as_f64()).map(Number::Float),
        }
    }
}

fn int_div_mod(a: i64, b: i64) -> Result<(i64, i64), ArithmeticError> {
    let remainder = int_floor_mod(a, b)?;
    let mut quotient = a.checked_div(b).ok_or(ArithmeticError::Overflow)?;
    if remainder != a % b {
        quotient -= 1;
    }
    Ok((quotient, remainder))
}

/// Only the quotient of `i64::MIN / -1` overflows, its remainder is 0
fn int_floor_mod(a: i64, b: i64) -> Result<i64, ArithmeticError> {
    if b == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    let remainder = a.wrapping_rem(b);
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}

fn float_div_mod(a: f64, b: f64) -> Result<(f64, f64), ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }

    let mut remainder = a % b;
    let mut div = (a - remainder) / b;
    if remainder != 0.0 {
        if (b < 0.0) != (remainder < 0.0) {
            remainder += b;
            div -= 1.0;
        }
    } else {
        remainder = 0.0_f64.copysign(b);
    }

    let quotient = if div != 0.0 {
        let floored = div.floor();
        // `div` is exact up to rounding, so snap back when floor undershoots
        if div - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        }
    } else {
        0.0_f64.copysign(a / b)
    };

    Ok((quotient, remainder))
}

fn int_pow(base: i64, exponent: i64) -> Result<i64, ArithmeticError> {
    match base {
        0 => Ok(if exponent == 0 { 1 } else { 0 }),
        1 => Ok(1),
        -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => u32::try_from(exponent)
            .ok()
            .and_then(|e| base.checked_pow(e))
            .ok_or(ArithmeticError::Overflow),
    }
}

pub(crate) fn float_pow(base: f64, exponent: f64) -> Result<f64, ArithmeticError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ArithmeticError::ZeroToNegativePower);
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(ArithmeticError::ComplexResult);
    }

    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(ArithmeticError::Overflow);
    }
    Ok(result)
}

fn fmt_float(value: f64, f: &mut fmt::Formatter) -> fmt::Result {
    if value.is_nan() {
        return write!(f, "nan");
    }
    if value.is_infinite() {
        return write!(f, "{}", if value < 0.0 { "-inf" } else { "inf" });
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        let rendered = format!("{:e}", value);
        let (mantissa, exponent) = rendered.split_once('e').ok_or(fmt::Error)?;
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if value.fract() == 0.0 {
        write!(f, "{:.1}", value)
    } else {
        write!(f, "{}", value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(value) => fmt_float(*value, f),
        }
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::{float_div_mod, int_div_mod, int_floor_mod, int_pow};
    use crate::expression::errors::ArithmeticError;

    #[test]
    fn test_int_div_mod_floor_semantics() {
        assert_eq!(int_div_mod(7, 2), Ok((3, 1)));
        assert_eq!(int_div_mod(-7, 2), Ok((-4, 1)));
        assert_eq!(int_div_mod(7, -2), Ok((-4, -1)));
        assert_eq!(int_div_mod(-7, -2), Ok((3, -1)));
        assert_eq!(int_div_mod(6, 3), Ok((2, 0)));
    }

    #[test]
    fn test_int_div_mod_edge_cases() {
        assert_eq!(int_div_mod(1, 0), Err(ArithmeticError::DivisionByZero));
        assert_eq!(int_div_mod(i64::MIN, -1), Err(ArithmeticError::Overflow));
        assert_eq!(int_floor_mod(i64::MIN, -1), Ok(0));
        assert_eq!(int_floor_mod(i64::MIN, 7), Ok(6));
        assert_eq!(int_floor_mod(1, 0), Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn test_float_div_mod() {
        assert_eq!(float_div_mod(7.5, 2.0), Ok((3.0, 1.5)));
        assert_eq!(float_div_mod(-7.5, 2.0), Ok((-4.0, 0.5)));
        assert_eq!(float_div_mod(7.5, -2.0), Ok((-4.0, -0.5)));
        assert_eq!(float_div_mod(1.0, 0.0), Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn test_int_pow() {
        assert_eq!(int_pow(2, 10), Ok(1024));
        assert_eq!(int_pow(-1, 1_000_001), Ok(-1));
        assert_eq!(int_pow(0, 0), Ok(1));
        assert_eq!(int_pow(10, 19), Err(ArithmeticError::Overflow));
    }
}
