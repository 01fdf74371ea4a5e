// ABOUTME: Guarded arithmetic shared by every pipeline stage
// ABOUTME: Divisions fall back instead of producing NaN or infinity in displayed output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Divide, returning `fallback` when the denominator is zero or non-finite or
/// the quotient is not finite
#[must_use]
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return fallback;
    }
    let result = numerator / denominator;
    if result.is_finite() {
        result
    } else {
        fallback
    }
}

/// Replace NaN and infinities with zero
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round a suggested feed amount to one decimal, never below `minimum_kg`
///
/// Non-positive or non-finite amounts round to zero.
#[must_use]
pub fn round_feed(kg: f64, minimum_kg: f64) -> f64 {
    if !kg.is_finite() || kg <= 0.0 {
        return 0.0;
    }
    minimum_kg.max((kg * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_divide_fallbacks() {
        assert!((safe_divide(10.0, 4.0, 0.0) - 2.5).abs() < f64::EPSILON);
        assert!(safe_divide(1.0, 0.0, 0.0).abs() < f64::EPSILON);
        assert!(safe_divide(1.0, f64::NAN, f64::INFINITY).is_infinite());
        assert!((safe_divide(f64::MAX, 1e-300, 7.0) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_feed() {
        assert!((round_feed(0.04, 0.1) - 0.1).abs() < f64::EPSILON);
        assert!((round_feed(2.345, 0.1) - 2.3).abs() < 1e-12);
        assert!(round_feed(-1.0, 0.1).abs() < f64::EPSILON);
        assert!(round_feed(f64::NAN, 0.1).abs() < f64::EPSILON);
    }
}
