// src/test_utils.rs

//! This module contains utilities for testing.

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f64 = 1e-9;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_close(target: f64, value: f64) -> bool {
    (target - value).abs() < TEST_TOLERANCE
}

/// Checks if two floating point numbers are not close enough to be
/// considered equal.
pub fn value_not_close(target: f64, value: f64) -> bool {
    TEST_TOLERANCE <= (target - value).abs()
}

/// Checks if two angles in degrees describe the same direction, that is,
/// their difference is a whole number of turns.
pub fn angle_equivalent(target: f64, value: f64) -> bool {
    let turns = (target - value) / 360.0;
    (turns - turns.round()).abs() * 360.0 < 1e-6
}
