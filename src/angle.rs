// src/angle.rs

//! # Circular Angle Arithmetic
//!
//! Headings wrap at 360 degrees, so the difference between two headings
//! must be resolved to its shortest signed equivalent before it is used as
//! a control input.

use crate::Number;

/// Resolves an angular difference in degrees to the equivalent angle in
/// the half-open range (-180, 180].
///
/// ```
/// use basic_heading_pilot::angle::resolve;
///
/// assert_eq!(resolve(350.0_f64 - 10.0), -20.0);
/// assert_eq!(resolve(-180.0_f64), 180.0);
/// ```
pub fn resolve<T: Number>(delta: T) -> T {
    let full: T = From::from(360.0_f32);
    let half: T = From::from(180.0_f32);

    let wrapped = delta - (delta / full).floor() * full;
    if half < wrapped {
        wrapped - full
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    /// Differences that do not wrap are returned as they are.
    #[test]
    fn test_resolve_in_range() {
        assert!(value_close(0.0, resolve(0.0)));
        assert!(value_close(45.5, resolve(45.5)));
        assert!(value_close(-179.0, resolve(-179.0)));
        assert!(value_close(180.0, resolve(180.0)));
    }

    /// Crossing north yields the short way around.
    #[test]
    fn test_resolve_across_north() {
        assert!(value_close(20.0, resolve(10.0 - 350.0)));
        assert!(value_close(-20.0, resolve(350.0 - 10.0)));
        assert!(value_close(180.0, resolve(-180.0)));
        assert!(value_close(1.0, resolve(721.0)));
        assert!(value_close(-1.0, resolve(-721.0)));
    }

    /// Every pair of headings resolves into (-180, 180] and stays
    /// congruent to the raw difference.
    #[test]
    fn test_resolve_range_and_congruence() {
        let mut a = -725.0;
        while a < 725.0 {
            let mut b = -365.0;
            while b < 365.0 {
                let raw: f64 = a - b;
                let resolved = resolve(raw);
                assert!(-180.0 < resolved && resolved <= 180.0, "{raw} -> {resolved}");
                assert!(angle_equivalent(raw, resolved), "{raw} -> {resolved}");
                b += 17.25;
            }
            a += 13.5;
        }
    }

    /// Single precision resolves the same way.
    #[test]
    fn test_resolve_f32() {
        let resolved: f32 = resolve(190.0_f32);
        assert!(value_close(-170.0, resolved as f64));
    }
}
