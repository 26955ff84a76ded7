// src/pid/heading.rs

//! # Heading Feedback PID Module
//!
//! The heading-tracking layer already supplies the heading error and its
//! integral, and the gyro supplies the turn rate. This callback hands those
//! through as the proportional, integral and derivative terms so `piddiy`
//! can weight them with the P, I and D gains.

use crate::Number;
use piddiy::PidController;

/// Control data for the heading feedback callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadingControlData<T> {
    /// Heading error in degrees.
    pub heading_error: T,
    /// Accumulated heading error.
    pub heading_error_integral: T,
    /// Turn rate reported by the gyro.
    pub rate: T,
}

/// Heading feedback compute callback.
pub fn compute_heading<T: Number>(
    _pid: &mut PidController<T, HeadingControlData<T>>,
    data: HeadingControlData<T>,
) -> (T, T, T) {
    (data.heading_error, data.heading_error_integral, data.rate)
}

/// Builds a heading feedback controller with the given gains.
pub fn heading_pid<T: Number>(kp: T, ki: T, kd: T) -> PidController<T, HeadingControlData<T>> {
    let mut pid = PidController::new();
    pid.compute_fn(compute_heading)
        .set_point(T::zero())
        .kp(kp)
        .ki(ki)
        .kd(kd);
    pid
}
