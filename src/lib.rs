// src/lib.rs

//! # Basic Heading Pilot
//!
//! This crate provides a `no_std`, no-alloc heading control step for marine
//! autopilots. Once per control cycle it turns the heading error, its
//! integral, the gyro rate and rate of rate, and the heading command into a
//! single rudder actuator command.
//!
//! The command is a gain-weighted sum of PID feedback, a second-derivative
//! term, a position-root term, feed-forward from the low-passed heading
//! command rate, and a reactive term that reads back a recent command to
//! compensate for steering lag.
//!
//! Sensor fusion, parameter transport, persistence and the servo driver are
//! left to the host. Gains live in a [`GainSet`] that the host may share
//! with another execution context for remote tuning.

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

pub mod angle;
pub mod error;
pub mod filter;
pub mod gain;
pub mod history;
pub mod pid;
pub mod pilot;

#[doc(inline)]
pub use error::PilotError;
#[doc(inline)]
pub use gain::{Gain, GainId, GainSet};
#[doc(inline)]
pub use pilot::*;

#[cfg(test)]
mod test_utils;
