// src/pid.rs

//! # PID Control Module
//!
//! This module provides compute functions and control data structures
//! for the `piddiy` feedback core of the heading pilot.

pub mod heading;
pub use heading::*;
