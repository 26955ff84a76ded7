// src/pilot.rs

//! A module specifying the shared interface for heading pilots.
//! A host autopilot selects one pilot at runtime and drives it once per
//! control cycle with the latest heading state. This module includes the
//! numeric bound shared across the crate, the steering modes, the pilot
//! configuration, and the trait every pilot implements.

pub mod basic;
pub use basic::*;

use core::str::FromStr;

use num_traits::Float;
use piddiy::Number as PiddiyNumber;

use crate::PilotError;

/// Custom trait to encapsulate base number requirements.
///
/// Satisfied by `f32` and `f64`.
pub trait Number: PiddiyNumber + Float + From<f32> {}

impl<T: PiddiyNumber + Float + From<f32>> Number for T {}

/// The reference the autopilot steers against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Magnetic compass heading.
    Compass,
    /// GPS course over ground.
    Gps,
    /// Apparent wind angle.
    Wind,
    /// True wind angle.
    TrueWind,
}

impl Mode {
    /// The mode name as exposed to clients.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Compass => "compass",
            Mode::Gps => "gps",
            Mode::Wind => "wind",
            Mode::TrueWind => "true wind",
        }
    }

    /// Returns `true` for modes that steer relative to the wind. These
    /// use the opposite feed-forward sign from compass-relative modes.
    pub fn is_wind_relative(self) -> bool {
        matches!(self, Mode::Wind | Mode::TrueWind)
    }
}

impl FromStr for Mode {
    type Err = PilotError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "compass" => Ok(Mode::Compass),
            "gps" => Ok(Mode::Gps),
            "wind" => Ok(Mode::Wind),
            "true wind" => Ok(Mode::TrueWind),
            _ => Err(PilotError::UnknownMode),
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Autopilot state read by a pilot each cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotState {
    /// Monotonic time of this cycle in seconds.
    pub time: f64,
    /// Current steering reference.
    pub mode: Mode,
    /// Whether computed commands are applied to the actuator.
    pub enabled: bool,
    /// Desired heading in degrees.
    pub heading_command: f64,
    /// Heading error in degrees.
    pub heading_error: f64,
    /// Accumulated heading error.
    pub heading_error_integral: f64,
    /// Low-passed gyro turn rate.
    pub gyro_rate: f64,
    /// Low-passed rate of change of the gyro turn rate.
    pub gyro_rate_of_rate: f64,
}

impl AutopilotState {
    /// Creates a disengaged compass-mode state at `time` with all
    /// measurements zero.
    pub fn new(time: f64) -> Self {
        Self {
            time,
            mode: Mode::Compass,
            enabled: false,
            heading_command: 0.0,
            heading_error: 0.0,
            heading_error_integral: 0.0,
            gyro_rate: 0.0,
            gyro_rate_of_rate: 0.0,
        }
    }
}

/// Configuration for the heading pilot filters and timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotConfig {
    /// Weight given to each new heading command difference by the rate filter.
    pub lowpass: f64,
    /// Seconds of command history retained for the reactive term.
    pub history_window: f64,
    /// Seconds without a rate update after which the feed-forward memory
    /// restarts from the current heading command.
    pub stale_timeout: f64,
}

impl PilotConfig {
    /// Creates a configuration with the reference values.
    ///
    /// Example Usage
    /// ```
    /// use basic_heading_pilot::{BasicPilot, PilotConfig};
    ///
    /// let mut config = PilotConfig::new();
    /// config.history_window = 5.0;
    ///
    /// let pilot = BasicPilot::with_config(config);
    /// ```
    pub fn new() -> Self {
        Self {
            lowpass: 0.1,
            history_window: 10.0,
            stale_timeout: 1.0,
        }
    }
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostic values published after each computing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PilotSignals {
    /// Filtered heading command rate.
    pub command_rate: f64,
    /// Command read back from the history after the reactive latency.
    pub reactive_value: f64,
    /// Last computed command, whether or not it was emitted.
    pub command: f64,
}

/// A trait for heading pilots that turn the autopilot state into an
/// actuator command once per control cycle.
pub trait HeadingPilot {
    /// The name the host selects this pilot by.
    fn name(&self) -> &'static str;

    /// Runs one control cycle.
    ///
    /// - `state`: The autopilot state for this cycle.
    /// - `reset`: Restart filters, typically after a mode or pilot switch.
    ///
    /// Returns the actuator command, or `None` if the autopilot is disengaged.
    fn process(&mut self, state: &AutopilotState, reset: bool) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mode names parse back to the same mode.
    #[test]
    fn test_mode_names() {
        for mode in [Mode::Compass, Mode::Gps, Mode::Wind, Mode::TrueWind] {
            assert_eq!(Ok(mode), mode.as_str().parse());
        }
        assert_eq!(Err(PilotError::UnknownMode), "rudder".parse::<Mode>());
    }

    /// Only the wind modes are wind-relative.
    #[test]
    fn test_mode_wind_relative() {
        assert!(!Mode::Compass.is_wind_relative());
        assert!(!Mode::Gps.is_wind_relative());
        assert!(Mode::Wind.is_wind_relative());
        assert!(Mode::TrueWind.is_wind_relative());
    }
}
