// src/pilot/basic.rs

//! # Basic Heading Pilot
//!
//! Gain-scheduled heading controller for a marine autopilot. Each cycle it
//! combines
//!
//! - PID feedback on the heading error, its integral and the gyro rate,
//! - a second-derivative term on the gyro rate of rate,
//! - a position-root term that compresses large heading errors,
//! - feed-forward from the low-passed rate of change of the heading command,
//! - a reactive term that reads back the command issued `Rtime` seconds ago
//!   to compensate for steering lag,
//!
//! into a single actuator command.
//!
//! ## Lazy evaluation
//!
//! While the autopilot is disengaged nothing is computed unless some client
//! is watching a gain. When one is, the cycle runs in full so the diagnostic
//! signals stay live, but the command is not emitted.
//!
//! ## Reactive history
//!
//! The history stores each command with the reactive contribution removed,
//! so the reactive term never feeds back on itself.

use num_traits::Float;
use piddiy::PidController;

use crate::angle::resolve;
use crate::filter::RateFilter;
use crate::gain::{GainId, GainInputs, GainSet};
use crate::history::TimedQueue;
use crate::pid::{heading_pid, HeadingControlData};
use crate::{AutopilotState, HeadingPilot, Mode, PilotConfig, PilotSignals};

/// Maximum number of commands kept for the reactive term.
pub const HISTORY_CAPACITY: usize = 512;

/// The basic heading pilot.
///
/// `G` is where the gains live. The pilot can own its [`GainSet`], or share
/// one through `&GainSet` or `Arc<GainSet>` with a parameter service that
/// tunes it from another context.
pub struct BasicPilot<G: AsRef<GainSet> = GainSet> {
    gains: G,
    stale_timeout: f64,
    feedback: PidController<f64, HeadingControlData<f64>>,
    command_rate: RateFilter<f64>,
    history: TimedQueue<f64, HISTORY_CAPACITY>,
    last_heading_command: f64,
    last_mode: Option<Mode>,
    last_enabled: bool,
    signals: PilotSignals,
}

impl BasicPilot {
    /// Creates a pilot owning reference gains, using the provided configuration.
    pub fn with_config(config: PilotConfig) -> Self {
        Self::with_gains(GainSet::new(), config)
    }

    /// Creates a pilot with reference gains and configuration.
    pub fn new() -> Self {
        Self::with_config(PilotConfig::new())
    }
}

impl Default for BasicPilot {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: AsRef<GainSet>> BasicPilot<G> {
    /// Creates a pilot reading its gains from `gains`.
    pub fn with_gains(gains: G, config: PilotConfig) -> Self {
        let feedback = {
            let set = gains.as_ref();
            heading_pid(
                set.gain(GainId::P).get(),
                set.gain(GainId::I).get(),
                set.gain(GainId::D).get(),
            )
        };

        BasicPilot {
            gains,
            stale_timeout: config.stale_timeout,
            feedback,
            command_rate: RateFilter::new(config.lowpass),
            history: TimedQueue::new(config.history_window),
            last_heading_command: 0.0,
            last_mode: None,
            last_enabled: false,
            signals: PilotSignals::default(),
        }
    }

    /// The gains this pilot reads.
    pub fn gains(&self) -> &GainSet {
        self.gains.as_ref()
    }

    /// Diagnostic values from the last computing cycle.
    pub fn signals(&self) -> PilotSignals {
        self.signals
    }

    /// Filtered heading command rate.
    pub fn command_rate(&self) -> f64 {
        self.command_rate.value()
    }

    /// Command read back by the reactive term on the last computing cycle.
    pub fn reactive_value(&self) -> f64 {
        self.signals.reactive_value
    }

    /// Heading command remembered for the next feed-forward difference.
    pub fn last_heading_command(&self) -> f64 {
        self.last_heading_command
    }

    /// Number of commands held for the reactive term.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn compute(&mut self, state: &AutopilotState) -> f64 {
        let t = state.time;

        // Restart feed-forward after a mode change or a stall.
        if self.last_mode != Some(state.mode)
            || self.command_rate.is_stale(t, self.stale_timeout)
        {
            log::debug!(
                "restarting feed-forward from heading command {}",
                state.heading_command
            );
            self.last_heading_command = state.heading_command;
        }

        let heading_command_diff = resolve(state.heading_command - self.last_heading_command);
        self.last_heading_command = state.heading_command;
        self.last_mode = Some(state.mode);
        let command_rate = self.command_rate.update(heading_command_diff, t);

        let reactive_value = self
            .history
            .take(t - self.gains.as_ref().reactive_time().get());

        let feedforward = if state.mode.is_wind_relative() {
            -command_rate
        } else {
            command_rate
        };

        let inputs = GainInputs {
            p: state.heading_error,
            i: state.heading_error_integral,
            d: state.gyro_rate,
            dd: state.gyro_rate_of_rate,
            pr: signed_sqrt(state.heading_error),
            ff: feedforward,
            r: -reactive_value,
        };

        let gains = self.gains.as_ref();
        self.feedback
            .kp(gains.gain(GainId::P).get())
            .ki(gains.gain(GainId::I).get())
            .kd(gains.gain(GainId::D).get());
        let feedback = self.feedback.compute(HeadingControlData {
            heading_error: inputs.p,
            heading_error_integral: inputs.i,
            rate: inputs.d,
        });
        for id in [GainId::P, GainId::I, GainId::D] {
            gains.gain(id).apply(inputs.get(id));
        }

        let dd = gains.gain(GainId::DD).apply(inputs.dd);
        let pr = gains.gain(GainId::PR).apply(inputs.pr);
        let ff = gains.gain(GainId::FF).apply(inputs.ff);
        let r = gains.gain(GainId::R).apply(inputs.r);
        let command = feedback + dd + pr + ff + r;

        // Keep the reactive contribution out of the history.
        self.history.push(command - r, t);

        self.signals = PilotSignals {
            command_rate,
            reactive_value,
            command,
        };
        log::trace!(
            "command {} rate {} reactive {}",
            command,
            command_rate,
            reactive_value
        );
        command
    }
}

impl<G: AsRef<GainSet>> HeadingPilot for BasicPilot<G> {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn process(&mut self, state: &AutopilotState, reset: bool) -> Option<f64> {
        if reset {
            self.command_rate.reset();
            self.last_mode = None;
        }

        if state.enabled != self.last_enabled {
            log::debug!(
                "{} pilot {}",
                self.name(),
                if state.enabled { "engaged" } else { "disengaged" }
            );
            self.last_enabled = state.enabled;
        }

        // Only compute while disengaged if a client cares.
        if !state.enabled && !self.gains.as_ref().any_watched() {
            return None;
        }

        let command = self.compute(state);
        state.enabled.then_some(command)
    }
}

/// Square root of the magnitude of `value`, carrying the sign of `value`.
pub fn signed_sqrt(value: f64) -> f64 {
    let root = Float::sqrt(Float::abs(value));
    if value < 0.0 {
        -root
    } else {
        root
    }
}
