// src/gain.rs

//! # Gain Registry
//!
//! Named, bounded control parameters for the heading pilot. Each gain is a
//! clamped scalar that can be read and written from another execution
//! context while the control loop runs, a per-cycle contribution signal,
//! and a watcher count kept up to date by whatever framework publishes
//! values to remote clients.
//!
//! Values are stored as `f64` bit patterns in atomics, so every read is a
//! single load and needs no lock. Targets must provide 64-bit atomics.

use core::str::FromStr;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::PilotError;

/// Atomically readable and writable `f64`.
#[derive(Debug)]
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// A named scalar bounded to `[min, max]`.
#[derive(Debug)]
pub struct RangeProperty {
    name: &'static str,
    value: AtomicF64,
    default: f64,
    min: f64,
    max: f64,
}

impl RangeProperty {
    /// Creates a property holding `default`, clamped into `[min, max]`.
    pub fn new(name: &'static str, default: f64, min: f64, max: f64) -> Self {
        let default = default.clamp(min, max);
        Self {
            name,
            value: AtomicF64::new(default),
            default,
            min,
            max,
        }
    }

    /// The registered name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The value restored by [`RangeProperty::reset`].
    pub fn default(&self) -> f64 {
        self.default
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The current value.
    pub fn get(&self) -> f64 {
        self.value.load()
    }

    /// Stores `value` clamped into `[min, max]` and returns what was stored.
    ///
    /// A NaN write is ignored and the current value is returned.
    pub fn set(&self, value: f64) -> f64 {
        if value.is_nan() {
            log::warn!("ignoring NaN write to {}", self.name);
            return self.get();
        }
        let clamped = value.clamp(self.min, self.max);
        self.value.store(clamped);
        clamped
    }

    /// Restores the default value.
    pub fn reset(&self) {
        self.value.store(self.default);
    }
}

/// Identifies one of the seven heading pilot gains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GainId {
    /// Position, multiplies the heading error.
    P,
    /// Integral, multiplies the heading error integral.
    I,
    /// Derivative, multiplies the gyro rate.
    D,
    /// Second derivative, multiplies the gyro rate of rate.
    DD,
    /// Position root, multiplies the signed square root of the heading error.
    PR,
    /// Feed-forward, multiplies the filtered heading command rate.
    FF,
    /// Reactive, multiplies the negated delayed command.
    R,
}

impl GainId {
    /// Every gain, in registration order.
    pub const ALL: [GainId; 7] = [
        GainId::P,
        GainId::I,
        GainId::D,
        GainId::DD,
        GainId::PR,
        GainId::FF,
        GainId::R,
    ];

    /// The registered name of the gain.
    pub fn name(self) -> &'static str {
        match self {
            GainId::P => "P",
            GainId::I => "I",
            GainId::D => "D",
            GainId::DD => "DD",
            GainId::PR => "PR",
            GainId::FF => "FF",
            GainId::R => "R",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for GainId {
    type Err = PilotError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        GainId::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or(PilotError::UnknownProperty)
    }
}

/// A control gain: a non-negative bounded coefficient plus its
/// observable contribution and watcher count.
#[derive(Debug)]
pub struct Gain {
    property: RangeProperty,
    contribution: AtomicF64,
    watchers: AtomicUsize,
}

impl Gain {
    /// Creates a gain bounded to `[0, max]`.
    pub fn new(name: &'static str, default: f64, max: f64) -> Self {
        Self {
            property: RangeProperty::new(name, default, 0.0, max),
            contribution: AtomicF64::new(0.0),
            watchers: AtomicUsize::new(0),
        }
    }

    /// The underlying bounded value.
    pub fn property(&self) -> &RangeProperty {
        &self.property
    }

    /// The registered name.
    pub fn name(&self) -> &'static str {
        self.property.name()
    }

    /// The current coefficient.
    pub fn get(&self) -> f64 {
        self.property.get()
    }

    /// Stores a clamped coefficient and returns what was stored.
    pub fn set(&self, value: f64) -> f64 {
        self.property.set(value)
    }

    /// The term this gain added to the most recently computed command.
    pub fn contribution(&self) -> f64 {
        self.contribution.load()
    }

    /// Multiplies `input` by the current coefficient, records the product
    /// as this gain's contribution, and returns it.
    pub fn apply(&self, input: f64) -> f64 {
        let contribution = self.get() * input;
        self.contribution.store(contribution);
        contribution
    }

    /// Registers one more watcher.
    pub fn watch(&self) {
        self.watchers.fetch_add(1, Ordering::Relaxed);
    }

    /// Removes one watcher. Extra calls leave the count at zero.
    pub fn unwatch(&self) {
        let _ = self
            .watchers
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
                count.checked_sub(1)
            });
    }

    /// Replaces the watcher count.
    pub fn set_watchers(&self, count: usize) {
        self.watchers.store(count, Ordering::Relaxed);
    }

    /// Number of watchers currently registered.
    pub fn watchers(&self) -> usize {
        self.watchers.load(Ordering::Relaxed)
    }

    /// Returns `true` if anyone is observing this gain.
    pub fn has_watchers(&self) -> bool {
        self.watchers() > 0
    }
}

/// Per-cycle input for each gain.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GainInputs {
    /// Heading error.
    pub p: f64,
    /// Heading error integral.
    pub i: f64,
    /// Gyro rate.
    pub d: f64,
    /// Gyro rate of rate.
    pub dd: f64,
    /// Signed square root of the heading error.
    pub pr: f64,
    /// Feed-forward value.
    pub ff: f64,
    /// Negated reactive value.
    pub r: f64,
}

impl GainInputs {
    /// The input multiplied by gain `id`.
    pub fn get(&self, id: GainId) -> f64 {
        match id {
            GainId::P => self.p,
            GainId::I => self.i,
            GainId::D => self.d,
            GainId::DD => self.dd,
            GainId::PR => self.pr,
            GainId::FF => self.ff,
            GainId::R => self.r,
        }
    }
}

/// Name of the reactive latency property.
pub const REACTIVE_TIME: &str = "Rtime";

/// The heading pilot's gains and its reactive latency in seconds.
#[derive(Debug)]
pub struct GainSet {
    gains: [Gain; 7],
    reactive_time: RangeProperty,
}

impl GainSet {
    /// Creates the gains with their reference defaults and bounds.
    pub fn new() -> Self {
        Self {
            gains: [
                Gain::new("P", 0.003, 0.02),
                Gain::new("I", 0.005, 0.1),
                Gain::new("D", 0.09, 1.0),
                Gain::new("DD", 0.075, 1.0),
                Gain::new("PR", 0.005, 0.05),
                Gain::new("FF", 0.6, 3.0),
                Gain::new("R", 0.0, 1.0),
            ],
            reactive_time: RangeProperty::new(REACTIVE_TIME, 1.0, 0.0, 3.0),
        }
    }

    /// The gain identified by `id`.
    pub fn gain(&self, id: GainId) -> &Gain {
        &self.gains[id.index()]
    }

    /// Iterates over every gain with its identifier.
    pub fn iter(&self) -> impl Iterator<Item = (GainId, &Gain)> {
        GainId::ALL.into_iter().zip(self.gains.iter())
    }

    /// How far back, in seconds, the reactive term reads the command history.
    pub fn reactive_time(&self) -> &RangeProperty {
        &self.reactive_time
    }

    /// Returns `true` if any gain has a watcher.
    pub fn any_watched(&self) -> bool {
        self.gains.iter().any(Gain::has_watchers)
    }

    /// Looks up a gain or the latency property by registered name.
    pub fn property(&self, name: &str) -> Result<&RangeProperty, PilotError> {
        if name == REACTIVE_TIME {
            return Ok(&self.reactive_time);
        }
        let id: GainId = name.parse()?;
        Ok(self.gain(id).property())
    }

    /// Writes a property by name, clamped, and returns the stored value.
    pub fn set_by_name(&self, name: &str, value: f64) -> Result<f64, PilotError> {
        Ok(self.property(name)?.set(value))
    }

    /// Restores every property to its default.
    pub fn reset(&self) {
        for gain in &self.gains {
            gain.property().reset();
        }
        self.reactive_time.reset();
    }
}

impl Default for GainSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<GainSet> for GainSet {
    fn as_ref(&self) -> &GainSet {
        self
    }
}
