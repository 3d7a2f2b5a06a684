//! Pulse timing statistics
//!
//! Keeps a rolling average of the measured width of each pulse class. A
//! drifting or noisy source shows up as averages moving away from the
//! nominal 2 ms / 5 ms / 8 ms widths.
//!
//! Each window fills in two phases. While it is growing, new samples are
//! appended and the average covers only the samples seen so far. Once it
//! is full, each new sample overwrites the oldest one.

use heapless::Vec;

use crate::config::STATS_BUFFER_SIZE;
use crate::types::PulseClass;

/// Rolling average over the last `N` samples
#[derive(Clone, Debug)]
pub struct RollingAverage<const N: usize> {
    samples: Vec<u32, N>,
    /// Next slot to overwrite once the window is full
    cursor: usize,
    average: u32,
}

impl<const N: usize> RollingAverage<N> {
    /// Create an empty window
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
            cursor: 0,
            average: 0,
        }
    }

    /// Add a sample and recompute the average
    pub fn push(&mut self, sample: u32) {
        if N == 0 {
            return;
        }

        if self.samples.push(sample).is_err() {
            if let Some(slot) = self.samples.get_mut(self.cursor) {
                *slot = sample;
            }
            self.cursor = (self.cursor + 1) % N;
        }

        let sum: u64 = self.samples.iter().map(|&s| u64::from(s)).sum();
        let count = self.samples.len() as u64;
        self.average = u32::try_from(sum / count).unwrap_or(u32::MAX);
    }

    /// Integer average of the stored samples, 0 if empty
    #[must_use]
    pub const fn average(&self) -> u32 {
        self.average
    }

    /// Number of stored samples (grows to `N`, then stays)
    #[must_use]
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Slot the next sample will overwrite in the steady phase
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the window has reached its capacity
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    /// Stored samples in slot order
    #[must_use]
    pub fn samples(&self) -> &[u32] {
        &self.samples
    }
}

impl<const N: usize> Default for RollingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing statistics for all three pulse classes
#[derive(Clone, Debug, Default)]
pub struct TimingStats {
    index: RollingAverage<STATS_BUFFER_SIZE>,
    one: RollingAverage<STATS_BUFFER_SIZE>,
    zero: RollingAverage<STATS_BUFFER_SIZE>,
}

impl TimingStats {
    /// Create empty statistics
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: RollingAverage::new(),
            one: RollingAverage::new(),
            zero: RollingAverage::new(),
        }
    }

    /// Record a pulse of the given class
    pub fn record(&mut self, class: PulseClass, width_us: u32) {
        match class {
            PulseClass::Index => self.index.push(width_us),
            PulseClass::One => self.one.push(width_us),
            PulseClass::Zero => self.zero.push(width_us),
        }
    }

    /// Window of the given class
    #[must_use]
    pub const fn window(&self, class: PulseClass) -> &RollingAverage<STATS_BUFFER_SIZE> {
        match class {
            PulseClass::Index => &self.index,
            PulseClass::One => &self.one,
            PulseClass::Zero => &self.zero,
        }
    }

    /// Average index mark width in microseconds
    #[must_use]
    pub const fn average_index(&self) -> u32 {
        self.index.average()
    }

    /// Average logic-one width in microseconds
    #[must_use]
    pub const fn average_one(&self) -> u32 {
        self.one.average()
    }

    /// Average logic-zero width in microseconds
    #[must_use]
    pub const fn average_zero(&self) -> u32 {
        self.zero.average()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TimingStats {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "P={=u32}us 1={=u32}us 0={=u32}us",
            self.average_index(),
            self.average_one(),
            self.average_zero()
        );
    }
}
