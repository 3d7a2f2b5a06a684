//! Input Capture Adapter
//!
//! Turns raw capture register values into pulse widths. The capture timer
//! free-runs as a 16-bit up-counter and latches its count on both edges of
//! the demodulated IRIG-B signal; the width of a pulse is the number of
//! ticks between its rising and falling edge.
//!
//! Peripheral setup ([`crate::config::timers::IRIG_CAPTURE`]) is left to the
//! application. Feed each latched value from the capture interrupt together
//! with the edge polarity, and pass the returned width to
//! [`crate::IrigDecoder::handle_pulse`].

use crate::config::timers::CAPTURE_TICK_HZ;
use crate::config::BIT_PERIOD_US;

/// Microseconds per second
const US_PER_SECOND: u64 = 1_000_000;

/// Signal edge that triggered a capture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Low to high, start of a pulse
    Rising,
    /// High to low, end of a pulse
    Falling,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Edge {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Rising => defmt::write!(f, "Rising"),
            Self::Falling => defmt::write!(f, "Falling"),
        }
    }
}

/// Capture configuration error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureError {
    /// Timer tick rate is zero
    ZeroTickRate,
    /// Timer ticks are too coarse to resolve a microsecond threshold
    TickRateTooLow(u32),
    /// A full bit period would wrap the 16-bit capture counter
    TickRateTooHigh(u32),
}

/// Pulse width measurement from capture values
#[derive(Clone, Copy, Debug)]
pub struct PulseCapture {
    /// Timer tick rate in Hz
    tick_hz: u32,
    /// Count latched on the last rising edge
    rising_count: Option<u16>,
}

impl PulseCapture {
    /// Slowest tick rate accepted (10 µs resolution)
    pub const MIN_TICK_HZ: u32 = 100_000;

    /// Fastest tick rate accepted
    ///
    /// At this rate one 10 ms bit period spans exactly `u16::MAX` ticks, so
    /// an 8 ms index mark is measured without wrapping the counter.
    pub const MAX_TICK_HZ: u32 = (u16::MAX as u64 * US_PER_SECOND / BIT_PERIOD_US as u64) as u32;

    /// Create a capture adapter for a timer ticking at `tick_hz`
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError`] if the tick rate is zero, slower than
    /// [`Self::MIN_TICK_HZ`] or faster than [`Self::MAX_TICK_HZ`].
    pub const fn new(tick_hz: u32) -> Result<Self, CaptureError> {
        if tick_hz == 0 {
            return Err(CaptureError::ZeroTickRate);
        }
        if tick_hz < Self::MIN_TICK_HZ {
            return Err(CaptureError::TickRateTooLow(tick_hz));
        }
        if BIT_PERIOD_US as u64 * tick_hz as u64 / US_PER_SECOND > u16::MAX as u64 {
            return Err(CaptureError::TickRateTooHigh(tick_hz));
        }
        Ok(Self {
            tick_hz,
            rising_count: None,
        })
    }

    /// Create a capture adapter for the default 1 MHz capture timer
    #[must_use]
    pub const fn with_default_timer() -> Self {
        Self {
            tick_hz: CAPTURE_TICK_HZ,
            rising_count: None,
        }
    }

    /// Process a captured count
    ///
    /// Returns the pulse width in microseconds on a falling edge that
    /// follows a rising edge. A falling edge without a preceding rising
    /// edge (e.g. right after start-up) returns `None`.
    pub fn on_edge(&mut self, edge: Edge, count: u16) -> Option<u32> {
        match edge {
            Edge::Rising => {
                self.rising_count = Some(count);
                None
            }
            Edge::Falling => {
                let start = self.rising_count.take()?;
                Some(self.ticks_to_us(count.wrapping_sub(start)))
            }
        }
    }

    /// Convert a tick count to microseconds
    #[must_use]
    pub fn ticks_to_us(&self, ticks: u16) -> u32 {
        let us = u64::from(ticks) * US_PER_SECOND / u64::from(self.tick_hz);
        u32::try_from(us).unwrap_or(u32::MAX)
    }

    /// Timer tick rate in Hz
    #[must_use]
    pub const fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// Forget a pending rising edge
    pub fn reset(&mut self) {
        self.rising_count = None;
    }
}

impl Default for PulseCapture {
    fn default() -> Self {
        Self::with_default_timer()
    }
}
