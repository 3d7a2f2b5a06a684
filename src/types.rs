//! Shared types used across the decoder
//!
//! This module defines the domain types for pulse classes and the IRIG-B
//! time quality indicator.

use core::fmt;

use crate::config::{INDEX_TIME_US, ONE_TIME_US, ZERO_TIME_US};

/// Pulse width class of an IRIG-B symbol
///
/// IRIG-B encodes each 10 ms bit cell as a high pulse of 2 ms (zero),
/// 5 ms (one) or 8 ms (index / position identifier).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PulseClass {
    /// Position identifier or reference marker
    Index,
    /// Logic one
    One,
    /// Logic zero
    Zero,
}

impl PulseClass {
    /// Classify a pulse width in microseconds
    ///
    /// Returns `None` for sub-threshold pulses (noise).
    #[must_use]
    pub const fn classify(width_us: u32) -> Option<Self> {
        if width_us > INDEX_TIME_US {
            Some(Self::Index)
        } else if width_us > ONE_TIME_US {
            Some(Self::One)
        } else if width_us > ZERO_TIME_US {
            Some(Self::Zero)
        } else {
            None
        }
    }

    /// Bit value stored in the frame buffer, `None` for index marks
    #[must_use]
    pub const fn bit(self) -> Option<u8> {
        match self {
            Self::Index => None,
            Self::One => Some(1),
            Self::Zero => Some(0),
        }
    }

    /// Check if this is an index mark
    #[must_use]
    pub const fn is_index(self) -> bool {
        matches!(self, Self::Index)
    }
}

impl fmt::Display for PulseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "P"),
            Self::One => write!(f, "1"),
            Self::Zero => write!(f, "0"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PulseClass {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Index => defmt::write!(f, "P"),
            Self::One => defmt::write!(f, "1"),
            Self::Zero => defmt::write!(f, "0"),
        }
    }
}

/// Time quality code carried in the control field
///
/// Four-bit code: 0 means the source clock is locked, 0xF means the time
/// is unreliable, anything in between is a degraded accuracy level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeQuality {
    /// Clock locked to its reference
    #[default]
    ClockLocked,
    /// Degraded accuracy level (1..=14)
    Degraded(u8),
    /// Time unreliable
    TimeUnreliable,
}

/// Time quality code out of the 4-bit range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidTimeQuality(pub u8);

impl TimeQuality {
    /// Code of an unreliable clock
    pub const UNRELIABLE_CODE: u8 = 0xF;

    /// Build from a 4-bit code
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTimeQuality`] if the code does not fit in 4 bits.
    pub const fn from_code(code: u8) -> Result<Self, InvalidTimeQuality> {
        match code {
            0 => Ok(Self::ClockLocked),
            Self::UNRELIABLE_CODE => Ok(Self::TimeUnreliable),
            1..=0xE => Ok(Self::Degraded(code)),
            _ => Err(InvalidTimeQuality(code)),
        }
    }

    /// Get the 4-bit code
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::ClockLocked => 0,
            Self::Degraded(code) => code,
            Self::TimeUnreliable => Self::UNRELIABLE_CODE,
        }
    }

    /// Check if the source clock reports lock
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::ClockLocked)
    }
}

impl TryFrom<u8> for TimeQuality {
    type Error = InvalidTimeQuality;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for TimeQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClockLocked => write!(f, "LOCKED"),
            Self::Degraded(code) => write!(f, "DEGRADED({code:#x})"),
            Self::TimeUnreliable => write!(f, "UNRELIABLE"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TimeQuality {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ClockLocked => defmt::write!(f, "LOCKED"),
            Self::Degraded(code) => defmt::write!(f, "DEGRADED({=u8:#x})", code),
            Self::TimeUnreliable => defmt::write!(f, "UNRELIABLE"),
        }
    }
}

/// Slot order of the time quality code
///
/// Published descriptions disagree on whether slot 71 carries the least or
/// the most significant bit, so both are supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeQualityBitOrder {
    /// Slot 71 has weight 1, slot 74 weight 8
    #[default]
    LsbFirst,
    /// Slot 71 has weight 8, slot 74 weight 1
    MsbFirst,
}
