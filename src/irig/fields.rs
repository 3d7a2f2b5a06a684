//! BCD field extraction
//!
//! Each field is a weighted sum over fixed frame slots. Units (1, 2, 4, 8)
//! come first, then one unused slot, then tens (10, 20, 40, 80) and, for
//! the day of year, hundreds (100, 200) after another unused slot.
//!
//! Decoders read whatever the slots hold. They do not know whether a slot
//! was written during the current frame.

use super::frame::{DecodedFrame, FrameBuffer};
use crate::config::boundaries;
use crate::types::{TimeQuality, TimeQualityBitOrder};

/// `(slot, weight)` pairs of a field
pub type WeightTable = [(u8, u32)];

/// Seconds: units at 1-4, tens at 6-8
pub const SECONDS_WEIGHTS: &WeightTable = &[
    (1, 1),
    (2, 2),
    (3, 4),
    (4, 8),
    (6, 10),
    (7, 20),
    (8, 40),
];

/// Minutes: units at 10-13, tens at 15-17
pub const MINUTES_WEIGHTS: &WeightTable = &[
    (10, 1),
    (11, 2),
    (12, 4),
    (13, 8),
    (15, 10),
    (16, 20),
    (17, 40),
];

/// Hours: units at 20-23, tens at 25-26
pub const HOURS_WEIGHTS: &WeightTable = &[
    (20, 1),
    (21, 2),
    (22, 4),
    (23, 8),
    (25, 10),
    (26, 20),
];

/// Day of year: units at 30-33, tens at 35-38, hundreds at 40-41
pub const DAYS_WEIGHTS: &WeightTable = &[
    (30, 1),
    (31, 2),
    (32, 4),
    (33, 8),
    (35, 10),
    (36, 20),
    (37, 40),
    (38, 80),
    (40, 100),
    (41, 200),
];

/// Year: units at 50-53, tens at 55-58
pub const YEARS_WEIGHTS: &WeightTable = &[
    (50, 1),
    (51, 2),
    (52, 4),
    (53, 8),
    (55, 10),
    (56, 20),
    (57, 40),
    (58, 80),
];

/// Slots of the time quality code, in transmission order
pub const TIME_QUALITY_SLOTS: [u8; 4] = [71, 72, 73, 74];

/// Field completed by an index mark
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Seconds of minute
    Seconds,
    /// Minutes of hour
    Minutes,
    /// Hours of day
    Hours,
    /// Day of year
    Days,
    /// Two-digit year
    Years,
    /// Time quality code
    TimeQuality,
    /// Straight binary seconds of day
    TimeOfDay,
}

impl Field {
    /// Field whose group closes at `position`, if any
    #[must_use]
    pub const fn closing_at(position: u8) -> Option<Self> {
        match position {
            boundaries::SECONDS => Some(Self::Seconds),
            boundaries::MINUTES => Some(Self::Minutes),
            boundaries::HOURS => Some(Self::Hours),
            boundaries::DAYS => Some(Self::Days),
            boundaries::YEARS => Some(Self::Years),
            boundaries::TIME_QUALITY => Some(Self::TimeQuality),
            boundaries::TIME_OF_DAY => Some(Self::TimeOfDay),
            _ => None,
        }
    }

    /// Decode this field from `buf` into `frame`
    pub fn apply(self, buf: &FrameBuffer, frame: &mut DecodedFrame, order: TimeQualityBitOrder) {
        match self {
            Self::Seconds => frame.seconds = seconds(buf),
            Self::Minutes => frame.minutes = minutes(buf),
            Self::Hours => frame.hours = hours(buf),
            Self::Days => frame.days = days(buf),
            Self::Years => frame.years = years(buf),
            Self::TimeQuality => frame.time_quality = time_quality(buf, order),
            Self::TimeOfDay => time_of_day(buf, frame),
        }
    }
}

/// Weighted sum of the slots listed in `table`
#[must_use]
pub fn weighted_sum(buf: &FrameBuffer, table: &WeightTable) -> u32 {
    table
        .iter()
        .map(|&(slot, weight)| buf.weight_bit(slot) * weight)
        .sum()
}

/// Seconds of minute
#[must_use]
pub fn seconds(buf: &FrameBuffer) -> u32 {
    weighted_sum(buf, SECONDS_WEIGHTS)
}

/// Minutes of hour
#[must_use]
pub fn minutes(buf: &FrameBuffer) -> u32 {
    weighted_sum(buf, MINUTES_WEIGHTS)
}

/// Hours of day
#[must_use]
pub fn hours(buf: &FrameBuffer) -> u32 {
    weighted_sum(buf, HOURS_WEIGHTS)
}

/// Day of year
#[must_use]
pub fn days(buf: &FrameBuffer) -> u32 {
    weighted_sum(buf, DAYS_WEIGHTS)
}

/// Two-digit year
#[must_use]
pub fn years(buf: &FrameBuffer) -> u32 {
    weighted_sum(buf, YEARS_WEIGHTS)
}

/// Raw 4-bit time quality code
#[must_use]
pub fn time_quality_code(buf: &FrameBuffer, order: TimeQualityBitOrder) -> u8 {
    TIME_QUALITY_SLOTS
        .iter()
        .enumerate()
        .fold(0u8, |code, (i, &slot)| {
            let shift = match order {
                TimeQualityBitOrder::LsbFirst => i,
                TimeQualityBitOrder::MsbFirst => TIME_QUALITY_SLOTS.len() - 1 - i,
            };
            code | (buf.bit(slot).unwrap_or(0) << shift)
        })
}

/// Time quality reported by the source
#[must_use]
pub fn time_quality(buf: &FrameBuffer, order: TimeQualityBitOrder) -> TimeQuality {
    // A 4-bit code always converts.
    TimeQuality::from_code(time_quality_code(buf, order)).unwrap_or(TimeQuality::TimeUnreliable)
}

/// Straight binary seconds of day
///
/// Not decoded: the record keeps its previous value.
pub fn time_of_day(_buf: &FrameBuffer, _frame: &mut DecodedFrame) {}
