//! Frame buffer and decoded frame record.

use core::fmt;

use crate::config::FRAME_LEN;
use crate::types::TimeQuality;

/// Bit slots of one IRIG-B frame
///
/// Slot `i` holds the bit received at position `i` of the current frame.
/// Slots are overwritten in place every frame and never cleared, so a slot
/// the assembler has not reached yet still holds the previous frame's value.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    slots: [u8; FRAME_LEN],
}

impl FrameBuffer {
    /// Create an all-zero frame buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [0; FRAME_LEN],
        }
    }

    /// Get the bit stored at `position`
    #[must_use]
    pub fn bit(&self, position: u8) -> Option<u8> {
        self.slots.get(usize::from(position)).copied()
    }

    /// Store a bit at `position`
    ///
    /// Any non-zero `bit` is stored as 1. Returns `false` if the position
    /// is outside the frame.
    pub fn set(&mut self, position: u8, bit: u8) -> bool {
        match self.slots.get_mut(usize::from(position)) {
            Some(slot) => {
                *slot = u8::from(bit != 0);
                true
            }
            None => false,
        }
    }

    /// Slot value widened for weighted sums, 0 outside the frame
    pub(crate) fn weight_bit(&self, position: u8) -> u32 {
        u32::from(self.bit(position).unwrap_or(0))
    }

    /// All slots
    #[must_use]
    pub const fn as_slice(&self) -> &[u8] {
        &self.slots
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameBuffer(")?;
        for (i, bit) in self.slots.iter().enumerate() {
            if i > 0 && i % 10 == 0 {
                write!(f, " ")?;
            }
            write!(f, "{bit}")?;
        }
        write!(f, ")")
    }
}

/// Decoded IRIG-B time frame
///
/// Time fields are updated in place when their group closes on a valid
/// boundary; until then they keep the last decoded value. The counters only
/// ever grow. Check [`DecodedFrame::frame_ok`] and the boundary counters
/// before trusting a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DecodedFrame {
    /// Seconds (0-59)
    pub seconds: u32,
    /// Minutes (0-59)
    pub minutes: u32,
    /// Hours (0-23)
    pub hours: u32,
    /// Day of year (1-366)
    pub days: u32,
    /// Two-digit year (0-99)
    pub years: u32,
    /// Time quality reported by the source
    pub time_quality: TimeQuality,
    /// Straight binary seconds of day (not decoded)
    pub time_of_day: u32,
    frame_ok: bool,
    received_frames: u32,
    ok_index_count: u32,
    bad_index_count: u32,
}

impl DecodedFrame {
    /// Create an empty record
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seconds: 0,
            minutes: 0,
            hours: 0,
            days: 0,
            years: 0,
            time_quality: TimeQuality::ClockLocked,
            time_of_day: 0,
            frame_ok: false,
            received_frames: 0,
            ok_index_count: 0,
            bad_index_count: 0,
        }
    }

    /// Whether the most recently checked group closed on a valid boundary
    #[must_use]
    pub const fn frame_ok(&self) -> bool {
        self.frame_ok
    }

    /// Number of complete 100-bit frames received
    #[must_use]
    pub const fn received_frames(&self) -> u32 {
        self.received_frames
    }

    /// Number of index marks found on a group boundary
    #[must_use]
    pub const fn ok_index_count(&self) -> u32 {
        self.ok_index_count
    }

    /// Number of index marks found off a group boundary
    #[must_use]
    pub const fn bad_index_count(&self) -> u32 {
        self.bad_index_count
    }

    pub(crate) fn record_good_boundary(&mut self) {
        self.frame_ok = true;
        self.ok_index_count = self.ok_index_count.wrapping_add(1);
    }

    pub(crate) fn record_bad_boundary(&mut self) {
        self.frame_ok = false;
        self.bad_index_count = self.bad_index_count.wrapping_add(1);
    }

    pub(crate) fn record_complete_frame(&mut self) {
        self.received_frames = self.received_frames.wrapping_add(1);
    }
}

impl fmt::Display for DecodedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:03} {:02}:{:02}:{:02} {} [{}]",
            self.years,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
            self.time_quality,
            if self.frame_ok { "OK" } else { "BAD" }
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DecodedFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u32}/{=u32} {=u32}:{=u32}:{=u32} {} ok={=bool}",
            self.years,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
            self.time_quality,
            self.frame_ok
        );
    }
}
