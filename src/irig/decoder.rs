//! IRIG-B decoder state machine.
//!
//! Feed every measured pulse width to [`IrigDecoder::handle_pulse`], in
//! order, exactly once. The decoder locks on to the start-of-second marker
//! (two consecutive index marks), stores each data bit at its frame
//! position and checks every subsequent index mark against the 10-bit
//! group grid.

use super::frame::{DecodedFrame, FrameBuffer};
#[cfg(feature = "statistics")]
use super::stats::TimingStats;
use super::validator::{check_boundary, Boundary};
use crate::config::{FIRST_DATA_POSITION, MAX_POSITION};
use crate::types::{PulseClass, TimeQualityBitOrder};

/// Decoder configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Slot order of the time quality code
    pub time_quality_order: TimeQualityBitOrder,
}

impl DecoderConfig {
    /// Default configuration
    pub const DEFAULT: Self = Self {
        time_quality_order: TimeQualityBitOrder::LsbFirst,
    };
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pending index mark tracking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IndexState {
    /// Last pulse was not an index mark
    #[default]
    NoPendingIndex,
    /// Last pulse was a single index mark
    OnePendingIndex,
    /// Last two pulses formed the start-of-second marker
    StartMarkerConfirmed,
}

/// Counters for pulses the decoder drops
///
/// Purely informational; none of these change decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Pulses at or below the zero threshold
    pub noise_pulses: u32,
    /// Data pulses received before the first start marker
    pub unsynced_pulses: u32,
    /// Data pulses received past the last frame slot
    pub overrun_pulses: u32,
    /// Index marks received right after a start marker
    pub stray_index_marks: u32,
    /// Start-of-second markers detected
    pub start_markers: u32,
}

/// IRIG-B decoder
///
/// Owns the frame buffer, the decoded record and the timing statistics.
#[derive(Clone, Debug)]
pub struct IrigDecoder {
    config: DecoderConfig,
    index_state: IndexState,
    /// Next frame slot to fill, 0 while unsynchronized
    position: u8,
    buffer: FrameBuffer,
    frame: DecodedFrame,
    #[cfg(feature = "statistics")]
    timing: TimingStats,
    diagnostics: Diagnostics,
}

impl IrigDecoder {
    /// Create a new decoder
    #[must_use]
    pub const fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            index_state: IndexState::NoPendingIndex,
            position: 0,
            buffer: FrameBuffer::new(),
            frame: DecodedFrame::new(),
            #[cfg(feature = "statistics")]
            timing: TimingStats::new(),
            diagnostics: Diagnostics {
                noise_pulses: 0,
                unsynced_pulses: 0,
                overrun_pulses: 0,
                stray_index_marks: 0,
                start_markers: 0,
            },
        }
    }

    /// Process one pulse width in microseconds
    ///
    /// Call once per captured pulse. Never fails: malformed input shows up
    /// in the boundary counters and [`Diagnostics`].
    pub fn handle_pulse(&mut self, width_us: u32) {
        let Some(class) = PulseClass::classify(width_us) else {
            self.diagnostics.noise_pulses = self.diagnostics.noise_pulses.wrapping_add(1);
            // A sub-threshold pulse inside the frame still breaks an index pair.
            if self.position != 0 && self.position <= MAX_POSITION {
                self.index_state = IndexState::NoPendingIndex;
            }
            return;
        };

        #[cfg(feature = "statistics")]
        self.timing.record(class, width_us);

        if class.is_index() {
            self.handle_index();
        } else {
            self.handle_data(class);
        }
    }

    fn handle_index(&mut self) {
        match self.index_state {
            IndexState::OnePendingIndex => {
                self.index_state = IndexState::StartMarkerConfirmed;
                self.position = FIRST_DATA_POSITION;
                self.diagnostics.start_markers = self.diagnostics.start_markers.wrapping_add(1);
                trace!("IRIG: start of second");
            }
            IndexState::NoPendingIndex => {
                if self.position != 0 {
                    let boundary = check_boundary(
                        self.position,
                        &self.buffer,
                        &mut self.frame,
                        self.config.time_quality_order,
                    );
                    match boundary {
                        Boundary::Misaligned => {
                            debug!("IRIG: index mark off boundary at {=u8}", self.position);
                        }
                        Boundary::Valid(_) if self.position == MAX_POSITION => {
                            debug!("IRIG: frame complete");
                        }
                        Boundary::Valid(_) => {}
                    }
                    self.position = self.position.saturating_add(1);
                }
                self.index_state = IndexState::OnePendingIndex;
            }
            IndexState::StartMarkerConfirmed => {
                self.diagnostics.stray_index_marks =
                    self.diagnostics.stray_index_marks.wrapping_add(1);
                warn!("IRIG: third consecutive index mark");
            }
        }
    }

    fn handle_data(&mut self, class: PulseClass) {
        if self.position == 0 {
            self.diagnostics.unsynced_pulses = self.diagnostics.unsynced_pulses.wrapping_add(1);
            return;
        }
        if self.position > MAX_POSITION {
            self.diagnostics.overrun_pulses = self.diagnostics.overrun_pulses.wrapping_add(1);
            return;
        }

        self.index_state = IndexState::NoPendingIndex;
        if let Some(bit) = class.bit() {
            self.buffer.set(self.position, bit);
            self.position += 1;
        }
    }

    /// Decoded frame record
    #[must_use]
    pub const fn frame(&self) -> &DecodedFrame {
        &self.frame
    }

    /// Pulse timing statistics
    #[cfg(feature = "statistics")]
    #[must_use]
    pub const fn timing(&self) -> &TimingStats {
        &self.timing
    }

    /// Dropped pulse counters
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Raw frame buffer
    #[must_use]
    pub const fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Next frame slot to fill, 0 while unsynchronized
    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Check if a start-of-second marker has been seen
    #[must_use]
    pub const fn is_synchronized(&self) -> bool {
        self.position != 0
    }

    /// Pending index mark state
    #[must_use]
    pub const fn index_state(&self) -> IndexState {
        self.index_state
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> DecoderConfig {
        self.config
    }
}

impl Default for IrigDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::DEFAULT)
    }
}
