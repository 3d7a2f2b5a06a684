//! Decoder State Machine Tests
//!
//! Tests for synchronization, frame assembly and boundary validation driven
//! through the public pulse entry point.
//! Run with: cargo test --features std --test decoder_tests
//! Without statistics: cargo test --no-default-features --features std --test decoder_tests

use irigb_firmware::irig::decoder::{DecoderConfig, IndexState, IrigDecoder};
use irigb_firmware::irig::fields::{
    DAYS_WEIGHTS, HOURS_WEIGHTS, MINUTES_WEIGHTS, SECONDS_WEIGHTS, YEARS_WEIGHTS,
};
use irigb_firmware::shared::SharedDecoder;
use irigb_firmware::types::{TimeQuality, TimeQualityBitOrder};

/// Nominal index mark width
const P: u32 = 8_000;
/// Nominal logic one width
const ONE: u32 = 5_000;
/// Nominal logic zero width
const ZERO: u32 = 2_000;

/// Frame contents before pulse encoding
struct FrameBits([u8; 100]);

impl FrameBits {
    fn new() -> Self {
        Self([0; 100])
    }

    /// Set the bits of a BCD field
    fn encode(mut self, table: &[(u8, u32)], value: u32) -> Self {
        let mut remaining = value;
        for &(slot, weight) in table.iter().rev() {
            if remaining >= weight {
                self.0[usize::from(slot)] = 1;
                remaining -= weight;
            }
        }
        assert_eq!(remaining, 0, "value not representable");
        self
    }

    fn set(mut self, slot: usize) -> Self {
        self.0[slot] = 1;
        self
    }

    /// Pulse widths for slots 0-99, index marks at 0 and every Px
    fn pulses(&self) -> Vec<u32> {
        (0..100)
            .map(|slot| {
                if slot == 0 || slot % 10 == 9 {
                    P
                } else if self.0[slot] == 1 {
                    ONE
                } else {
                    ZERO
                }
            })
            .collect()
    }
}

fn feed(decoder: &mut IrigDecoder, pulses: &[u32]) {
    for &width in pulses {
        decoder.handle_pulse(width);
    }
}

/// Decoder that has just seen a start-of-second marker
fn synced_decoder() -> IrigDecoder {
    let mut decoder = IrigDecoder::default();
    feed(&mut decoder, &[P, P]);
    decoder
}

// =============================================================================
// Synchronization Tests
// =============================================================================

#[test]
fn single_index_does_not_sync() {
    let mut decoder = IrigDecoder::default();
    decoder.handle_pulse(P);
    assert!(!decoder.is_synchronized());
    assert_eq!(decoder.index_state(), IndexState::OnePendingIndex);
}

#[test]
fn double_index_resets_cursor_from_any_position() {
    let mut decoder = synced_decoder();
    feed(&mut decoder, &[ONE; 37]);
    assert_eq!(decoder.position(), 38);

    feed(&mut decoder, &[P, P]);
    assert_eq!(decoder.position(), 1);
    assert_eq!(decoder.index_state(), IndexState::StartMarkerConfirmed);
}

#[test]
fn data_pulse_clears_pending_index() {
    let mut decoder = synced_decoder();
    decoder.handle_pulse(ZERO);
    assert_eq!(decoder.index_state(), IndexState::NoPendingIndex);
}

#[test]
fn pending_index_survives_unsynced_data() {
    // Before the first lock, data pulses are ignored outright and do not
    // break an index pair.
    let mut decoder = IrigDecoder::default();
    feed(&mut decoder, &[P, ZERO, ONE, P]);
    assert!(decoder.is_synchronized());
    assert_eq!(decoder.position(), 1);
    assert_eq!(decoder.diagnostics().unsynced_pulses, 2);
}

#[test]
fn overrun_pulses_are_ignored() {
    let mut decoder = synced_decoder();
    feed(&mut decoder, &[ZERO; 99]);
    assert_eq!(decoder.position(), 100);

    feed(&mut decoder, &[ONE, ONE]);
    assert_eq!(decoder.position(), 100);
    assert_eq!(decoder.diagnostics().overrun_pulses, 2);
}

#[test]
fn resync_after_overrun() {
    let mut decoder = synced_decoder();
    feed(&mut decoder, &[ZERO; 120]);
    feed(&mut decoder, &[P, P]);
    assert_eq!(decoder.position(), 1);
}

#[test]
fn noise_is_dropped() {
    let mut decoder = synced_decoder();
    feed(&mut decoder, &[0, 1, 999, 1_000]);
    assert_eq!(decoder.position(), 1);
    assert_eq!(decoder.diagnostics().noise_pulses, 4);
    assert_eq!(decoder.frame().ok_index_count(), 0);
    assert_eq!(decoder.frame().bad_index_count(), 0);
}

// =============================================================================
// Boundary Validation Tests
// =============================================================================

#[test]
fn first_group_closes_at_position_9() {
    let mut decoder = synced_decoder();
    feed(&mut decoder, &[ZERO; 8]);
    decoder.handle_pulse(P);

    let frame = decoder.frame();
    assert!(frame.frame_ok());
    assert_eq!(frame.ok_index_count(), 1);
    assert_eq!(frame.bad_index_count(), 0);
    assert_eq!(frame.seconds, 0);
    assert_eq!(decoder.position(), 10);
}

#[test]
fn nine_data_bits_miss_the_boundary() {
    let mut decoder = synced_decoder();
    feed(&mut decoder, &[ZERO; 9]);
    decoder.handle_pulse(P);

    let frame = decoder.frame();
    assert!(!frame.frame_ok());
    assert_eq!(frame.ok_index_count(), 0);
    assert_eq!(frame.bad_index_count(), 1);
}

#[test]
fn misaligned_index_at_14() {
    let mut decoder = synced_decoder();
    feed(&mut decoder, &[ONE; 13]);
    assert_eq!(decoder.position(), 14);
    decoder.handle_pulse(P);

    let frame = decoder.frame();
    assert!(!frame.frame_ok());
    assert_eq!(frame.bad_index_count(), 1);
    assert_eq!(frame.ok_index_count(), 0);
    // Synchronization is kept; the mark still occupies a slot.
    assert!(decoder.is_synchronized());
    assert_eq!(decoder.position(), 15);
}

#[test]
fn frame_ok_reflects_latest_boundary() {
    let mut decoder = synced_decoder();
    feed(&mut decoder, &[ZERO; 8]);
    decoder.handle_pulse(P);
    assert!(decoder.frame().frame_ok());

    feed(&mut decoder, &[ZERO; 5]);
    decoder.handle_pulse(P);
    assert!(!decoder.frame().frame_ok());

    // The bad mark still takes slot 15, so three bits bring the next mark
    // back onto the grid at 19.
    feed(&mut decoder, &[ZERO; 3]);
    decoder.handle_pulse(P);
    assert!(decoder.frame().frame_ok());
    assert_eq!(decoder.frame().ok_index_count(), 2);
    assert_eq!(decoder.frame().bad_index_count(), 1);
}

#[test]
fn full_frame_counts_once_per_cycle() {
    let mut decoder = IrigDecoder::default();
    let bits = FrameBits::new();
    decoder.handle_pulse(P);
    feed(&mut decoder, &bits.pulses());

    let frame = decoder.frame();
    assert_eq!(frame.received_frames(), 1);
    assert_eq!(frame.ok_index_count(), 10);
    assert_eq!(frame.bad_index_count(), 0);

    feed(&mut decoder, &bits.pulses());
    assert_eq!(decoder.frame().received_frames(), 2);
    assert_eq!(decoder.frame().ok_index_count(), 20);
}

#[test]
fn truncated_frame_is_not_counted() {
    let mut decoder = IrigDecoder::default();
    let pulses = FrameBits::new().pulses();
    decoder.handle_pulse(P);
    feed(&mut decoder, &pulses[..60]);
    // Restart mid-frame
    feed(&mut decoder, &[P, P]);
    assert_eq!(decoder.frame().received_frames(), 0);
}

// =============================================================================
// End-to-End Decoding Tests
// =============================================================================

#[test]
fn decodes_complete_frame() {
    let bits = FrameBits::new()
        .encode(SECONDS_WEIGHTS, 42)
        .encode(MINUTES_WEIGHTS, 17)
        .encode(HOURS_WEIGHTS, 23)
        .encode(DAYS_WEIGHTS, 294)
        .encode(YEARS_WEIGHTS, 26);

    let mut decoder = IrigDecoder::default();
    decoder.handle_pulse(P);
    feed(&mut decoder, &bits.pulses());

    let frame = decoder.frame();
    assert!(frame.frame_ok());
    assert_eq!(frame.seconds, 42);
    assert_eq!(frame.minutes, 17);
    assert_eq!(frame.hours, 23);
    assert_eq!(frame.days, 294);
    assert_eq!(frame.years, 26);
    assert_eq!(frame.time_quality, TimeQuality::ClockLocked);
    assert_eq!(frame.time_of_day, 0);
}

#[test]
fn fields_update_as_groups_close() {
    let bits = FrameBits::new()
        .encode(SECONDS_WEIGHTS, 7)
        .encode(MINUTES_WEIGHTS, 59);
    let pulses = bits.pulses();

    let mut decoder = IrigDecoder::default();
    decoder.handle_pulse(P);
    // Through the index mark at slot 9
    feed(&mut decoder, &pulses[..10]);
    assert_eq!(decoder.frame().seconds, 7);
    assert_eq!(decoder.frame().minutes, 0);

    feed(&mut decoder, &pulses[10..20]);
    assert_eq!(decoder.frame().minutes, 59);
}

#[test]
fn consecutive_seconds() {
    let mut decoder = IrigDecoder::default();
    decoder.handle_pulse(P);
    for second in 0..3 {
        let bits = FrameBits::new().encode(SECONDS_WEIGHTS, second);
        feed(&mut decoder, &bits.pulses());
        assert_eq!(decoder.frame().seconds, second);
    }
    assert_eq!(decoder.frame().received_frames(), 3);
}

#[test]
fn time_quality_bit_order_is_configurable() {
    // Slots 71 and 72 set: 0b0011 LSB first, 0b1100 MSB first.
    let bits = FrameBits::new().set(71).set(72);

    let mut lsb = IrigDecoder::new(DecoderConfig {
        time_quality_order: TimeQualityBitOrder::LsbFirst,
    });
    lsb.handle_pulse(P);
    feed(&mut lsb, &bits.pulses());
    assert_eq!(lsb.frame().time_quality, TimeQuality::Degraded(0x3));

    let mut msb = IrigDecoder::new(DecoderConfig {
        time_quality_order: TimeQualityBitOrder::MsbFirst,
    });
    msb.handle_pulse(P);
    feed(&mut msb, &bits.pulses());
    assert_eq!(msb.frame().time_quality, TimeQuality::Degraded(0xC));
}

#[test]
fn unreliable_time_quality() {
    let bits = FrameBits::new().set(71).set(72).set(73).set(74);
    let mut decoder = IrigDecoder::default();
    decoder.handle_pulse(P);
    feed(&mut decoder, &bits.pulses());
    assert_eq!(decoder.frame().time_quality, TimeQuality::TimeUnreliable);
}

#[test]
fn stale_slot_under_misplaced_index_mark() {
    let full = FrameBits::new().encode(MINUTES_WEIGHTS, 45);
    let mut decoder = IrigDecoder::default();
    decoder.handle_pulse(P);
    feed(&mut decoder, &full.pulses());
    assert_eq!(decoder.frame().minutes, 45);

    // Next frame: a mark lands on slot 12, which is never rewritten and
    // still holds the previous frame's weight-4 bit.
    feed(&mut decoder, &FrameBits::new().pulses()[..10]);
    feed(&mut decoder, &[ZERO; 2]);
    decoder.handle_pulse(P);
    assert!(!decoder.frame().frame_ok());
    feed(&mut decoder, &[ZERO; 6]);
    assert_eq!(decoder.position(), 19);
    decoder.handle_pulse(P);

    let frame = decoder.frame();
    assert!(frame.frame_ok());
    assert_eq!(frame.bad_index_count(), 1);
    assert_eq!(frame.minutes, 4);
}

#[test]
#[cfg(not(feature = "statistics"))]
fn decodes_without_statistics_engine() {
    let bits = FrameBits::new()
        .encode(SECONDS_WEIGHTS, 30)
        .encode(DAYS_WEIGHTS, 1);

    let mut decoder = IrigDecoder::default();
    decoder.handle_pulse(P);
    feed(&mut decoder, &bits.pulses());

    let frame = decoder.frame();
    assert!(frame.frame_ok());
    assert_eq!(frame.seconds, 30);
    assert_eq!(frame.days, 1);
    assert_eq!(frame.received_frames(), 1);
    assert_eq!(decoder.diagnostics().start_markers, 1);
}

// =============================================================================
// Shared Decoder Tests
// =============================================================================

#[test]
fn shared_decoder_snapshots() {
    static DECODER: SharedDecoder = SharedDecoder::new(DecoderConfig::DEFAULT);

    let bits = FrameBits::new().encode(HOURS_WEIGHTS, 12);
    DECODER.handle_pulse(P);
    for width in bits.pulses() {
        DECODER.handle_pulse(width);
    }

    let frame = DECODER.frame();
    assert_eq!(frame.hours, 12);
    assert_eq!(frame.received_frames(), 1);
    assert_eq!(DECODER.diagnostics().start_markers, 1);
    assert_eq!(DECODER.with(|d| d.position()), 100);
}
