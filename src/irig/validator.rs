//! Index mark boundary validation.

use super::fields::Field;
use super::frame::{DecodedFrame, FrameBuffer};
use crate::config::{GROUP_LEN, MAX_POSITION};
use crate::types::TimeQualityBitOrder;

/// Result of checking one index mark
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Mark closed a 10-bit group; carries the field decoded, if any
    Valid(Option<Field>),
    /// Mark arrived off the 10-bit grid
    Misaligned,
}

/// Check if an index mark at `position` closes a 10-bit group
#[must_use]
pub const fn is_group_boundary(position: u8) -> bool {
    (position as u16 + 1) % GROUP_LEN as u16 == 0
}

/// Check the index mark closing the group that ends at `position`
///
/// On a valid boundary the record is marked OK, the good counter advances,
/// position 99 counts a complete frame, and the field closing there (if
/// any) is decoded. On a misaligned boundary the record is marked bad and
/// the bad counter advances. Synchronization is left alone either way.
pub fn check_boundary(
    position: u8,
    buf: &FrameBuffer,
    frame: &mut DecodedFrame,
    order: TimeQualityBitOrder,
) -> Boundary {
    if !is_group_boundary(position) {
        frame.record_bad_boundary();
        return Boundary::Misaligned;
    }

    frame.record_good_boundary();
    if position == MAX_POSITION {
        frame.record_complete_frame();
    }

    let field = Field::closing_at(position);
    if let Some(field) = field {
        field.apply(buf, frame, order);
    }
    Boundary::Valid(field)
}
