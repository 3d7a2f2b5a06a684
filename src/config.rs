//! System configuration and protocol constants
//!
//! This module defines compile-time constants for the IRIG-B decoder.
//! Pulse thresholds, frame geometry, field boundaries and capture timer
//! assignments are centralized here.

/// Pulses longer than this (µs) are logic zeros, shorter ones are noise
pub const ZERO_TIME_US: u32 = 1_000;

/// Pulses longer than this (µs) are logic ones
pub const ONE_TIME_US: u32 = 4_000;

/// Pulses longer than this (µs) are index marks
pub const INDEX_TIME_US: u32 = 7_000;

/// Number of bit slots in one IRIG-B frame
pub const FRAME_LEN: usize = 100;

/// Highest slot position inside a frame
pub const MAX_POSITION: u8 = 99;

/// Bits per group between two index marks
pub const GROUP_LEN: u8 = 10;

/// Cursor position right after the start-of-second marker
pub const FIRST_DATA_POSITION: u8 = 1;

/// Nominal bit period (100 pps)
pub const BIT_PERIOD_US: u32 = 10_000;

/// Ring capacity of each timing statistics window
pub const STATS_BUFFER_SIZE: usize = 10;

/// Closing positions of the groups that carry decoded fields
pub mod boundaries {
    //! Index mark positions at which a field becomes complete

    /// Seconds group closes here
    pub const SECONDS: u8 = 9;

    /// Minutes group closes here
    pub const MINUTES: u8 = 19;

    /// Hours group closes here
    pub const HOURS: u8 = 29;

    /// Day-of-year spans two groups and closes here
    pub const DAYS: u8 = 49;

    /// Year group closes here
    pub const YEARS: u8 = 59;

    /// Control group carrying the time quality code closes here
    pub const TIME_QUALITY: u8 = 79;

    /// Final group of the frame (straight binary seconds)
    pub const TIME_OF_DAY: u8 = 99;
}

/// Timer assignments
pub mod timers {
    //! Hardware timer assignments

    /// Timer running in input capture mode on the IRIG-B input
    pub const IRIG_CAPTURE: u8 = 2;

    /// Capture channel of [`IRIG_CAPTURE`]
    pub const IRIG_CAPTURE_CHANNEL: u8 = 1;

    /// Capture timer tick rate (1 tick = 1 µs)
    pub const CAPTURE_TICK_HZ: u32 = 1_000_000;
}
