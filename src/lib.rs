//! IRIG-B Time Code Decoder Library
//!
//! This library decodes an IRIG-B (pulse-width coded, 100 pps) time code
//! signal into a time-of-day frame plus signal quality statistics. The
//! input is the width of each high pulse in microseconds, as measured by a
//! hardware timer running in input capture mode.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CAPTURE ADAPTER (capture)                   │
//! │        timer capture counts  ─►  pulse width (µs)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    DECODER (irig::decoder)                   │
//! │  Classifier  │  Frame Assembler  │  Boundary Validator       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      OUTPUTS                                 │
//! │  Field Decoders (BCD)  │  Timing Statistics (optional)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single owner**: [`IrigDecoder`] owns the frame buffer, decoded record
//!   and statistics; `handle_pulse` is the only mutating entry point
//! - **Run to completion**: every pulse is fully processed before returning,
//!   no allocation, no suspension points
//! - **Degrade, never abort**: anomalies are counted, decoding continues
//! - **No unsafe in application code**

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod fmt;

/// IRIG-B Decoding
///
/// Pulse classification, frame assembly, boundary validation and field
/// extraction.
pub mod irig;

/// Input Capture Adapter
///
/// Converts raw timer capture values into pulse widths.
pub mod capture;

/// Interrupt-safe decoder wrapper
pub mod shared;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

pub use capture::{CaptureError, Edge, PulseCapture};
pub use irig::decoder::{DecoderConfig, Diagnostics, IrigDecoder};
pub use irig::frame::{DecodedFrame, FrameBuffer};
#[cfg(feature = "statistics")]
pub use irig::stats::{RollingAverage, TimingStats};
pub use shared::SharedDecoder;
pub use types::{PulseClass, TimeQuality, TimeQualityBitOrder};

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::irig::decoder::{DecoderConfig, IrigDecoder};
    pub use crate::irig::frame::DecodedFrame;
    pub use crate::shared::SharedDecoder;

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
