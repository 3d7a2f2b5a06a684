//! Interrupt-safe decoder wrapper
//!
//! The decoder must never be re-entered while a pulse is being processed,
//! and readers must not observe a half-updated record. [`SharedDecoder`]
//! serializes both behind a single critical section so it can live in a
//! `static` shared between the capture interrupt and the application.
//!
//! ```
//! use irigb_firmware::shared::SharedDecoder;
//! use irigb_firmware::irig::decoder::DecoderConfig;
//!
//! static DECODER: SharedDecoder = SharedDecoder::new(DecoderConfig::DEFAULT);
//!
//! // Capture interrupt
//! DECODER.handle_pulse(8_000);
//!
//! // Application
//! let frame = DECODER.frame();
//! assert!(!frame.frame_ok());
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::irig::decoder::{DecoderConfig, Diagnostics, IrigDecoder};
use crate::irig::frame::DecodedFrame;
#[cfg(feature = "statistics")]
use crate::irig::stats::TimingStats;

/// Decoder guarded by a critical section
pub struct SharedDecoder {
    inner: Mutex<RefCell<IrigDecoder>>,
}

impl SharedDecoder {
    /// Create a new shared decoder
    #[must_use]
    pub const fn new(config: DecoderConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(IrigDecoder::new(config))),
        }
    }

    /// Process one pulse width in microseconds
    pub fn handle_pulse(&self, width_us: u32) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).handle_pulse(width_us));
    }

    /// Snapshot of the decoded frame record
    #[must_use]
    pub fn frame(&self) -> DecodedFrame {
        critical_section::with(|cs| *self.inner.borrow_ref(cs).frame())
    }

    /// Snapshot of the timing statistics
    #[cfg(feature = "statistics")]
    #[must_use]
    pub fn timing(&self) -> TimingStats {
        critical_section::with(|cs| self.inner.borrow_ref(cs).timing().clone())
    }

    /// Snapshot of the dropped pulse counters
    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        critical_section::with(|cs| *self.inner.borrow_ref(cs).diagnostics())
    }

    /// Run `f` with exclusive access to the decoder
    pub fn with<R>(&self, f: impl FnOnce(&mut IrigDecoder) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}

impl Default for SharedDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::DEFAULT)
    }
}
