//! IRIG-B Decoding
//!
//! Implements the receive path of the IRIG-B time code:
//! - Pulse classification and frame assembly
//! - Index mark boundary validation
//! - BCD field extraction
//! - Pulse timing statistics (feature `statistics`)

pub mod decoder;
pub mod fields;
pub mod frame;
#[cfg(feature = "statistics")]
pub mod stats;
pub mod validator;
