//! Logging shims
//!
//! Forward to `defmt` on embedded builds. Host builds compile the calls
//! away but still borrow the arguments so they count as used.
#![allow(unused_macros)]

#[cfg(feature = "embedded")]
macro_rules! trace {
    ($($arg:tt)*) => { ::defmt::trace!($($arg)*) };
}

#[cfg(not(feature = "embedded"))]
macro_rules! trace {
    ($fmt:literal $(, $x:expr)* $(,)?) => {{ $( let _ = &$x; )* }};
}

#[cfg(feature = "embedded")]
macro_rules! debug {
    ($($arg:tt)*) => { ::defmt::debug!($($arg)*) };
}

#[cfg(not(feature = "embedded"))]
macro_rules! debug {
    ($fmt:literal $(, $x:expr)* $(,)?) => {{ $( let _ = &$x; )* }};
}

#[cfg(feature = "embedded")]
macro_rules! info {
    ($($arg:tt)*) => { ::defmt::info!($($arg)*) };
}

#[cfg(not(feature = "embedded"))]
macro_rules! info {
    ($fmt:literal $(, $x:expr)* $(,)?) => {{ $( let _ = &$x; )* }};
}

#[cfg(feature = "embedded")]
macro_rules! warn {
    ($($arg:tt)*) => { ::defmt::warn!($($arg)*) };
}

#[cfg(not(feature = "embedded"))]
macro_rules! warn {
    ($fmt:literal $(, $x:expr)* $(,)?) => {{ $( let _ = &$x; )* }};
}
