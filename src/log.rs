//! Logging shim.
//!
//! Forwards to `defmt` or `log` depending on the enabled feature and expands to
//! nothing when neither is enabled. Arguments are still type-checked in the
//! silent configuration.
#![allow(unused_macros)]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("features `defmt` and `log` are mutually exclusive");

macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)+);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = ($($arg)+,);
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)+);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = ($($arg)+,);
    }};
}

macro_rules! warning {
    ($($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)+);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = ($($arg)+,);
    }};
}

pub(crate) use {debug, trace, warning};
