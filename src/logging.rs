//! Logging macros over the `log` facade.
//!
//! With the `logging` feature disabled they expand to nothing that runs, but
//! still type-check their arguments.

macro_rules! tt_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        ::log::debug!($($arg)*);
        #[cfg(not(feature = "logging"))]
        if false {
            let _ = ::std::format!($($arg)*);
        }
    }};
}

macro_rules! tt_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        ::log::trace!($($arg)*);
        #[cfg(not(feature = "logging"))]
        if false {
            let _ = ::std::format!($($arg)*);
        }
    }};
}

pub(crate) use tt_debug;
pub(crate) use tt_trace;
