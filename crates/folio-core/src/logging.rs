#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature the controller logs through the [`tracing`]
//! macros, re-exported at the crate root. Without it, macros of the same
//! names are exported at the crate root instead and expand to borrows of the
//! logged values, so call sites stay identical and bindings used only for
//! logging do not turn into unused-variable warnings.
//!
//! [`tracing`]: https://docs.rs/tracing

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, warn};

// When tracing is not enabled, provide no-op macros
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Borrows every value named in a `tracing`-style field list.
    ///
    /// Accepts `name`, `name = value`, `name = %value`, `name = ?value`,
    /// `%name`, `?name` and string literals, separated by commas.
    #[doc(hidden)]
    #[macro_export]
    macro_rules! __log_noop_fields {
        () => {};
        ($name:ident = % $value:expr $(, $($rest:tt)*)?) => {
            let _ = &$value;
            $($crate::__log_noop_fields!($($rest)*);)?
        };
        ($name:ident = ? $value:expr $(, $($rest:tt)*)?) => {
            let _ = &$value;
            $($crate::__log_noop_fields!($($rest)*);)?
        };
        ($name:ident = $value:expr $(, $($rest:tt)*)?) => {
            let _ = &$value;
            $($crate::__log_noop_fields!($($rest)*);)?
        };
        (% $value:ident $(, $($rest:tt)*)?) => {
            let _ = &$value;
            $($crate::__log_noop_fields!($($rest)*);)?
        };
        (? $value:ident $(, $($rest:tt)*)?) => {
            let _ = &$value;
            $($crate::__log_noop_fields!($($rest)*);)?
        };
        ($message:literal $(, $($rest:tt)*)?) => {
            $($crate::__log_noop_fields!($($rest)*);)?
        };
        ($value:ident $(, $($rest:tt)*)?) => {
            let _ = &$value;
            $($crate::__log_noop_fields!($($rest)*);)?
        };
    }

    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {{
            $crate::__log_noop_fields!($($arg)*);
        }};
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {{
            $crate::__log_noop_fields!($($arg)*);
        }};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {{
            $crate::__log_noop_fields!($($arg)*);
        }};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {{
            $crate::__log_noop_fields!($($arg)*);
        }};
    }
}

// Note: Macros are exported at crate root via #[macro_export],
// so we don't need to re-export noop_macros::* here.
