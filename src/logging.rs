//! Router logging
//!
//! Every record the router emits goes out under the `fragment_router`
//! target, through `log` or `tracing` depending on the enabled feature, so a
//! host filters the whole router with one directive
//! (`RUST_LOG=fragment_router=debug`).
//!
//! # Features
//!
//! - `log` (default) - Uses the standard `log` crate
//! - `tracing` - Uses the `tracing` crate for structured logging
//!
//! Choose one feature at compile time. They are mutually exclusive.
//!
//! # Levels
//!
//! | Level | Events |
//! |---|---|
//! | trace | fragment transitions, cache lookups, frame rewrites and flushes |
//! | debug | `go` calls, dispatch to a route, route registration, frame restores |
//! | info | engage and disengage |
//! | warn | legacy host with no history frame |
//! | error | the mirror task giving up on an unattached frame |
//!
//! ```ignore
//! use fragment_router::{debug_log, trace_log};
//!
//! trace_log!("Fragment changed from '{}' to '{}'", previous, fragment);
//! debug_log!("Dispatching '{}' to route '{}'", fragment, pattern);
//! ```

/// Log target shared by every router record
pub const TARGET: &str = "fragment_router";

#[doc(hidden)]
#[macro_export]
macro_rules! __router_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Fragment transitions and frame bookkeeping; noisy at the poll interval
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__router_log!(trace, $($arg)*)
    };
}

/// One record per navigation or dispatch
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__router_log!(debug, $($arg)*)
    };
}

/// Engage and disengage
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__router_log!(info, $($arg)*)
    };
}

/// Degraded hosts the router keeps working on
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__router_log!(warn, $($arg)*)
    };
}

/// Faults; every error record is also stored as [`HashRouter::fault`](crate::HashRouter::fault)
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__router_log!(error, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_every_level_accepts_format_args() {
        let fragment = "posts/1";
        crate::trace_log!("Fragment changed to '{}'", fragment);
        crate::debug_log!("Dispatching '{}'", fragment);
        crate::info_log!("Hash router engaged");
        crate::warn_log!("Degraded host for '{fragment}'");
        crate::error_log!("Hash router fault: {}", fragment);
    }

    #[test]
    fn test_target_is_crate_name() {
        assert_eq!(super::TARGET, env!("CARGO_PKG_NAME").replace('-', "_"));
    }
}
