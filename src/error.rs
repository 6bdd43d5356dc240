//! Error handling for the hash router
//!
//! Provides the router's error type and the outcome of a single change signal.

use std::fmt;

// ============================================================================
// Dispatch Outcome
// ============================================================================

/// What a change signal did with the current fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A route matched and its action was invoked
    Matched {
        pattern: String,
        captures: Vec<String>,
    },
    /// No route matched the fragment; nothing was invoked
    Unmatched { fragment: String },
}

impl DispatchOutcome {
    /// Check if a route matched
    pub fn is_matched(&self) -> bool {
        matches!(self, DispatchOutcome::Matched { .. })
    }

    /// Check if the fragment went unmatched
    pub fn is_unmatched(&self) -> bool {
        matches!(self, DispatchOutcome::Unmatched { .. })
    }

    /// Pattern of the matched route, if any
    pub fn pattern(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Matched { pattern, .. } => Some(pattern),
            DispatchOutcome::Unmatched { .. } => None,
        }
    }
}

// ============================================================================
// Router Errors
// ============================================================================

/// Errors that can occur while configuring or running the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A route pattern failed to compile
    InvalidPattern { pattern: String, message: String },

    /// A configuration value was rejected
    InvalidConfig { message: String },

    /// `engage` was called on a router that is already running
    AlreadyEngaged,

    /// The router was disengaged and cannot be restarted
    Disengaged,

    /// `engage` was called outside a tokio runtime
    NoRuntime,

    /// The history mirror never became ready
    MirrorUnavailable { attempts: u32 },

    /// No URL template is registered under this name
    UrlNotFound { name: String },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid route pattern '{}': {}", pattern, message)
            }
            RouterError::InvalidConfig { message } => {
                write!(f, "Invalid router configuration: {}", message)
            }
            RouterError::AlreadyEngaged => write!(f, "Router is already engaged"),
            RouterError::Disengaged => write!(f, "Router was disengaged and cannot be restarted"),
            RouterError::NoRuntime => write!(f, "Router must be engaged inside a tokio runtime"),
            RouterError::MirrorUnavailable { attempts } => {
                write!(f, "History mirror not attached after {} attempts", attempts)
            }
            RouterError::UrlNotFound { name } => write!(f, "Url not found: {}", name),
        }
    }
}

impl std::error::Error for RouterError {}

impl RouterError {
    /// Wrap a regex compilation failure for `pattern`
    pub fn invalid_pattern(pattern: impl Into<String>, err: &regex::Error) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
