//! Router state management

use crate::error::RouterError;
use crate::table::RouteTable;

/// Mutable state owned by one [`HashRouter`](crate::HashRouter)
#[derive(Debug, Default)]
pub struct RouterState {
    /// Registered routes
    pub(crate) routes: RouteTable,
    /// Last fragment observed and acted upon, without the leading `#`
    pub(crate) current_hash: String,
    /// Fragment waiting for the history mirror to attach
    pub(crate) pending_mirror: Option<String>,
    /// Fatal error recorded by a background task
    pub(crate) fault: Option<RouterError>,
    /// Number of change signals handled
    pub(crate) signals: u64,
}

impl RouterState {
    /// Create empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Last fragment acted upon
    pub fn current_hash(&self) -> &str {
        &self.current_hash
    }

    /// Registered routes
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Fatal error recorded by a background task, if any
    pub fn fault(&self) -> Option<&RouterError> {
        self.fault.as_ref()
    }

    /// Number of change signals handled so far
    pub fn signals(&self) -> u64 {
        self.signals
    }

    /// Record a new current fragment; returns the previous one
    pub(crate) fn advance(&mut self, fragment: String) -> String {
        self.signals += 1;
        std::mem::replace(&mut self.current_hash, fragment)
    }

    /// True when `fragment` differs from the last one acted upon
    pub(crate) fn is_stale(&self, fragment: &str) -> bool {
        self.current_hash != fragment
    }
}
