//! Browser-style history stack
//!
//! Backs the in-memory hosts: the visible fragment history of
//! [`MemoryLocation`](crate::MemoryLocation) and the document history of the
//! hidden [`FrameMirror`](crate::FrameMirror).
//! - Forward/backward stepping
//! - Forward entries truncated on a new push
//! - Configurable size limit

/// History stack of string entries
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    current: usize,
    /// Maximum history size (0 = unlimited)
    max_size: usize,
}

impl History {
    /// Create a history holding one initial entry
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_max_size(initial, 1000)
    }

    /// Create with custom max size
    pub fn with_max_size(initial: impl Into<String>, max_size: usize) -> Self {
        Self {
            entries: vec![initial.into()],
            current: 0,
            max_size,
        }
    }

    /// Current entry
    pub fn current(&self) -> &str {
        &self.entries[self.current]
    }

    /// Push a new entry, dropping any forward history
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.truncate(self.current + 1);
        self.entries.push(entry.into());
        self.current += 1;

        self.enforce_size_limit();
    }

    /// Overwrite the current entry
    pub fn replace(&mut self, entry: impl Into<String>) {
        self.entries[self.current] = entry.into();
    }

    /// Step back; false at the oldest entry
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Step forward; false at the newest entry
    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a history always holds its current entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn enforce_size_limit(&mut self) {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            let excess = self.entries.len() - self.max_size;
            self.entries.drain(0..excess);
            self.current = self.current.saturating_sub(excess);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(String::new())
    }
}
