//! Host location access
//!
//! [`Location`] is everything the router needs from its host: the current
//! fragment, a way to set it, the host's capability profile, and optionally a
//! native change notification and a hidden history frame.
//!
//! [`MemoryLocation`] is an in-process host for headless use and tests.

use crate::history::History;
use crate::host::HostProfile;
use crate::mirror::{FrameMirror, HistoryMirror};
use crate::trace_log;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// The host's navigable location
pub trait Location: Send + Sync {
    /// Raw location hash, including the leading `#` if the host reports one
    fn hash(&self) -> String;

    /// Set the location hash, e.g. `"#posts/1"`
    fn set_hash(&self, hash: &str);

    /// Capability profile, read once when a router is built
    fn profile(&self) -> HostProfile {
        HostProfile::modern()
    }

    /// Signal fired by the host when the fragment changes on its own
    fn change_notifier(&self) -> Option<Arc<Notify>> {
        None
    }

    /// Hidden frame used for history mirroring on legacy hosts
    fn history_frame(&self) -> Option<Arc<dyn HistoryMirror>> {
        None
    }
}

/// In-memory location with a browser-like history.
///
/// On a legacy profile it behaves like old Internet Explorer: setting the
/// hash creates no history entry, and [`back`](MemoryLocation::back) /
/// [`forward`](MemoryLocation::forward) step the hidden frame instead of the
/// visible fragment.
///
/// # Example
///
/// ```
/// use fragment_router::{Location, MemoryLocation};
///
/// let location = MemoryLocation::new();
/// location.set_hash("#inbox");
/// location.set_hash("#inbox/3");
/// location.back();
/// assert_eq!(location.hash(), "#inbox");
/// ```
#[derive(Debug)]
pub struct MemoryLocation {
    history: Mutex<History>,
    profile: HostProfile,
    notifier: Option<Arc<Notify>>,
    frame: Option<Arc<FrameMirror>>,
}

impl MemoryLocation {
    /// Modern host without native notifications; changes are seen by polling
    pub fn new() -> Self {
        Self::with_profile(HostProfile {
            native_hashchange: false,
            ..HostProfile::modern()
        })
    }

    /// Host described by `profile`.
    ///
    /// Native notifications follow `profile.native_hashchange`; a hidden
    /// frame is created when the profile requires mirroring. The frame starts
    /// detached, call [`FrameMirror::attach`] to model document-ready.
    pub fn with_profile(profile: HostProfile) -> Self {
        Self {
            history: Mutex::new(History::default()),
            profile,
            notifier: profile.native_hashchange.then(|| Arc::new(Notify::new())),
            frame: profile
                .requires_mirror()
                .then(|| Arc::new(FrameMirror::new())),
        }
    }

    /// The hidden frame, on legacy profiles
    pub fn frame(&self) -> Option<Arc<FrameMirror>> {
        self.frame.clone()
    }

    /// Press the back button; returns false when there is nothing to go back to
    pub fn back(&self) -> bool {
        if let Some(frame) = &self.frame {
            return frame.back();
        }
        let stepped = self.lock().back();
        if stepped {
            self.notify();
        }
        stepped
    }

    /// Press the forward button; returns false at the newest entry
    pub fn forward(&self) -> bool {
        if let Some(frame) = &self.frame {
            return frame.forward();
        }
        let stepped = self.lock().forward();
        if stepped {
            self.notify();
        }
        stepped
    }

    /// Number of entries in the visible history
    pub fn history_len(&self) -> usize {
        self.lock().len()
    }

    fn notify(&self) {
        if let Some(notifier) = &self.notifier {
            notifier.notify_one();
        }
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl Location for MemoryLocation {
    fn hash(&self) -> String {
        self.lock().current().to_string()
    }

    fn set_hash(&self, hash: &str) {
        // A bare "#" reads back as an empty hash, as in browsers.
        let hash = if hash == "#" { "" } else { hash };
        {
            let mut history = self.lock();
            if history.current() == hash {
                return;
            }
            trace_log!("Location hash set to '{}'", hash);
            if self.frame.is_some() {
                history.replace(hash);
            } else {
                history.push(hash);
            }
        }
        self.notify();
    }

    fn profile(&self) -> HostProfile {
        self.profile
    }

    fn change_notifier(&self) -> Option<Arc<Notify>> {
        self.notifier.clone()
    }

    fn history_frame(&self) -> Option<Arc<dyn HistoryMirror>> {
        self.frame
            .clone()
            .map(|frame| frame as Arc<dyn HistoryMirror>)
    }
}
