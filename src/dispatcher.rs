//! The hash router: polling change detection and route dispatch
//!
//! A [`HashRouter`] watches its host's location fragment. Two periodic tasks
//! feed one internal change signal:
//!
//! - the **poll task** compares the host fragment with the last one acted
//!   upon every `interval`, and also wakes on the host's native change
//!   notification when there is one;
//! - the **mirror task** (legacy hosts only) reads the hidden history frame
//!   every `mirror_interval` and, when the user has stepped through history,
//!   copies the frame's fragment back into the location and fires the signal
//!   right away.
//!
//! Handling the signal normalises the fragment, stores it, mirrors it out and
//! invokes the first matching route. Actions run with no lock held, so they
//! may call [`HashRouter::go`] or [`HashRouter::add_route`] themselves.

use crate::config::RouterConfig;
use crate::error::{DispatchOutcome, RouterError};
use crate::fragment::{clean_hash, to_location_hash};
use crate::location::Location;
use crate::mirror::{HistoryMirror, NoopMirror};
use crate::route::Route;
use crate::state::RouterState;
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shared between the router handle and its tasks
struct Inner {
    location: Arc<dyn Location>,
    config: RouterConfig,
    legacy: bool,
    mirror: Arc<dyn HistoryMirror>,
    state: Mutex<RouterState>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The change signal: normalise, store, mirror out, dispatch.
    fn trigger_change(&self) -> DispatchOutcome {
        let fragment = clean_hash(&self.location.hash()).to_string();

        let found = {
            let mut state = self.lock();
            let previous = state.advance(fragment.clone());
            trace_log!("Fragment changed from '{}' to '{}'", previous, fragment);

            if self.legacy {
                if self.mirror.is_ready() {
                    self.mirror.mirror_out(&fragment);
                    state.pending_mirror = None;
                } else {
                    state.pending_mirror = Some(fragment.clone());
                }
            }

            state.routes.resolve(&fragment)
        };

        match found {
            Some(hit) => {
                debug_log!("Dispatching '{}' to route '{}'", fragment, hit.pattern);
                hit.invoke();
                DispatchOutcome::Matched {
                    pattern: hit.pattern,
                    captures: hit.captures,
                }
            }
            None => {
                trace_log!("No route matches '{}'", fragment);
                DispatchOutcome::Unmatched { fragment }
            }
        }
    }

    /// Main loop tick: fire the signal if the host fragment moved.
    fn poll_location(&self) -> Option<DispatchOutcome> {
        let raw = self.location.hash();
        let stale = self.lock().is_stale(clean_hash(&raw));
        stale.then(|| self.trigger_change())
    }

    /// Mirror loop tick: a frame value that differs from the current
    /// fragment means the user navigated history.
    fn poll_mirror(&self) -> Option<DispatchOutcome> {
        if !self.legacy {
            return None;
        }
        let stored = {
            // Read under the state lock so a concurrent mirror_out can't
            // slip between the read and the comparison.
            let state = self.lock();
            let stored = self.mirror.mirror_in();
            if !state.is_stale(&stored) {
                return None;
            }
            stored
        };
        debug_log!("History frame moved to '{}'", stored);
        self.location.set_hash(&to_location_hash(&stored));
        Some(self.trigger_change())
    }

    fn flush_pending_mirror(&self) {
        let mut state = self.lock();
        if let Some(fragment) = state.pending_mirror.take() {
            trace_log!("Flushing pending mirror write '{}'", fragment);
            self.mirror.mirror_out(&fragment);
        }
    }

    fn record_fault(&self, err: RouterError) {
        error_log!("Hash router fault: {}", err);
        self.lock().fault = Some(err);
    }
}

async fn run_poll(inner: Arc<Inner>, native: Option<Arc<Notify>>, start: Instant) {
    let period = inner.config.interval;
    let mut ticker = time::interval_at(start + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        match &native {
            Some(notifier) => {
                tokio::select! {
                    _ = ticker.tick() => {
                        inner.poll_location();
                    }
                    () = notifier.notified() => {
                        trace_log!("Native fragment change notification");
                        inner.trigger_change();
                    }
                }
            }
            None => {
                ticker.tick().await;
                inner.poll_location();
            }
        }
    }
}

async fn run_mirror(inner: Arc<Inner>) {
    let max_attempts = inner.config.max_attach_attempts;
    let mut attempts = 0;
    while !inner.mirror.is_ready() {
        if attempts >= max_attempts {
            inner.record_fault(RouterError::MirrorUnavailable { attempts });
            return;
        }
        attempts += 1;
        time::sleep(inner.config.attach_retry).await;
    }
    if attempts > 0 {
        debug_log!("History frame ready after {} checks", attempts);
    }
    inner.flush_pending_mirror();

    let period = inner.config.mirror_interval;
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        inner.poll_mirror();
    }
}

enum Lifecycle {
    Idle,
    Engaged {
        poll: JoinHandle<()>,
        mirror: Option<JoinHandle<()>>,
    },
    Disengaged,
}

/// Location-fragment router
///
/// # Example
///
/// ```
/// use fragment_router::{HashRouter, MemoryLocation};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), fragment_router::RouterError> {
/// let location = Arc::new(MemoryLocation::new());
/// let router = HashRouter::new(location.clone());
///
/// router.add_route("posts/(\\d+)", |captures: &[String]| {
///     println!("showing post {}", captures[0]);
/// })?;
///
/// router.engage()?;
/// router.go("posts/12");
/// // Dispatch happens on the next poll tick, not inside `go`.
/// assert_eq!(router.current_hash(), "");
/// router.disengage();
/// # Ok(())
/// # }
/// ```
pub struct HashRouter {
    inner: Arc<Inner>,
    lifecycle: Mutex<Lifecycle>,
}

impl HashRouter {
    /// Router with the default 200 ms polling interval
    pub fn new(location: Arc<dyn Location>) -> Self {
        Self::build(location, RouterConfig::default())
    }

    /// Router with explicit timing
    pub fn with_config(
        location: Arc<dyn Location>,
        config: RouterConfig,
    ) -> Result<Self, RouterError> {
        config.validate()?;
        Ok(Self::build(location, config))
    }

    fn build(location: Arc<dyn Location>, config: RouterConfig) -> Self {
        let frame = if location.profile().requires_mirror() {
            let frame = location.history_frame();
            if frame.is_none() {
                warn_log!("Legacy host without a history frame; back/forward will go unnoticed");
            }
            frame
        } else {
            None
        };
        // Mirroring needs a real frame; without one the host is polled as-is.
        let legacy = frame.is_some();
        let mirror = frame.unwrap_or_else(|| Arc::new(NoopMirror) as Arc<dyn HistoryMirror>);

        Self {
            inner: Arc::new(Inner {
                location,
                config,
                legacy,
                mirror,
                state: Mutex::new(RouterState::new()),
            }),
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    /// Register `action` for fragments matching `pattern`.
    ///
    /// The pattern is a regular expression anchored to the whole fragment;
    /// captured groups are passed to the action in order. Registering the
    /// same pattern string again replaces the earlier action. Routes are
    /// tried in registration order and the first match wins.
    pub fn add_route<F>(&self, pattern: impl Into<String>, action: F) -> Result<(), RouterError>
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.insert(Route::new(pattern, action)?);
        Ok(())
    }

    /// Register `pattern` with an action that does nothing
    pub fn add_route_noop(&self, pattern: impl Into<String>) -> Result<(), RouterError> {
        self.insert(Route::noop(pattern)?);
        Ok(())
    }

    /// Register a pre-built route
    pub fn insert(&self, route: Route) {
        self.inner.lock().routes.insert(route);
    }

    /// Navigate to `fragment` by setting the host's hash to `#fragment`.
    ///
    /// Dispatch follows from the next detected change; it never happens
    /// inside this call.
    pub fn go(&self, fragment: &str) {
        debug_log!("Navigating to '{}'", fragment);
        self.inner.location.set_hash(&to_location_hash(fragment));
    }

    /// Start the poll task, and the mirror task on legacy hosts.
    ///
    /// Must be called from within a tokio runtime.
    pub fn engage(&self) -> Result<(), RouterError> {
        let mut lifecycle = self.lock_lifecycle();
        match *lifecycle {
            Lifecycle::Idle => {}
            Lifecycle::Engaged { .. } => return Err(RouterError::AlreadyEngaged),
            Lifecycle::Disengaged => return Err(RouterError::Disengaged),
        }
        let handle = Handle::try_current().map_err(|_| RouterError::NoRuntime)?;

        let poll = handle.spawn(run_poll(
            self.inner.clone(),
            self.inner.location.change_notifier(),
            Instant::now(),
        ));
        let mirror = self
            .inner
            .legacy
            .then(|| handle.spawn(run_mirror(self.inner.clone())));

        info_log!(
            "Hash router engaged (interval {:?}, legacy {})",
            self.inner.config.interval,
            self.inner.legacy
        );
        *lifecycle = Lifecycle::Engaged { poll, mirror };
        Ok(())
    }

    /// Stop both tasks. Safe to call more than once; the router cannot be
    /// engaged again afterwards.
    pub fn disengage(&self) {
        let previous = std::mem::replace(&mut *self.lock_lifecycle(), Lifecycle::Disengaged);
        if let Lifecycle::Engaged { poll, mirror } = previous {
            poll.abort();
            if let Some(mirror) = mirror {
                mirror.abort();
            }
            info_log!("Hash router disengaged");
        }
    }

    /// Handle a change signal now, without waiting for a tick.
    ///
    /// For hosts that drive detection themselves. Works whether or not the
    /// router is engaged.
    pub fn dispatch_now(&self) -> DispatchOutcome {
        self.inner.trigger_change()
    }

    /// Run one poll tick now; `None` when the fragment hasn't changed
    pub fn poll_now(&self) -> Option<DispatchOutcome> {
        self.inner.poll_location()
    }

    /// Run one mirror tick now; `None` when the frame agrees with the
    /// current fragment or the host isn't mirrored
    pub fn poll_mirror_now(&self) -> Option<DispatchOutcome> {
        self.inner.poll_mirror()
    }

    /// Last fragment acted upon
    pub fn current_hash(&self) -> String {
        self.inner.lock().current_hash().to_string()
    }

    /// Route patterns in match order
    pub fn routes(&self) -> Vec<String> {
        self.inner.lock().routes().patterns()
    }

    /// Number of change signals handled since construction
    pub fn signals(&self) -> u64 {
        self.inner.lock().signals()
    }

    /// Whether the history mirror is in use
    pub fn is_legacy(&self) -> bool {
        self.inner.legacy
    }

    /// Whether the periodic tasks are running
    pub fn is_engaged(&self) -> bool {
        matches!(*self.lock_lifecycle(), Lifecycle::Engaged { .. })
    }

    /// Fatal error recorded by a background task
    pub fn fault(&self) -> Option<RouterError> {
        self.inner.lock().fault().cloned()
    }

    /// Timing in effect
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for HashRouter {
    fn drop(&mut self) {
        self.disengage();
    }
}

impl std::fmt::Debug for HashRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRouter")
            .field("current_hash", &self.current_hash())
            .field("legacy", &self.inner.legacy)
            .field("engaged", &self.is_engaged())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostProfile;
    use crate::location::MemoryLocation;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&[String]) + Send + Sync + 'static) {
        let calls = Arc::new(AtomicUsize::new(0));
        let handle = calls.clone();
        (calls, move |_: &[String]| {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_go_does_not_dispatch() {
        let location = Arc::new(MemoryLocation::new());
        let router = HashRouter::new(location.clone());
        let (calls, action) = counter();
        router.add_route("x/y", action).unwrap();

        router.go("x/y");
        assert_eq!(location.hash(), "#x/y");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(router.current_hash(), "");
    }

    #[test]
    fn test_poll_now_detects_change_once() {
        let location = Arc::new(MemoryLocation::new());
        let router = HashRouter::new(location);
        let (calls, action) = counter();
        router.add_route("x/y", action).unwrap();

        router.go("x/y");
        assert!(router.poll_now().unwrap().is_matched());
        assert!(router.poll_now().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(router.current_hash(), "x/y");
    }

    #[test]
    fn test_dispatch_now_is_repeatable() {
        let location = Arc::new(MemoryLocation::new());
        let router = HashRouter::new(location);
        let (calls, action) = counter();
        router.add_route("", action).unwrap();

        router.dispatch_now();
        router.dispatch_now();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_pattern_rejected_at_registration() {
        let router = HashRouter::new(Arc::new(MemoryLocation::new()));
        let err = router.add_route_noop("(unclosed").unwrap_err();
        assert!(matches!(err, RouterError::InvalidPattern { .. }));
        assert!(router.routes().is_empty());
    }

    #[test]
    fn test_engage_outside_runtime() {
        let router = HashRouter::new(Arc::new(MemoryLocation::new()));
        assert_eq!(router.engage(), Err(RouterError::NoRuntime));
        assert!(!router.is_engaged());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RouterConfig {
            interval: std::time::Duration::ZERO,
            ..RouterConfig::default()
        };
        assert!(HashRouter::with_config(Arc::new(MemoryLocation::new()), config).is_err());
    }

    #[test]
    fn test_legacy_detection() {
        let modern = HashRouter::new(Arc::new(MemoryLocation::new()));
        assert!(!modern.is_legacy());

        let legacy = HashRouter::new(Arc::new(MemoryLocation::with_profile(HostProfile::msie(6))));
        assert!(legacy.is_legacy());
    }

    struct FramelessLocation {
        inner: MemoryLocation,
    }

    impl Location for FramelessLocation {
        fn hash(&self) -> String {
            self.inner.hash()
        }

        fn set_hash(&self, hash: &str) {
            self.inner.set_hash(hash);
        }

        fn profile(&self) -> HostProfile {
            HostProfile::msie(6)
        }
    }

    #[test]
    fn test_legacy_profile_without_frame_is_not_legacy() {
        let router = HashRouter::new(Arc::new(FramelessLocation {
            inner: MemoryLocation::new(),
        }));
        assert!(!router.is_legacy());

        router.go("posts/1");
        router.poll_now();
        assert_eq!(router.poll_mirror_now(), None);
        assert_eq!(router.current_hash(), "posts/1");
    }

    #[test]
    fn test_signals_count_every_change() {
        let location = Arc::new(MemoryLocation::new());
        let router = HashRouter::new(location);
        router.add_route_noop("(.*)").unwrap();
        assert_eq!(router.signals(), 0);

        router.go("a");
        router.poll_now();
        router.poll_now();
        router.dispatch_now();
        assert_eq!(router.signals(), 2);
    }

    #[test]
    fn test_pending_mirror_flushed_on_attach() {
        let location = Arc::new(MemoryLocation::with_profile(HostProfile::msie(7)));
        let frame = location.frame().unwrap();
        let router = HashRouter::new(location.clone());

        router.go("early");
        router.poll_now();
        assert_eq!(frame.rewrites(), 0);

        frame.attach();
        router.inner.flush_pending_mirror();
        assert_eq!(frame.mirror_in(), "early");
    }

    #[test]
    fn test_action_may_navigate() {
        let location = Arc::new(MemoryLocation::new());
        let router = HashRouter::new(location.clone());
        let target = location.clone();
        router
            .add_route("old", move |_: &[String]| target.set_hash("#new"))
            .unwrap();

        router.go("old");
        router.poll_now();
        assert_eq!(location.hash(), "#new");
        assert_eq!(
            router.poll_now(),
            Some(DispatchOutcome::Unmatched {
                fragment: "new".to_string()
            })
        );
    }
}
