//! # Fragment Router
//!
//! A location-fragment ("hash") dispatcher for single-page applications:
//!
//! - **Pattern Routes** - Regular-expression routes anchored to the whole
//!   fragment, with captured groups passed to the action
//! - **Registration Order** - The first registered route that matches wins
//! - **Polling Detection** - A periodic task notices fragment changes, with
//!   optional native change notification on top
//! - **Legacy History** - A hidden-frame mirror keeps back/forward working on
//!   hosts that can't report fragment changes from history navigation
//! - **URL Templates** - Named endpoint URLs with `:placeholder` substitution
//!
//! # Quick Start
//!
//! ```
//! use fragment_router::{HashRouter, MemoryLocation};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> Result<(), fragment_router::RouterError> {
//! let location = Arc::new(MemoryLocation::new());
//! let router = HashRouter::new(location.clone());
//!
//! router.add_route("posts/(\\d+)", |captures: &[String]| {
//!     println!("post {}", captures[0]);
//! })?;
//! router.add_route_noop("")?;
//!
//! router.engage()?;
//! router.go("posts/42");
//!
//! tokio::time::sleep(Duration::from_millis(250)).await;
//! assert_eq!(router.current_hash(), "posts/42");
//! # Ok(())
//! # }
//! ```
//!
//! # Hosts
//!
//! The router reads and writes the fragment through the [`Location`] trait.
//! [`MemoryLocation`] is an in-process implementation with a browser-like
//! history, useful headless and in tests. A host's [`HostProfile`] decides,
//! once, whether the legacy history mirror is needed.
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache of fragment resolutions

#![doc(html_root_url = "https://docs.rs/fragment-router/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core routing modules
pub mod dispatcher;
pub mod route;
pub mod state;
pub mod table;

// Host integration
pub mod history;
pub mod host;
pub mod location;
pub mod mirror;

// Error handling
pub mod error;

// Other modules
pub mod config;
pub mod fragment;
pub mod params;
pub mod urls;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, RouteCache};
pub use config::{RouterConfig, RouterConfigBuilder};
pub use dispatcher::HashRouter;
pub use error::{DispatchOutcome, RouterError};
pub use fragment::{clean_hash, to_location_hash};
pub use history::History;
pub use host::{Engine, HostProfile};
pub use location::{Location, MemoryLocation};
pub use mirror::{FrameMirror, HistoryMirror, NoopMirror};
pub use params::RouteParams;
pub use route::{Action, Route};
pub use state::RouterState;
pub use table::{RouteMatch, RouteTable};
pub use urls::{UrlManager, UrlTemplate};
