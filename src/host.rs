//! Host capability profile
//!
//! Decides, once, whether the legacy history mirror is needed. Only Internet
//! Explorer before version 8 qualifies: it has no `hashchange` event and its
//! back/forward buttons don't create observable fragment changes.

/// Rendering engine family of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Internet Explorer (MSIE / Trident)
    Trident,
    /// Anything else
    Other,
}

/// Capability profile of the host environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProfile {
    /// Engine family
    pub engine: Engine,
    /// Major engine version, 0 when unknown
    pub version: u32,
    /// Whether the host delivers native fragment-change notifications
    pub native_hashchange: bool,
}

impl HostProfile {
    /// A host with reliable native fragment-change notification
    pub const fn modern() -> Self {
        Self {
            engine: Engine::Other,
            version: 0,
            native_hashchange: true,
        }
    }

    /// Internet Explorer with the given major version
    pub const fn msie(version: u32) -> Self {
        Self {
            engine: Engine::Trident,
            version,
            native_hashchange: version >= 8,
        }
    }

    /// Read the engine and version from a user-agent string.
    ///
    /// # Example
    ///
    /// ```
    /// use fragment_router::HostProfile;
    ///
    /// let ie7 = HostProfile::from_user_agent("Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0)");
    /// assert!(ie7.requires_mirror());
    ///
    /// let firefox = HostProfile::from_user_agent("Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0");
    /// assert!(!firefox.requires_mirror());
    /// ```
    pub fn from_user_agent(user_agent: &str) -> Self {
        if let Some(version) = version_after(user_agent, "MSIE ") {
            return Self::msie(version);
        }
        // IE11 dropped the MSIE token and reports `Trident/7.0; rv:11.0`.
        if user_agent.contains("Trident/") {
            return Self::msie(version_after(user_agent, "rv:").unwrap_or(11));
        }
        Self::modern()
    }

    /// True when fragment changes from back/forward can't be observed
    /// without the hidden-frame mirror
    pub fn requires_mirror(&self) -> bool {
        self.engine == Engine::Trident && self.version < 8
    }
}

impl Default for HostProfile {
    fn default() -> Self {
        Self::modern()
    }
}

fn version_after(haystack: &str, token: &str) -> Option<u32> {
    let start = haystack.find(token)? + token.len();
    let digits: String = haystack[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
