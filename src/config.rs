//! Router configuration

use crate::error::RouterError;
use std::time::Duration;

/// Timing configuration for a [`HashRouter`](crate::HashRouter)
///
/// # Example
///
/// ```
/// use fragment_router::RouterConfig;
/// use std::time::Duration;
///
/// let config = RouterConfig::builder()
///     .interval(Duration::from_millis(100))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.interval, Duration::from_millis(100));
/// // The mirror follows the main interval unless set explicitly
/// assert_eq!(config.mirror_interval, Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// How often the location fragment is polled
    pub interval: Duration,
    /// How often the history mirror is read back (legacy hosts only)
    pub mirror_interval: Duration,
    /// Delay between readiness checks while the mirror is not attached
    pub attach_retry: Duration,
    /// Readiness checks before the mirror is declared unavailable
    pub max_attach_attempts: u32,
}

impl RouterConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);
    pub const DEFAULT_ATTACH_RETRY: Duration = Duration::from_millis(10);
    pub const DEFAULT_MAX_ATTACH_ATTEMPTS: u32 = 1000;

    /// Start building a configuration
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::default()
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            mirror_interval: Self::DEFAULT_INTERVAL,
            attach_retry: Self::DEFAULT_ATTACH_RETRY,
            max_attach_attempts: Self::DEFAULT_MAX_ATTACH_ATTEMPTS,
        }
    }
}

/// Builder for [`RouterConfig`]
#[derive(Debug, Clone, Default)]
pub struct RouterConfigBuilder {
    interval: Option<Duration>,
    mirror_interval: Option<Duration>,
    attach_retry: Option<Duration>,
    max_attach_attempts: Option<u32>,
}

impl RouterConfigBuilder {
    /// Poll interval for the location fragment
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Poll interval for the history mirror
    pub fn mirror_interval(mut self, interval: Duration) -> Self {
        self.mirror_interval = Some(interval);
        self
    }

    /// Delay between mirror readiness checks
    pub fn attach_retry(mut self, delay: Duration) -> Self {
        self.attach_retry = Some(delay);
        self
    }

    /// Readiness checks before giving up on the mirror
    pub fn max_attach_attempts(mut self, attempts: u32) -> Self {
        self.max_attach_attempts = Some(attempts);
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<RouterConfig, RouterError> {
        let interval = self.interval.unwrap_or(RouterConfig::DEFAULT_INTERVAL);
        let config = RouterConfig {
            interval,
            mirror_interval: self.mirror_interval.unwrap_or(interval),
            attach_retry: self
                .attach_retry
                .unwrap_or(RouterConfig::DEFAULT_ATTACH_RETRY),
            max_attach_attempts: self
                .max_attach_attempts
                .unwrap_or(RouterConfig::DEFAULT_MAX_ATTACH_ATTEMPTS),
        };
        config.validate()?;
        Ok(config)
    }
}

impl RouterConfig {
    /// Reject zero durations and a zero attempt budget
    pub fn validate(&self) -> Result<(), RouterError> {
        let checks = [
            (self.interval.is_zero(), "interval must be positive"),
            (self.mirror_interval.is_zero(), "mirror interval must be positive"),
            (self.attach_retry.is_zero(), "attach retry delay must be positive"),
            (self.max_attach_attempts == 0, "max attach attempts must be positive"),
        ];
        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, message)) => Err(RouterError::InvalidConfig {
                message: (*message).to_string(),
            }),
            None => Ok(()),
        }
    }
}
