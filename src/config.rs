use std::time::Duration;

use bon::Builder;

use crate::{api::decode::ContributorPolicy, paths::USER_AGENT};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Pause the old Android client took before every request so its progress
/// spinner had time to show. Pass it to `progress_delay` to get that back.
pub const LEGACY_PROGRESS_DELAY: Duration = Duration::from_millis(2_000);

#[derive(Debug, Clone, Builder)]
pub struct FetchConfig {
    #[builder(default = DEFAULT_CONNECT_TIMEOUT)]
    pub connect_timeout: Duration,
    #[builder(default = DEFAULT_READ_TIMEOUT)]
    pub read_timeout: Duration,
    /// Applied by the client before each fetch, never by the fetcher itself.
    pub progress_delay: Option<Duration>,
    #[builder(default)]
    pub https_only: bool,
    #[builder(into, default = USER_AGENT.to_string())]
    pub user_agent: String,
    #[builder(default)]
    pub contributor_policy: ContributorPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
