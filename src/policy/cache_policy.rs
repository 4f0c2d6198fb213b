//! Cache policies for downstream (browser and CDN) caches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Cache Policy ==
/// How long browsers and the edge may keep a response.
///
/// Durations are formatted as given; callers are responsible for sane values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Shared-cache lifetime (`s-maxage`, `CDN-Cache-Control`)
    pub edge_seconds: i64,
    /// Browser lifetime (`max-age`)
    pub browser_seconds: i64,
    /// Window in which a stale copy may be served while refreshing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_while_revalidate_seconds: Option<i64>,
    /// Response depends on the caller's credentials
    #[serde(default)]
    pub vary_by_auth: bool,
}

impl CachePolicy {
    /// Public catalog pages: 5 min at the edge, 1 min in the browser.
    pub const CATALOG: Self = Self {
        edge_seconds: 300,
        browser_seconds: 60,
        stale_while_revalidate_seconds: Some(600),
        vary_by_auth: false,
    };

    /// Per-user responses; never stored.
    pub const PRIVATE: Self = Self {
        edge_seconds: 0,
        browser_seconds: 0,
        stale_while_revalidate_seconds: None,
        vary_by_auth: true,
    };

    /// Frequently changing but shareable content.
    pub const DYNAMIC: Self = Self {
        edge_seconds: 60,
        browser_seconds: 30,
        stale_while_revalidate_seconds: Some(120),
        vary_by_auth: false,
    };

    /// Short-lived API reads.
    pub const API: Self = Self {
        edge_seconds: 30,
        browser_seconds: 10,
        stale_while_revalidate_seconds: Some(60),
        vary_by_auth: false,
    };

    pub const NO_CACHE: Self = Self {
        edge_seconds: 0,
        browser_seconds: 0,
        stale_while_revalidate_seconds: None,
        vary_by_auth: false,
    };

    /// Builds a custom policy with no SWR window and no auth variance.
    pub const fn new(edge_seconds: i64, browser_seconds: i64) -> Self {
        Self {
            edge_seconds,
            browser_seconds,
            stale_while_revalidate_seconds: None,
            vary_by_auth: false,
        }
    }

    pub const fn with_stale_while_revalidate(mut self, seconds: i64) -> Self {
        self.stale_while_revalidate_seconds = Some(seconds);
        self
    }

    pub const fn vary_by_auth(mut self) -> Self {
        self.vary_by_auth = true;
        self
    }

    /// True when neither browsers nor the edge may store the response.
    pub fn is_no_store(&self) -> bool {
        self.edge_seconds == 0 && self.browser_seconds == 0
    }
}

// == Cache Preset ==
/// Named policies, so handlers select by intent rather than numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CachePreset {
    Catalog,
    Private,
    Dynamic,
    #[default]
    Api,
    NoCache,
}

impl CachePreset {
    pub const ALL: [Self; 5] = [
        Self::Catalog,
        Self::Private,
        Self::Dynamic,
        Self::Api,
        Self::NoCache,
    ];

    pub fn policy(self) -> CachePolicy {
        match self {
            Self::Catalog => CachePolicy::CATALOG,
            Self::Private => CachePolicy::PRIVATE,
            Self::Dynamic => CachePolicy::DYNAMIC,
            Self::Api => CachePolicy::API,
            Self::NoCache => CachePolicy::NO_CACHE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Private => "private",
            Self::Dynamic => "dynamic",
            Self::Api => "api",
            Self::NoCache => "noCache",
        }
    }
}

impl From<CachePreset> for CachePolicy {
    fn from(preset: CachePreset) -> Self {
        preset.policy()
    }
}

impl fmt::Display for CachePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePreset {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| CacheError::InvalidRequest(format!("Unknown cache policy '{s}'")))
    }
}
