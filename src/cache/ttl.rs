//! Shared TTL vocabulary
//!
//! Named durations per data category so handlers agree on freshness.

use serde::Deserialize;

/// Catalog listings (5 minutes)
pub const CATALOG: i64 = 5 * 60;
/// Personalised recommendations (1 minute)
pub const RECOMMENDATIONS: i64 = 60;
/// User profile data (2 minutes)
pub const PROFILE: i64 = 2 * 60;
/// Aggregated analytics (10 minutes)
pub const ANALYTICS: i64 = 10 * 60;
/// Site configuration (30 minutes)
pub const CONFIG: i64 = 30 * 60;

// == TTL Preset ==
/// A named TTL, selectable by name over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtlPreset {
    Catalog,
    Recommendations,
    Profile,
    Analytics,
    Config,
}

impl TtlPreset {
    /// TTL in seconds for this preset.
    pub fn seconds(self) -> i64 {
        match self {
            Self::Catalog => CATALOG,
            Self::Recommendations => RECOMMENDATIONS,
            Self::Profile => PROFILE,
            Self::Analytics => ANALYTICS,
            Self::Config => CONFIG,
        }
    }
}
