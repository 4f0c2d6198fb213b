//! Edge Cache Policy Module
//!
//! Maps a small set of content-sensitivity policies to the HTTP caching
//! headers honoured by browsers and the CDN in front of each instance.

mod cache_policy;
mod headers;

pub use cache_policy::{CachePolicy, CachePreset};
pub use headers::{apply_headers, apply_to_response, cache_control_value, header_values};
