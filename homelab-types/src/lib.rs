//! # homelab-types
//!
//! Response schemas for every upstream service the homelab dashboard polls.
//! Each schema is a plain serde struct mirroring the JSON the service
//! returns, plus a [`Validate`] pass for the simple formats serde cannot
//! express on its own (IP addresses, URLs, percentage ranges).
//!
//! Decoding and validating happen together at the application boundary:
//!
//! ```rust
//! use homelab_types::{PiholeSummary, Validate};
//!
//! let body = r#"{
//!     "sum_queries": 125847, "sum_blocked": 10021, "percent_blocked": 7.96,
//!     "total_clients": 14, "gravity": 181818, "qps": 1.4, "uptime": 86400.0,
//!     "percent_mem": 1.2, "percent_cpu": 0.3
//! }"#;
//!
//! let summary: PiholeSummary = serde_json::from_str(body).unwrap();
//! summary.validate().unwrap();
//! assert_eq!(summary.sum_queries, 125847);
//! ```
//!
//! Once a value has passed [`Validate::validate`], the rendering layer
//! treats it as trustworthy and performs no further checks.

mod analytics;
mod diagnostics;
mod github;
mod leetcode;
mod money;
mod nas;
mod npm;
mod pihole;
mod plex;
mod portfolio;
mod speedtest;
mod status;
mod validate;

pub use analytics::*;
pub use diagnostics::*;
pub use github::*;
pub use leetcode::*;
pub use money::*;
pub use nas::*;
pub use npm::*;
pub use pihole::*;
pub use plex::*;
pub use portfolio::*;
pub use speedtest::*;
pub use status::*;
pub use validate::*;
