//! One builder per data source. Each maps query states to a
//! [`CardView`](super::card::CardView) and nothing else.

pub mod analytics;
pub mod diagnostics;
pub mod github;
pub mod leetcode;
pub mod money;
pub mod nas;
pub mod npm;
pub mod pihole;
pub mod plex;
pub mod preview;
pub mod speedtest;

pub use diagnostics::ServerRow;
