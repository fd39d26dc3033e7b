//! Terminal UI rendering using ratatui.
//!
//! Card builders in [`cards`] are pure; everything else here draws.
//!
//! ## Submodules
//!
//! - [`card`]: The card model and its renderer
//! - [`cards`]: One builder per data source
//! - [`chip`]: Service-health chips
//! - [`grid`]: Main screen: chip columns and the card grid
//! - [`layout`]: Column count, grid placement and scrolling
//! - [`detail`]: Modal overlay for the focused card or chip
//! - [`common`]: Header, status bar and help overlay
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├────────────┬─────────────────────────┤
//! │ Pi-hole    │ card  card  card        │
//! │ chips      │ card  card  card        │
//! │ Primary    │ ...   (grid::render)    │
//! │ chips      │                         │
//! ├────────────┴─────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod card;
pub mod cards;
pub mod chip;
pub mod common;
pub mod detail;
pub mod grid;
pub mod layout;
pub mod theme;

pub use theme::Theme;
