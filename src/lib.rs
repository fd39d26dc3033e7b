//! # homelab-dash
//!
//! A terminal dashboard that polls homelab services and renders them as a
//! grid of cards.
//!
//! Every data source is a polling query with its own interval and retry
//! policy. Results are validated against the schemas in
//! [`homelab_types`], cached, and turned into cards and service-health
//! chips each frame. A failing source only affects its own card.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌───────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│ dashboard │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │  (view)   │    │(render) │    │          │ │
//! │  └─────────┘    └─────┬─────┘    └─────────┘    └──────────┘ │
//! │                       │ QueryHandle<T>                       │
//! │                       ▼                                      │
//! │  ┌─────────┐    ┌───────────┐                                │
//! │  │ source  │───▶│   query   │◀── one poller per query key    │
//! │  │ (HTTP)  │    │  (cache)  │                                │
//! │  └─────────┘    └───────────┘                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: Layered settings from a TOML file and `HOMELAB_*`
//!   environment variables, validated up front
//! - **[`source`]**: Typed HTTP fetchers ([`Fetch`]) and the catalog of
//!   every upstream query
//! - **[`query`]**: Poller tasks, retries and the shared cache behind
//!   [`QueryState`]
//! - **[`data`]**: Formatting, unit conversions, health tones, CPU history
//!   and money aggregation
//! - **[`dashboard`]**: Registers every query and builds the
//!   [`DashboardView`] for a frame
//! - **[`ui`]**: Cards, chips, the grid, overlays and theme support
//! - **[`app`]** / **[`events`]**: Focus, navigation and input handling
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Run with ./homelab.toml
//! homelab-dash
//!
//! # Fetch everything once and write a JSON snapshot
//! homelab-dash --export snapshot.json
//!
//! # Check configuration only
//! HOMELAB_API_BASE=http://192.168.1.10:8000 homelab-dash --check-config
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use chrono::Utc;
//! use homelab_dash::{Dashboard, Settings};
//!
//! let settings = Settings::load(None).unwrap();
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let dashboard = Dashboard::new(&settings, rt.handle().clone()).unwrap();
//!
//! rt.block_on(dashboard.fetch_all_once());
//! for card in dashboard.view(Utc::now()).cards {
//!     println!("{}: {:?}", card.title, card.body_text());
//! }
//! ```
//!
//! ### Polling a single endpoint
//!
//! ```no_run
//! use std::time::Duration;
//! use homelab_dash::query::{QueryClient, QuerySpec};
//! use homelab_dash::source::{ApiClient, Endpoint};
//! use homelab_types::PiholeSummary;
//!
//! # tokio_test::block_on(async {
//! let api = ApiClient::builder().base_url("http://192.168.1.10:8000").build().unwrap();
//! let client = QueryClient::new(tokio::runtime::Handle::current());
//! let summary = client.subscribe(
//!     QuerySpec::new("pihole:summary", Endpoint::<PiholeSummary>::new(api, "/pihole/summary/"))
//!         .every(Duration::from_secs(30)),
//! );
//! println!("{}", summary.state().label());
//! # });
//! ```

pub mod app;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod events;
pub mod query;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Focus};
pub use config::{ConfigError, Settings};
pub use dashboard::{Dashboard, DashboardView};
pub use error::FetchError;
pub use query::{QueryClient, QueryKey, QueryState};
pub use source::Fetch;
pub use ui::Theme;
