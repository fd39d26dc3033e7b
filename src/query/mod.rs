//! Polling query layer.
//!
//! Each data source is a query: a key, a fetcher, a refresh interval and a
//! retry policy. [`QueryClient`] runs one poller task per distinct key and
//! writes results into a shared [`QueryCache`]; the UI reads them through
//! typed [`QueryHandle`]s as a three-state [`QueryState`].
//!
//! ```text
//!  Fetch ──▶ RetryPolicy ──▶ QueryCache ◀── QueryHandle<T> ◀── cards
//!    ▲                          ▲
//!    └──── poller (interval, refetch) ─┘
//! ```

mod cache;
mod client;
mod retry;
mod state;

pub use cache::{EntryInfo, QueryCache};
pub use client::{QueryClient, QueryHandle, QuerySpec};
pub use retry::RetryPolicy;
pub use state::{QueryKey, QueryState};
