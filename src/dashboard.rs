//! Composition root: registers every query, keeps the handles, and turns
//! their current states into the cards and chips the UI draws.

use chrono::{DateTime, Utc};
use homelab_types::{
    ActiveUsersPerDay, DiagnosticsSnapshot, GithubEventSummary, HealthCheck, InvestmentSummary,
    LeetCodeLanguages, LeetCodeSolvedSummary, MoneyAccounts, NasDiagnostics, NasFolders,
    NpmPackageInfo, OgpPreview, PiholeSummary, PlexLibrary, PlexSessions, ServiceStatus,
    SpeedTestResult,
};
use serde_json::{json, Value};
use tokio::runtime::Handle;
use tracing::info;

use crate::config::Settings;
use crate::data::health::{service_status, worst};
use crate::data::CpuHistory;
use crate::error::FetchError;
use crate::query::{EntryInfo, QueryClient, QueryHandle, QueryKey, QueryState};
use crate::source::catalog::{ChipColumn, ChipSource, MEDIA_FOLDER};
use crate::source::Catalog;
use crate::ui::card::{CardBody, CardView};
use crate::ui::cards::{self, ServerRow};
use crate::ui::chip::StatusChip;

const PRIMARY: &str = "Primary";
const PIHOLE: &str = "Pihole";

struct Queries {
    primary_diagnostics: QueryHandle<DiagnosticsSnapshot>,
    pihole_diagnostics: QueryHandle<DiagnosticsSnapshot>,
    pihole_summary: QueryHandle<PiholeSummary>,
    nas_system: QueryHandle<NasDiagnostics>,
    nas_media: QueryHandle<NasFolders>,
    plex_sessions: QueryHandle<PlexSessions>,
    plex_library: QueryHandle<PlexLibrary>,
    leetcode_solved: QueryHandle<LeetCodeSolvedSummary>,
    leetcode_languages: QueryHandle<LeetCodeLanguages>,
    npm: QueryHandle<NpmPackageInfo>,
    github: QueryHandle<GithubEventSummary>,
    accounts: QueryHandle<MoneyAccounts>,
    investments: QueryHandle<InvestmentSummary>,
    speedtest: QueryHandle<SpeedTestResult>,
    active_users: QueryHandle<ActiveUsersPerDay>,
    ogp: QueryHandle<OgpPreview>,
}

enum ChipStatus {
    Health(QueryHandle<HealthCheck>),
    Fixed(ServiceStatus),
}

struct Chip {
    column: ChipColumn,
    label: &'static str,
    url: Option<String>,
    status: ChipStatus,
}

/// Links that come from configuration rather than from a response.
struct Links {
    leetcode: String,
    github: String,
    npm: String,
    npm_package: String,
    portfolio: Option<String>,
}

/// A chip as drawn, with the query behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipView {
    pub column: ChipColumn,
    pub chip: StatusChip,
    pub source: Option<QueryKey>,
}

/// Everything one frame needs, built from the cache in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: Vec<CardView>,
    /// Pi-hole column first, then the primary column.
    pub chips: Vec<ChipView>,
}

/// Chip status counts for the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
    pub loading: usize,
}

impl DashboardView {
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for c in &self.chips {
            match c.chip.status {
                ServiceStatus::Ok => counts.ok += 1,
                ServiceStatus::Warning => counts.warning += 1,
                ServiceStatus::Error => counts.error += 1,
                ServiceStatus::Loading => counts.loading += 1,
            }
        }
        counts
    }

    /// Worst chip status; the header dot.
    pub fn overall(&self) -> ServiceStatus {
        worst(self.chips.iter().map(|c| c.chip.status))
    }

    pub fn cards_loading(&self) -> usize {
        self.cards.iter().filter(|c| c.is_loading()).count()
    }

    pub fn column(&self, column: ChipColumn) -> impl Iterator<Item = (usize, &ChipView)> {
        self.chips
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.column == column)
    }
}

pub struct Dashboard {
    client: QueryClient,
    queries: Queries,
    chips: Vec<Chip>,
    links: Links,
    history: CpuHistory,
}

impl Dashboard {
    /// Register every query on `runtime`. Nothing is fetched until
    /// [`Dashboard::start`] or [`Dashboard::fetch_all_once`].
    pub fn new(settings: &Settings, runtime: Handle) -> Result<Self, FetchError> {
        let catalog = Catalog::from_settings(settings)?;
        let client = QueryClient::new(runtime);

        let queries = Queries {
            primary_diagnostics: client.register(catalog.primary_diagnostics()),
            pihole_diagnostics: client.register(catalog.pihole_diagnostics()),
            pihole_summary: client.register(catalog.pihole_summary()),
            nas_system: client.register(catalog.nas_system()),
            nas_media: client.register(catalog.nas_folders(MEDIA_FOLDER)),
            plex_sessions: client.register(catalog.plex_sessions()),
            plex_library: client.register(catalog.plex_library()),
            leetcode_solved: client.register(catalog.leetcode_solved()),
            leetcode_languages: client.register(catalog.leetcode_languages()),
            npm: client.register(catalog.npm_package()),
            github: client.register(catalog.github_events()),
            accounts: client.register(catalog.money_accounts()),
            investments: client.register(catalog.investments()),
            speedtest: client.register(catalog.speedtest()),
            active_users: client.register(catalog.active_users()),
            ogp: client.register(catalog.ogp_preview()),
        };

        let chips = catalog
            .chips()
            .into_iter()
            .map(|def| Chip {
                column: def.column,
                label: def.label,
                url: def.url,
                status: match def.source {
                    ChipSource::Health(spec) => ChipStatus::Health(client.register(spec)),
                    ChipSource::Fixed(status) => ChipStatus::Fixed(status),
                },
            })
            .collect();

        let links = Links {
            leetcode: settings.leetcode_profile_url(),
            github: settings.github_profile_url(),
            npm: settings.npm_package_url(),
            npm_package: settings.npm_package.clone(),
            portfolio: settings.portfolio_url.clone(),
        };

        info!(
            queries = client.cache().keys().len(),
            api_base = %settings.api_base,
            "dashboard ready"
        );

        Ok(Self {
            client,
            queries,
            chips,
            links,
            history: CpuHistory::new(),
        })
    }

    /// Start polling every query.
    pub fn start(&self) {
        self.client.start_all();
    }

    pub fn refetch_all(&self) {
        self.client.refetch_all();
    }

    /// One fetch of every query, without pollers; used by `--export`.
    pub async fn fetch_all_once(&self) {
        self.client.fetch_all_once().await;
    }

    pub async fn fetch(&self, key: &QueryKey) {
        self.client.fetch_now(key).await;
    }

    pub fn shutdown(&self) {
        self.client.shutdown();
    }

    pub fn describe(&self, key: &QueryKey) -> Option<String> {
        self.client.describe(key)
    }

    pub fn interval(&self, key: &QueryKey) -> Option<std::time::Duration> {
        self.client.interval(key)
    }

    pub fn info(&self, key: &QueryKey) -> Option<EntryInfo> {
        self.client.cache().info(key)
    }

    /// Append a CPU sample for each server whose snapshot changed.
    pub fn record_history(&mut self) {
        for (name, handle) in [
            (PRIMARY, &self.queries.primary_diagnostics),
            (PIHOLE, &self.queries.pihole_diagnostics),
        ] {
            let (QueryState::Success(snapshot), Some(info)) = (handle.state(), handle.info())
            else {
                continue;
            };
            if let (Some(avg), Some(updated_at)) = (snapshot.cpu_avg(), info.updated_at) {
                self.history.record(name, updated_at, avg);
            }
        }
    }

    /// Build every card and chip from the current cache contents.
    pub fn view(&self, now: DateTime<Utc>) -> DashboardView {
        DashboardView {
            cards: self.cards(now),
            chips: self.chip_views(),
        }
    }

    fn cards(&self, now: DateTime<Utc>) -> Vec<CardView> {
        let q = &self.queries;
        let primary = q.primary_diagnostics.state();
        let pihole_diag = q.pihole_diagnostics.state();
        let pihole = q.pihole_summary.state();
        let accounts = q.accounts.state();
        let portfolio = self.links.portfolio.as_deref();

        vec![
            cards::diagnostics::card(&[
                ServerRow {
                    name: PRIMARY,
                    state: &primary,
                    trend: self.history.sparkline(PRIMARY),
                },
                ServerRow {
                    name: PIHOLE,
                    state: &pihole_diag,
                    trend: self.history.sparkline(PIHOLE),
                },
            ])
            .source(q.primary_diagnostics.key())
            .source(q.pihole_diagnostics.key()),
            cards::pihole::dns_queries(&pihole).source(q.pihole_summary.key()),
            cards::pihole::ads_blocked(&pihole).source(q.pihole_summary.key()),
            cards::pihole::gravity(&pihole).source(q.pihole_summary.key()),
            cards::nas::storage(&q.nas_system.state()).source(q.nas_system.key()),
            cards::nas::media(&q.nas_media.state()).source(q.nas_media.key()),
            cards::plex::sessions(&q.plex_sessions.state()).source(q.plex_sessions.key()),
            cards::plex::library(&q.plex_library.state()).source(q.plex_library.key()),
            cards::money::portfolio(&q.investments.state()).source(q.investments.key()),
            cards::money::net_worth(&accounts).source(q.accounts.key()),
            cards::money::equity(&accounts).source(q.accounts.key()),
            cards::leetcode::card(
                &q.leetcode_solved.state(),
                &q.leetcode_languages.state(),
                self.links.leetcode.clone(),
            )
            .source(q.leetcode_solved.key())
            .source(q.leetcode_languages.key()),
            cards::npm::card(&q.npm.state(), &self.links.npm_package, self.links.npm.clone())
                .source(q.npm.key()),
            cards::github::card(&q.github.state(), self.links.github.clone())
                .source(q.github.key()),
            cards::analytics::card(&q.active_users.state(), portfolio)
                .source(q.active_users.key()),
            cards::speedtest::card(&q.speedtest.state(), now).source(q.speedtest.key()),
            cards::preview::card(&q.ogp.state(), portfolio).source(q.ogp.key()),
        ]
    }

    fn chip_views(&self) -> Vec<ChipView> {
        let mut views: Vec<ChipView> = self
            .chips
            .iter()
            .map(|c| {
                let (status, source) = match &c.status {
                    ChipStatus::Health(handle) => {
                        (service_status(&handle.state()), Some(handle.key().clone()))
                    }
                    ChipStatus::Fixed(status) => (*status, None),
                };
                ChipView {
                    column: c.column,
                    chip: StatusChip::new(c.label, status).with_url(c.url.clone()),
                    source,
                }
            })
            .collect();
        // Stable, so each column keeps catalog order.
        views.sort_by_key(|v| v.column != ChipColumn::Pihole);
        views
    }

    /// The current view and every cache entry as one JSON document.
    pub fn export(&self, now: DateTime<Utc>) -> Value {
        let view = self.view(now);
        let counts = view.status_counts();

        let cards: Vec<Value> = view
            .cards
            .iter()
            .map(|card| {
                let state = match &card.body {
                    CardBody::Skeleton(_) => "loading",
                    CardBody::Error { .. } => "error",
                    CardBody::Content(_) => "content",
                };
                json!({
                    "title": card.title,
                    "link": card.link,
                    "badge": card.badge,
                    "state": state,
                    "lines": card.body_text(),
                    "sources": card.sources,
                })
            })
            .collect();

        let chips: Vec<Value> = view
            .chips
            .iter()
            .map(|c| {
                json!({
                    "label": c.chip.label,
                    "column": match c.column {
                        ChipColumn::Pihole => "pihole",
                        ChipColumn::Primary => "primary",
                    },
                    "status": c.chip.status,
                    "url": c.chip.url,
                })
            })
            .collect();

        json!({
            "exported_at": now.to_rfc3339(),
            "summary": {
                "overall": view.overall(),
                "ok": counts.ok,
                "warning": counts.warning,
                "error": counts.error,
                "loading": counts.loading,
                "cards_loading": view.cards_loading(),
            },
            "chips": chips,
            "cards": cards,
            "queries": self.client.cache().export(),
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{routing::get, Json, Router};

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_initial_view_is_all_loading() {
        let settings = Settings::for_tests("http://127.0.0.1:9");
        let dash = Dashboard::new(&settings, Handle::current()).unwrap();
        let view = dash.view(Utc::now());

        assert_eq!(view.cards.len(), 17);
        assert_eq!(view.cards_loading(), 17);
        assert_eq!(view.chips.len(), 9);
        assert_eq!(view.chips[0].chip.label, "Pi-hole");
        assert_eq!(view.chips[1].chip.label, "Pi-hole: Diagnostics");
        assert_eq!(
            view.status_counts(),
            StatusCounts { ok: 1, warning: 0, error: 0, loading: 8 }
        );
        // A fixed ok chip outranks the loading ones.
        assert_eq!(view.overall(), ServiceStatus::Ok);
        assert_eq!(dash.client.poller_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetched_query_renders_and_failure_stays_local() {
        let router = Router::new()
            .route(
                "/pihole/summary/",
                get(|| async {
                    Json(serde_json::json!({
                        "sum_queries": 125847, "sum_blocked": 10021, "percent_blocked": 7.96,
                        "total_clients": 14, "gravity": 181818, "qps": 1.4, "uptime": 86400.0,
                        "percent_mem": 1.2, "percent_cpu": 0.3
                    }))
                }),
            )
            .route("/speedtest/", get(|| async { "not json" }));
        let base = serve(router).await;
        let dash = Dashboard::new(&Settings::for_tests(&base), Handle::current()).unwrap();

        dash.fetch(&"pihole:summary".into()).await;
        dash.fetch(&"speedtest".into()).await;

        let view = dash.view(Utc::now());
        let dns = view.cards.iter().find(|c| c.title == "DNS Queries").unwrap();
        assert_eq!(dns.body_text()[0], "125,847");

        let speed = view.cards.iter().find(|c| c.title == "SpeedTest").unwrap();
        assert!(matches!(speed.body, CardBody::Error { .. }));

        let gravity = view.cards.iter().find(|c| c.title == "Gravity").unwrap();
        assert_eq!(gravity.sources, vec![QueryKey::from("pihole:summary")]);

        let export = dash.export(Utc::now());
        assert_eq!(export["queries"]["pihole:summary"]["status"], "success");
        assert_eq!(export["queries"]["speedtest"]["status"], "error");
        assert_eq!(export["summary"]["cards_loading"], 13);
        assert_eq!(
            export["cards"][1]["lines"][0],
            serde_json::Value::from("125,847")
        );
    }
}
