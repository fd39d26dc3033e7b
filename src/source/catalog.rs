//! Every upstream query the dashboard polls: base URL, path, cadence and
//! retry policy, keyed by a stable name.

use std::time::Duration;

use homelab_types::{
    ActiveUsersPerDay, DiagnosticsSnapshot, GithubEventSummary, HealthCheck, InvestmentSummary,
    LeetCodeLanguages, LeetCodeSolvedSummary, MoneyAccounts, NasDiagnostics, NasFolders,
    NpmPackageInfo, OgpPreview, PiholeSummary, PlexLibrary, PlexSessions, ServiceStatus,
    SpeedTestResult, Validate,
};
use serde::de::DeserializeOwned;

use super::{ApiClient, Endpoint};
use crate::config::Settings;
use crate::error::FetchError;
use crate::query::{QueryKey, QuerySpec, RetryPolicy};

const SECOND: Duration = Duration::from_secs(1);
const MINUTE: Duration = Duration::from_secs(60);

/// Folder on the NAS whose children are the media libraries.
pub const MEDIA_FOLDER: &str = "/media";

/// Which API a health check is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTarget {
    /// The services API at `api_base`.
    Services,
    /// The diagnostics API on the Pi-hole host.
    PiholeDiagnostics,
}

impl HealthTarget {
    fn key_part(self) -> &'static str {
        match self {
            HealthTarget::Services => "primary",
            HealthTarget::PiholeDiagnostics => "pihole",
        }
    }
}

/// The two chip columns on the left of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipColumn {
    Pihole,
    Primary,
}

/// Where a chip's status comes from.
pub enum ChipSource {
    Health(QuerySpec<HealthCheck>),
    Fixed(ServiceStatus),
}

/// One service-health chip before registration.
pub struct ChipDef {
    pub column: ChipColumn,
    pub label: &'static str,
    pub url: Option<String>,
    pub source: ChipSource,
}

/// Factory for every query, bound to the configured base URLs.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: ApiClient,
    primary: ApiClient,
    pihole: ApiClient,
    nas: ApiClient,
    npm_package: String,
    api_base: String,
    traefik_url: Option<String>,
    pihole_admin_url: String,
}

impl Catalog {
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let client = |base: &str| {
            ApiClient::builder()
                .base_url(base)
                .timeout(settings.request_timeout())
                .build()
        };

        Ok(Self {
            services: client(&settings.api_base)?,
            primary: client(&settings.primary_diagnostics_base())?,
            pihole: client(&settings.pihole_diagnostics_base())?,
            nas: client(&settings.nas_base)?,
            npm_package: settings.npm_package.clone(),
            api_base: settings.api_base.clone(),
            traefik_url: settings.traefik_url.clone(),
            pihole_admin_url: settings.pihole_admin_url(),
        })
    }

    pub fn primary_diagnostics(&self) -> QuerySpec<DiagnosticsSnapshot> {
        get(&self.primary, "diagnostics:primary", "/diagnostics/")
            .every(5 * SECOND)
    }

    pub fn pihole_diagnostics(&self) -> QuerySpec<DiagnosticsSnapshot> {
        get(&self.pihole, "diagnostics:pihole", "/diagnostics/")
            .every(5 * SECOND)
    }

    pub fn pihole_summary(&self) -> QuerySpec<PiholeSummary> {
        get(&self.services, "pihole:summary", "/pihole/summary/")
            .every(30 * SECOND)
    }

    pub fn nas_system(&self) -> QuerySpec<NasDiagnostics> {
        get(&self.nas, "nas:system", "/nas/system/")
            .every(30 * SECOND)
    }

    pub fn nas_folders(&self, folder: &str) -> QuerySpec<NasFolders> {
        let endpoint =
            Endpoint::<NasFolders>::new(self.nas.clone(), "/nas/folders/").with_query("folder", folder);
        QuerySpec::new(QueryKey::new(format!("nas:folders:{}", folder)), endpoint).every(5 * MINUTE)
    }

    pub fn plex_sessions(&self) -> QuerySpec<PlexSessions> {
        get(&self.services, "plex:sessions", "/plex/sessions/")
            .every(15 * SECOND)
    }

    pub fn plex_library(&self) -> QuerySpec<PlexLibrary> {
        get(&self.services, "plex:library", "/plex/library/counts/")
            .every(5 * MINUTE)
    }

    pub fn leetcode_solved(&self) -> QuerySpec<LeetCodeSolvedSummary> {
        get(&self.services, "leetcode:solved", "/leetcode/solved/")
            .every(15 * MINUTE)
    }

    pub fn leetcode_languages(&self) -> QuerySpec<LeetCodeLanguages> {
        get(&self.services, "leetcode:languages", "/leetcode/languages/")
            .every(15 * MINUTE)
    }

    pub fn npm_package(&self) -> QuerySpec<NpmPackageInfo> {
        let path = format!("/npm/{}/", self.npm_package);
        let key = QueryKey::new(format!("npm:{}", self.npm_package));
        get(&self.services, key, &path).every(15 * MINUTE)
    }

    pub fn github_events(&self) -> QuerySpec<GithubEventSummary> {
        get(&self.services, "github:events", "/github/events/")
            .every(15 * MINUTE)
    }

    /// Shared by the net worth and equity cards.
    pub fn money_accounts(&self) -> QuerySpec<MoneyAccounts> {
        get(&self.services, "money:accounts", "/money/accounts/")
            .every(15 * MINUTE)
    }

    pub fn investments(&self) -> QuerySpec<InvestmentSummary> {
        get(&self.services, "money:portfolio", "/money/portfolio/")
            .every(15 * MINUTE)
    }

    pub fn speedtest(&self) -> QuerySpec<SpeedTestResult> {
        get(&self.services, "speedtest", "/speedtest/")
            .every(30 * SECOND)
    }

    pub fn active_users(&self) -> QuerySpec<ActiveUsersPerDay> {
        get(&self.services, "analytics:active_users", "/a/active_users/")
            .every(15 * MINUTE)
    }

    pub fn ogp_preview(&self) -> QuerySpec<OgpPreview> {
        get(&self.services, "portfolio:ogp", "/portfolio/ogp/")
            .every(15 * MINUTE)
            .retry(RetryPolicy::none())
    }

    /// Health check against `path` on `target`, polled every minute without
    /// retries.
    pub fn health(&self, target: HealthTarget, path: &str) -> QuerySpec<HealthCheck> {
        let client = match target {
            HealthTarget::Services => &self.services,
            HealthTarget::PiholeDiagnostics => &self.pihole,
        };
        let key = QueryKey::new(format!("health:{}:{}", target.key_part(), path));
        get(client, key, path)
            .every(MINUTE)
            .retry(RetryPolicy::none())
    }

    /// Chips in display order, Pi-hole column first.
    pub fn chips(&self) -> Vec<ChipDef> {
        let check = |target, path: &str| ChipSource::Health(self.health(target, path));
        let services = HealthTarget::Services;

        vec![
            ChipDef {
                column: ChipColumn::Pihole,
                label: "Pi-hole",
                url: Some(self.pihole_admin_url.clone()),
                source: check(services, "/pihole/"),
            },
            ChipDef {
                column: ChipColumn::Pihole,
                label: "Pi-hole: Diagnostics",
                url: None,
                source: check(HealthTarget::PiholeDiagnostics, "/"),
            },
            ChipDef {
                column: ChipColumn::Primary,
                label: "Traefik",
                url: self.traefik_url.clone(),
                source: check(services, "/diagnostics/docker/container/reverse_proxy/"),
            },
            ChipDef {
                column: ChipColumn::Primary,
                label: "Cache",
                url: None,
                source: check(services, "/cache/"),
            },
            ChipDef {
                column: ChipColumn::Primary,
                label: "API: Diagnostics",
                url: Some(format!("{}/diagnostics/docs/", self.api_base)),
                source: check(services, "/diagnostics/"),
            },
            ChipDef {
                column: ChipColumn::Primary,
                label: "API: Services",
                url: Some(format!("{}/docs/", self.api_base)),
                source: check(services, "/"),
            },
            ChipDef {
                column: ChipColumn::Primary,
                label: "Slack Bot",
                url: None,
                source: check(services, "/diagnostics/docker/container/slack_bot/"),
            },
            ChipDef {
                column: ChipColumn::Primary,
                label: "Speed Test",
                url: None,
                source: check(services, "/diagnostics/docker/container/speedtest/"),
            },
            ChipDef {
                column: ChipColumn::Primary,
                label: "Dashboard",
                url: None,
                source: ChipSource::Fixed(ServiceStatus::Ok),
            },
        ]
    }
}

fn get<T>(client: &ApiClient, key: impl Into<QueryKey>, path: &str) -> QuerySpec<T>
where
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    QuerySpec::new(key, Endpoint::<T>::new(client.clone(), path))
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;

    fn catalog(extra: &str) -> Catalog {
        let toml = format!(
            r#"
            api_base = "http://api.lan:8000"
            pihole_ip = "192.168.1.2"
            server_ip = "192.168.1.10"
            leetcode_username = "coder"
            github_username = "octo"
            {}
            "#,
            extra
        );
        let config = Config::builder()
            .add_source(File::from_str(&toml, FileFormat::Toml))
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();
        Catalog::from_settings(&settings).unwrap()
    }

    #[test]
    fn diagnostics_bases_differ_per_server() {
        let c = catalog("");
        assert_eq!(
            c.primary_diagnostics().fetcher.describe(),
            "GET http://api.lan:8000/diagnostics/diagnostics/"
        );
        assert_eq!(
            c.pihole_diagnostics().fetcher.describe(),
            "GET http://192.168.1.2:81/api/diagnostics/diagnostics/"
        );
        assert_ne!(c.primary_diagnostics().key, c.pihole_diagnostics().key);
    }

    #[test]
    fn cadences() {
        let c = catalog("");
        assert_eq!(c.primary_diagnostics().interval, Duration::from_secs(5));
        assert_eq!(c.plex_sessions().interval, Duration::from_secs(15));
        assert_eq!(c.speedtest().interval, Duration::from_secs(30));
        assert_eq!(c.plex_library().interval, Duration::from_secs(300));
        assert_eq!(c.github_events().interval, Duration::from_secs(900));
        assert_eq!(c.health(HealthTarget::Services, "/").interval, MINUTE);
    }

    #[test]
    fn health_and_preview_do_not_retry() {
        let c = catalog("");
        assert_eq!(c.health(HealthTarget::Services, "/cache/").retry.max_retries, 0);
        assert_eq!(c.ogp_preview().retry.max_retries, 0);
        assert_eq!(c.speedtest().retry, RetryPolicy::default());
    }

    #[test]
    fn nas_folder_query_is_encoded() {
        let c = catalog(r#"nas_base = "http://nas.lan:5000""#);
        let spec = c.nas_folders(MEDIA_FOLDER);
        assert_eq!(spec.key.as_str(), "nas:folders:/media");
        assert_eq!(
            spec.fetcher.describe(),
            "GET http://nas.lan:5000/nas/folders/?folder=/media"
        );
    }

    #[test]
    fn npm_path_uses_package_name() {
        let c = catalog(r#"npm_package = "left-pad""#);
        assert_eq!(c.npm_package().fetcher.describe(), "GET http://api.lan:8000/npm/left-pad/");
    }

    #[test]
    fn chip_columns_and_links() {
        let c = catalog(r#"traefik_url = "https://traefik.lan""#);
        let chips = c.chips();
        let labels: Vec<_> = chips.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            [
                "Pi-hole",
                "Pi-hole: Diagnostics",
                "Traefik",
                "Cache",
                "API: Diagnostics",
                "API: Services",
                "Slack Bot",
                "Speed Test",
                "Dashboard"
            ]
        );
        assert_eq!(chips[0].url.as_deref(), Some("http://192.168.1.10/admin/"));
        assert_eq!(chips[2].url.as_deref(), Some("https://traefik.lan"));
        assert_eq!(chips[3].url, None);
        assert_eq!(
            chips[4].url.as_deref(),
            Some("http://api.lan:8000/diagnostics/docs/")
        );
        assert!(matches!(chips[8].source, ChipSource::Fixed(ServiceStatus::Ok)));

        let ChipSource::Health(spec) = &chips[1].source else {
            panic!("pihole diagnostics chip should poll");
        };
        assert_eq!(spec.fetcher.describe(), "GET http://192.168.1.2:81/api/diagnostics/");
    }
}
