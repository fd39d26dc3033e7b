//! Runtime configuration.
//!
//! Settings come from an optional TOML file layered under `HOMELAB_*`
//! environment variables:
//!
//! ```toml
//! api_base = "http://192.168.1.10:8000"
//! pihole_ip = "192.168.1.2"
//! server_ip = "192.168.1.10"
//! leetcode_username = "someone"
//! github_username = "someone"
//! ```
//!
//! Every key can be overridden from the environment, e.g. `HOMELAB_API_BASE`.
//! All problems are collected and reported together so a broken setup can be
//! fixed in one pass.

use std::fmt;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use homelab_types::check_url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File loaded when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "homelab.toml";

/// Literal some tooling writes for unset variables.
const UNDEFINED: &str = "undefined";

/// Validated settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// Base URL of the services API.
    pub api_base: String,
    /// Address of the Pi-hole host; its diagnostics API listens on port 81.
    pub pihole_ip: Ipv4Addr,
    /// Address of the main server; used for the Pi-hole admin link.
    pub server_ip: Ipv4Addr,
    /// Base URL for NAS endpoints, `api_base` unless overridden.
    pub nas_base: String,
    pub traefik_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub leetcode_username: String,
    pub github_username: String,
    pub npm_package: String,
    pub request_timeout_secs: u64,
    pub log_file: PathBuf,
}

/// Unvalidated view of the layered sources. Everything is read as text so
/// that each problem can be reported by key.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    api_base: Option<String>,
    pihole_ip: Option<String>,
    server_ip: Option<String>,
    nas_base: Option<String>,
    traefik_url: Option<String>,
    portfolio_url: Option<String>,
    leetcode_username: Option<String>,
    github_username: Option<String>,
    npm_package: Option<String>,
    request_timeout_secs: Option<String>,
    log_file: Option<String>,
}

/// One invalid or missing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub key: &'static str,
    pub reason: String,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Sources loaded but some keys are missing or malformed.
    #[error("invalid configuration:\n{}", list_problems(.0))]
    Invalid(Vec<Problem>),
}

fn list_problems(problems: &[Problem]) -> String {
    problems
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Settings {
    /// Load from `path` (or [`DEFAULT_CONFIG_FILE`] if present) and the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("HOMELAB").try_parsing(false))
            .build()?;

        Self::from_config(config)
    }

    /// Validate an already-built [`Config`].
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let raw: RawSettings = config.try_deserialize()?;
        raw.validate().map_err(ConfigError::Invalid)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL of the diagnostics API on the main server.
    pub fn primary_diagnostics_base(&self) -> String {
        format!("{}/diagnostics", self.api_base)
    }

    /// Base URL of the diagnostics API on the Pi-hole host.
    pub fn pihole_diagnostics_base(&self) -> String {
        format!("http://{}:81/api/diagnostics", self.pihole_ip)
    }

    pub fn pihole_admin_url(&self) -> String {
        format!("http://{}/admin/", self.server_ip)
    }

    pub fn leetcode_profile_url(&self) -> String {
        format!("https://leetcode.com/{}/", self.leetcode_username)
    }

    pub fn github_profile_url(&self) -> String {
        format!("https://github.com/{}", self.github_username)
    }

    pub fn npm_package_url(&self) -> String {
        format!("https://www.npmjs.com/package/{}", self.npm_package)
    }
}

#[cfg(test)]
impl Settings {
    /// Settings with every API under `api_base`, for tests.
    pub(crate) fn for_tests(api_base: &str) -> Self {
        Self {
            api_base: api_base.to_string(),
            pihole_ip: Ipv4Addr::LOCALHOST,
            server_ip: Ipv4Addr::new(192, 168, 1, 10),
            nas_base: api_base.to_string(),
            traefik_url: None,
            portfolio_url: Some("https://example.dev".into()),
            leetcode_username: "coder".into(),
            github_username: "octo".into(),
            npm_package: "validate-env-vars".into(),
            request_timeout_secs: 5,
            log_file: PathBuf::from("test.log"),
        }
    }
}

impl RawSettings {
    fn validate(self) -> Result<Settings, Vec<Problem>> {
        let mut problems = Vec::new();

        let api_base = required_url(&mut problems, "api_base", self.api_base);
        let pihole_ip = required_ipv4(&mut problems, "pihole_ip", self.pihole_ip);
        let server_ip = required_ipv4(&mut problems, "server_ip", self.server_ip);
        let nas_base = optional_url(&mut problems, "nas_base", self.nas_base);
        let traefik_url = optional_url(&mut problems, "traefik_url", self.traefik_url);
        let portfolio_url = optional_url(&mut problems, "portfolio_url", self.portfolio_url);
        let leetcode_username =
            required_text(&mut problems, "leetcode_username", self.leetcode_username);
        let github_username = required_text(&mut problems, "github_username", self.github_username);
        let npm_package = optional_text(&mut problems, "npm_package", self.npm_package)
            .unwrap_or_else(|| "validate-env-vars".to_string());
        let log_file = optional_text(&mut problems, "log_file", self.log_file)
            .unwrap_or_else(|| "homelab-dash.log".to_string());

        let request_timeout_secs =
            match optional_text(&mut problems, "request_timeout_secs", self.request_timeout_secs) {
                None => 10,
                Some(text) => match text.parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => {
                        problems.push(Problem {
                            key: "request_timeout_secs",
                            reason: format!("expected a positive whole number, got {:?}", text),
                        });
                        10
                    }
                },
            };

        match (api_base, pihole_ip, server_ip, leetcode_username, github_username) {
            (Some(api_base), Some(pihole_ip), Some(server_ip), Some(leetcode), Some(github))
                if problems.is_empty() =>
            {
                Ok(Settings {
                    nas_base: nas_base.unwrap_or_else(|| api_base.clone()),
                    api_base,
                    pihole_ip,
                    server_ip,
                    traefik_url,
                    portfolio_url,
                    leetcode_username: leetcode,
                    github_username: github,
                    npm_package,
                    request_timeout_secs,
                    log_file: PathBuf::from(log_file),
                })
            }
            _ => Err(problems),
        }
    }
}

/// Trimmed value, `None` when unset or blank, with `undefined` reported.
fn optional_text(
    problems: &mut Vec<Problem>,
    key: &'static str,
    value: Option<String>,
) -> Option<String> {
    let value = value?.trim().to_string();
    if value.is_empty() {
        return None;
    }
    if value == UNDEFINED {
        problems.push(Problem {
            key,
            reason: "is the literal \"undefined\"".to_string(),
        });
        return None;
    }
    Some(value)
}

fn required_text(
    problems: &mut Vec<Problem>,
    key: &'static str,
    value: Option<String>,
) -> Option<String> {
    let was_set = value.is_some();
    let value = optional_text(problems, key, value);
    if value.is_none() && !problems.iter().any(|p| p.key == key) {
        problems.push(Problem {
            key,
            reason: if was_set { "must not be empty" } else { "is required" }.to_string(),
        });
    }
    value
}

fn optional_url(
    problems: &mut Vec<Problem>,
    key: &'static str,
    value: Option<String>,
) -> Option<String> {
    let value = optional_text(problems, key, value)?;
    match check_url(key, &value) {
        Ok(()) => Some(value.trim_end_matches('/').to_string()),
        Err(_) => {
            problems.push(Problem {
                key,
                reason: format!("expected an http(s) URL, got {:?}", value),
            });
            None
        }
    }
}

fn required_url(
    problems: &mut Vec<Problem>,
    key: &'static str,
    value: Option<String>,
) -> Option<String> {
    let before = problems.len();
    let url = optional_url(problems, key, value);
    if url.is_none() && problems.len() == before {
        problems.push(Problem {
            key,
            reason: "is required".to_string(),
        });
    }
    url
}

fn required_ipv4(
    problems: &mut Vec<Problem>,
    key: &'static str,
    value: Option<String>,
) -> Option<Ipv4Addr> {
    let text = required_text(problems, key, value)?;
    match text.parse::<Ipv4Addr>() {
        Ok(ip) => Some(ip),
        Err(_) => {
            problems.push(Problem {
                key,
                reason: format!("expected an IPv4 address, got {:?}", text),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use parking_lot::{const_mutex, Mutex};

    use super::*;

    /// Held by every test that goes through `Settings::load`, since those
    /// read the process environment.
    static ENV_LOCK: Mutex<()> = const_mutex(());

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap();
        Settings::from_config(config)
    }

    const VALID: &str = r#"
        api_base = "http://192.168.1.10:8000/"
        pihole_ip = "192.168.1.2"
        server_ip = "192.168.1.10"
        leetcode_username = "coder"
        github_username = "octo"
    "#;

    #[test]
    fn applies_defaults() {
        let settings = from_toml(VALID).unwrap();
        assert_eq!(settings.api_base, "http://192.168.1.10:8000");
        assert_eq!(settings.nas_base, settings.api_base);
        assert_eq!(settings.npm_package, "validate-env-vars");
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.log_file, PathBuf::from("homelab-dash.log"));
        assert_eq!(settings.traefik_url, None);
    }

    #[test]
    fn derived_urls() {
        let settings = from_toml(VALID).unwrap();
        assert_eq!(
            settings.pihole_diagnostics_base(),
            "http://192.168.1.2:81/api/diagnostics"
        );
        assert_eq!(
            settings.primary_diagnostics_base(),
            "http://192.168.1.10:8000/diagnostics"
        );
        assert_eq!(settings.pihole_admin_url(), "http://192.168.1.10/admin/");
    }

    #[test]
    fn numeric_timeout_from_toml() {
        let settings = from_toml(&format!("{}\nrequest_timeout_secs = 3", VALID)).unwrap();
        assert_eq!(settings.request_timeout_secs, 3);
    }

    #[test]
    fn lists_every_problem() {
        let err = from_toml(
            r#"
            api_base = "not a url"
            pihole_ip = "pihole.lan"
            server_ip = "undefined"
            github_username = ""
            request_timeout_secs = "soon"
            "#,
        )
        .unwrap_err();

        let ConfigError::Invalid(problems) = err else {
            panic!("expected validation problems");
        };
        let keys: Vec<&str> = problems.iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            [
                "api_base",
                "pihole_ip",
                "server_ip",
                "leetcode_username",
                "github_username",
                "request_timeout_secs"
            ]
        );
        assert!(problems[2].reason.contains("undefined"));
        assert_eq!(problems[3].reason, "is required");
        assert_eq!(problems[4].reason, "must not be empty");
    }

    #[test]
    fn error_message_lists_keys() {
        let err = from_toml("").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid configuration:"));
        assert!(message.contains("  - api_base: is required"));
        assert!(message.contains("  - github_username: is required"));
    }

    #[test]
    fn loads_explicit_file() {
        let _env = ENV_LOCK.lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}\nnpm_package = \"left-pad\"", VALID).unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.npm_package, "left-pad");
        assert_eq!(settings.github_username, "octo");
    }

    #[test]
    fn missing_explicit_file_is_a_load_error() {
        let _env = ENV_LOCK.lock();
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn environment_overrides_file() {
        let _env = ENV_LOCK.lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}\nrequest_timeout_secs = 3", VALID).unwrap();

        std::env::set_var("HOMELAB_API_BASE", "http://env.lan:8000");
        std::env::set_var("HOMELAB_REQUEST_TIMEOUT_SECS", "7");
        let loaded = Settings::load(Some(file.path()));
        std::env::remove_var("HOMELAB_API_BASE");
        std::env::remove_var("HOMELAB_REQUEST_TIMEOUT_SECS");

        let settings = loaded.unwrap();
        assert_eq!(settings.api_base, "http://env.lan:8000");
        assert_eq!(settings.request_timeout_secs, 7);
        // Keys the environment leaves alone still come from the file.
        assert_eq!(settings.server_ip, Ipv4Addr::new(192, 168, 1, 10));
    }
}
