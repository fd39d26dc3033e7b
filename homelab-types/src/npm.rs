//! npm registry package metadata with download history.

use serde::{Deserialize, Serialize};

use crate::{check_url, SchemaError, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpmPackageInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub license: String,
    pub homepage: String,
    pub repository: String,
    #[serde(default)]
    pub issues: Option<String>,
    #[serde(default)]
    pub pulls: Option<String>,
    pub downloads: NpmDownloads,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpmDownloads {
    /// Downloads over the reported window, usually the last month.
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub per_day: Vec<DownloadDay>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadDay {
    pub downloads: u64,
    pub day: String,
}

impl NpmDownloads {
    /// Reported total, or the sum of the daily series when the total is absent.
    pub fn total_or_sum(&self) -> u64 {
        self.total
            .unwrap_or_else(|| self.per_day.iter().map(|d| d.downloads).sum())
    }
}

impl Validate for NpmPackageInfo {
    fn validate(&self) -> Result<(), SchemaError> {
        check_url("homepage", &self.homepage)?;
        if let Some(issues) = &self.issues {
            check_url("issues", issues)?;
        }
        if let Some(pulls) = &self.pulls {
            check_url("pulls", pulls)?;
        }
        Ok(())
    }
}
