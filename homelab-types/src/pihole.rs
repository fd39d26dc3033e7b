//! Pi-hole recent-activity summary.

use serde::{Deserialize, Serialize};

use crate::{check_percent, SchemaError, Validate};

/// Recent query statistics merged with the FTL daemon summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiholeSummary {
    pub sum_queries: u64,
    pub sum_blocked: u64,
    pub percent_blocked: f64,
    pub total_clients: u64,
    /// Domains on the gravity block list.
    pub gravity: u64,
    /// Queries per second.
    pub qps: f64,
    /// FTL uptime in seconds.
    pub uptime: f64,
    pub percent_mem: f64,
    pub percent_cpu: f64,
}

impl Validate for PiholeSummary {
    fn validate(&self) -> Result<(), SchemaError> {
        check_percent("percent_blocked", self.percent_blocked)?;
        check_percent("percent_mem", self.percent_mem)
    }
}
