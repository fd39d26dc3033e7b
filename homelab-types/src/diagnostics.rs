//! Host diagnostics served by the diagnostics API on each server.

use serde::{Deserialize, Serialize};

use crate::{check_percent, SchemaError, Validate};

/// Point-in-time CPU, memory and disk utilisation of one host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsSnapshot {
    pub cpu: CpuInfo,
    pub memory: Usage,
    pub disk: Usage,
    #[serde(default)]
    pub pids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub count: u32,
    /// Per-core utilisation in percent.
    pub percent: Vec<f64>,
    /// Package temperature in Celsius; absent on hosts without a sensor.
    #[serde(default)]
    pub temp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub percent: f64,
}

impl DiagnosticsSnapshot {
    /// Busiest core, or `None` when no per-core data was reported.
    pub fn cpu_max(&self) -> Option<f64> {
        self.cpu.percent.iter().copied().reduce(f64::max)
    }

    /// Mean across cores, or `None` when no per-core data was reported.
    pub fn cpu_avg(&self) -> Option<f64> {
        if self.cpu.percent.is_empty() {
            return None;
        }
        Some(self.cpu.percent.iter().sum::<f64>() / self.cpu.percent.len() as f64)
    }
}

impl Validate for DiagnosticsSnapshot {
    fn validate(&self) -> Result<(), SchemaError> {
        for p in &self.cpu.percent {
            check_percent("cpu.percent", *p)?;
        }
        check_percent("memory.percent", self.memory.percent)?;
        check_percent("disk.percent", self.disk.percent)
    }
}
