//! Service health status.

use serde::{Deserialize, Serialize};

use crate::{SchemaError, Validate};

/// Health of a monitored service.
///
/// Recomputed on every poll of the service's health check; it has no
/// lifecycle of its own. `Loading` only exists on the client side, while
/// the first health check is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Warning,
    Error,
    Loading,
}

impl ServiceStatus {
    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Ok => "ok",
            ServiceStatus::Warning => "warning",
            ServiceStatus::Error => "error",
            ServiceStatus::Loading => "loading",
        }
    }

    /// Ordering used to pick the worst status of a group.
    ///
    /// `Loading` ranks below `Ok` so a column that is still starting up
    /// does not hide a real failure.
    pub fn severity(&self) -> u8 {
        match self {
            ServiceStatus::Loading => 0,
            ServiceStatus::Ok => 1,
            ServiceStatus::Warning => 2,
            ServiceStatus::Error => 3,
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a health-check endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: ServiceStatus,
}

impl Validate for HealthCheck {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.status == ServiceStatus::Loading {
            return Err(SchemaError::UnexpectedValue {
                field: "status".to_string(),
                value: "loading".to_string(),
            });
        }
        Ok(())
    }
}
