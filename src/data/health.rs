//! Status derivation for chips, disks and storage.

use homelab_types::{HealthCheck, ServiceStatus};

use crate::query::QueryState;

/// Usage above this percentage is drawn as an alert.
pub const STORAGE_ALERT_PERCENT: f64 = 90.0;

/// Chip status for a health query: pending is loading, any failure is an
/// error, and a success reports what the service said about itself.
pub fn service_status(state: &QueryState<HealthCheck>) -> ServiceStatus {
    match state {
        QueryState::Pending => ServiceStatus::Loading,
        QueryState::Error(_) => ServiceStatus::Error,
        QueryState::Success(check) => check.status,
    }
}

/// Worst of a set of statuses; loading ranks below every answer.
pub fn worst(statuses: impl IntoIterator<Item = ServiceStatus>) -> ServiceStatus {
    statuses
        .into_iter()
        .max_by_key(|s| s.severity())
        .unwrap_or(ServiceStatus::Loading)
}

/// Colour class for a value on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
}

/// Classify a NAS disk's `overview_status`; unknown strings are `Info`.
pub fn disk_tone(status: &str) -> Tone {
    match status.to_ascii_lowercase().as_str() {
        "normal" | "initialized" => Tone::Success,
        "warning" => Tone::Warning,
        "crashed" | "error" | "failing" | "failed" => Tone::Error,
        _ => Tone::Info,
    }
}

pub fn storage_tone(used_percent: f64) -> Tone {
    if used_percent > STORAGE_ALERT_PERCENT {
        Tone::Error
    } else {
        Tone::Info
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_service_status_from_query() {
        assert_eq!(service_status(&QueryState::Pending), ServiceStatus::Loading);
        assert_eq!(
            service_status(&QueryState::Error("refused".into())),
            ServiceStatus::Error
        );
        for status in [ServiceStatus::Ok, ServiceStatus::Warning, ServiceStatus::Error] {
            let state = QueryState::Success(Arc::new(HealthCheck { status }));
            assert_eq!(service_status(&state), status);
        }
    }

    #[test]
    fn test_worst() {
        use ServiceStatus::*;
        assert_eq!(worst([Ok, Loading, Warning]), Warning);
        assert_eq!(worst([Ok, Error, Warning]), Error);
        assert_eq!(worst([Loading, Loading]), Loading);
        assert_eq!(worst([Ok, Loading]), Ok);
        assert_eq!(worst(Vec::new()), Loading);
    }

    #[test]
    fn test_disk_tone() {
        assert_eq!(disk_tone("Normal"), Tone::Success);
        assert_eq!(disk_tone("initialized"), Tone::Success);
        assert_eq!(disk_tone("WARNING"), Tone::Warning);
        assert_eq!(disk_tone("failing"), Tone::Error);
        assert_eq!(disk_tone("rebuilding"), Tone::Info);
    }

    #[test]
    fn test_storage_tone() {
        assert_eq!(storage_tone(90.0), Tone::Info);
        assert_eq!(storage_tone(90.1), Tone::Error);
    }
}
