//! NAS storage and media folder cards.

use homelab_types::{NasDiagnostics, NasFolders};

use crate::data::format::thousands;
use crate::data::health::{disk_tone, storage_tone};
use crate::data::units::bytes_to_terabytes;
use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

/// Used and total capacity from the volumes, a usage gauge, then one row per
/// disk in bay order.
pub fn storage(state: &QueryState<NasDiagnostics>) -> CardView {
    CardView::new("NAS Storage", "▤").from_state(state, 4, |nas| {
        let (used, total) = nas.storage.volume_totals();
        let used_pct = if total == 0 {
            0.0
        } else {
            used as f64 / total as f64 * 100.0
        };
        let disks = nas.storage.disks_in_order();

        let mut lines = vec![
            CardLine::headline(format!(
                "{:.2} / {:.2} TB",
                bytes_to_terabytes(used as f64),
                bytes_to_terabytes(total as f64)
            )),
            CardLine::Gauge {
                ratio: used_pct / 100.0,
                label: format!("{:.1}% used across {} drives", used_pct, disks.len()),
                tone: storage_tone(used_pct),
            },
        ];
        lines.extend(disks.into_iter().map(|d| {
            CardLine::Text(vec![
                Fragment::toned("● ", disk_tone(&d.overview_status)),
                Fragment::plain(format!("{:<6}", d.diskno)),
                Fragment::dim(format!("{:<10}", d.overview_status)),
                Fragment::plain(format!(
                    "{:>8}{:>6}",
                    format!("{:.1} TB", bytes_to_terabytes(d.capacity as f64)),
                    format!("{}°C", d.temp)
                )),
            ])
        }));
        lines
    })
}

/// Season and movie counts from the `tv` and `movies` folders; a missing
/// folder counts as zero.
pub fn media(state: &QueryState<NasFolders>) -> CardView {
    CardView::new("NAS Media", "▶").from_state(state, 2, |folders| {
        let count = |name: &str| folders.find(name).map_or(0, |f| f.num_dir);
        vec![
            CardLine::pair("TV Shows (Seasons)", thousands(count("tv"))),
            CardLine::pair("Movies", thousands(count("movies"))),
        ]
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::Tone;
    use crate::ui::card::CardBody;

    fn disk(diskno: &str, order: i32, status: &str) -> serde_json::Value {
        serde_json::json!({
            "capacity": 4_000_000_000_000u64, "diskPath": "/dev/sda", "diskType": "SATA",
            "diskno": diskno, "order": order, "overview_status": status,
            "status": status, "temp": 35, "testing_type": "idle"
        })
    }

    fn nas(used: u64, total: u64, disks: Vec<serde_json::Value>) -> QueryState<NasDiagnostics> {
        let json = serde_json::json!({
            "core": {
                "cpu_clock_speed": 1700, "cpu_cores": 4, "cpu_family": "Celeron",
                "cpu_series": "J3455", "cpu_vendor": "INTEL", "external_pci_slot_info": [],
                "firmware_date": "2024/01/01", "firmware_ver": "DSM 7.2", "model": "DS918+",
                "ntp_server": "pool.ntp.org", "ram_size": 4096, "sys_temp": 40,
                "temperature_warning": false, "up_time": "100:00:00"
            },
            "storage": {
                "hdd_info": disks,
                "vol_info": [{"desc": "", "is_encrypted": false, "name": "volume_1",
                              "status": "normal", "total_size": total, "used_size": used}]
            },
            "network": {
                "dns": "192.168.1.1", "enabled_domain": false, "enabled_samba": true,
                "gateway": "192.168.1.1", "hostname": "nas", "nif": [], "workgroup": "WORKGROUP"
            },
            "utilization": {
                "cpu": {"15min_load": 10, "5min_load": 12, "1min_load": 15},
                "memory": {"real_usage": 30}
            }
        });
        QueryState::Success(Arc::new(serde_json::from_value(json).unwrap()))
    }

    #[test]
    fn test_storage_totals_gauge_and_disk_order() {
        let state = nas(
            6_000_000_000_000,
            12_000_000_000_000,
            vec![disk("Disk 2", 2, "normal"), disk("Disk 1", 1, "crashed")],
        );
        let card = storage(&state);
        let text = card.body_text();
        assert_eq!(text[0], "6.00 / 12.00 TB");
        assert!(text[1].ends_with("50.0% used across 2 drives"));
        assert!(text[2].starts_with("● Disk 1"));
        assert!(text[2].contains("crashed"));
        assert!(text[2].ends_with("4.0 TB  35°C"));
        assert!(text[3].starts_with("● Disk 2"));

        let CardBody::Content(lines) = &card.body else {
            panic!("expected content");
        };
        assert!(matches!(lines[1], CardLine::Gauge { tone: Tone::Info, .. }));
        let CardLine::Text(fragments) = &lines[2] else {
            panic!("expected text");
        };
        assert_eq!(fragments[0].tone, Some(Tone::Error));
    }

    #[test]
    fn test_storage_alert_above_ninety_percent() {
        let card = storage(&nas(95, 100, vec![]));
        let CardBody::Content(lines) = &card.body else {
            panic!("expected content");
        };
        assert!(matches!(lines[1], CardLine::Gauge { tone: Tone::Error, .. }));
    }

    #[test]
    fn test_empty_volumes_do_not_divide_by_zero() {
        let card = storage(&nas(0, 0, vec![]));
        assert!(card.body_text()[1].ends_with("0.0% used across 0 drives"));
    }

    #[test]
    fn test_media_counts_and_missing_folder() {
        let folder = |name: &str, dirs: u64| {
            serde_json::json!({
                "name": name, "path": format!("/media/{name}"), "is_dir": true,
                "num_dir": dirs, "num_file": 0, "total_size": 0,
                "time": {"last_accessed": 0, "last_changed": 0, "last_modified": 0, "created": 0}
            })
        };
        let folders: NasFolders =
            serde_json::from_value(serde_json::json!({"folders": [folder("tv", 1234)]})).unwrap();
        let card = media(&QueryState::Success(Arc::new(folders)));
        assert_eq!(card.body_text(), vec!["TV Shows (Seasons) 1,234", "Movies 0"]);
    }
}
