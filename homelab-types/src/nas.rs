//! Synology NAS system report and shared-folder sizes.

use serde::{Deserialize, Serialize};

use crate::{check_ipv4, check_percent, SchemaError, Validate};

/// Combined core, storage, network and utilisation report for the NAS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasDiagnostics {
    pub core: NasCoreInfo,
    pub storage: NasStorage,
    pub network: NasNetwork,
    pub utilization: NasUtilization,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasCoreInfo {
    pub cpu_clock_speed: u32,
    pub cpu_cores: u32,
    pub cpu_family: String,
    pub cpu_series: String,
    pub cpu_vendor: String,
    pub external_pci_slot_info: Vec<PciSlot>,
    pub firmware_date: String,
    pub firmware_ver: String,
    pub model: String,
    pub ntp_server: String,
    /// Installed memory in MB.
    pub ram_size: u64,
    /// System temperature in Celsius.
    pub sys_temp: i32,
    pub temperature_warning: bool,
    pub up_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PciSlot {
    #[serde(rename = "Occupied")]
    pub occupied: String,
    #[serde(rename = "Recognized")]
    pub recognized: String,
    pub card_name: String,
    pub slot: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasStorage {
    pub hdd_info: Vec<HddInfo>,
    pub vol_info: Vec<VolumeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HddInfo {
    /// Raw capacity in bytes.
    pub capacity: u64,
    #[serde(rename = "diskPath")]
    pub disk_path: String,
    #[serde(rename = "diskType")]
    pub disk_type: String,
    pub diskno: String,
    /// Bay order, used for display sorting.
    pub order: i32,
    pub overview_status: String,
    pub status: String,
    pub temp: i32,
    pub testing_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub desc: String,
    pub is_encrypted: bool,
    pub name: String,
    pub status: String,
    pub total_size: u64,
    pub used_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasNetwork {
    pub dns: String,
    pub enabled_domain: bool,
    pub enabled_samba: bool,
    pub gateway: String,
    pub hostname: String,
    pub nif: Vec<NetworkInterface>,
    pub workgroup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub addr: String,
    pub id: String,
    pub speed: i64,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub use_dhcp: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasUtilization {
    pub cpu: CpuLoad,
    pub memory: MemoryUtilization,
}

/// Load averages; DSM reports them as `1min_load` etc., the API may
/// already have renamed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuLoad {
    #[serde(alias = "15min_load")]
    pub load_15_min_avg: u32,
    #[serde(alias = "5min_load")]
    pub load_5_min_avg: u32,
    #[serde(alias = "1min_load")]
    pub load_1_min_avg: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryUtilization {
    pub real_usage: u32,
}

impl NasStorage {
    /// Used and total bytes summed over volumes, saturating at `u64::MAX`.
    ///
    /// Volumes rather than disks, so RAID overhead is accounted for.
    pub fn volume_totals(&self) -> (u64, u64) {
        self.vol_info.iter().fold((0u64, 0u64), |(used, total), v| {
            (
                used.saturating_add(v.used_size),
                total.saturating_add(v.total_size),
            )
        })
    }

    /// Disks in bay order.
    pub fn disks_in_order(&self) -> Vec<&HddInfo> {
        let mut disks: Vec<&HddInfo> = self.hdd_info.iter().collect();
        disks.sort_by_key(|d| d.order);
        disks
    }
}

impl Validate for NasDiagnostics {
    fn validate(&self) -> Result<(), SchemaError> {
        check_ipv4("network.dns", &self.network.dns)?;
        check_ipv4("network.gateway", &self.network.gateway)?;
        for nif in &self.network.nif {
            check_ipv4("network.nif.addr", &nif.addr)?;
        }
        check_percent(
            "utilization.memory.real_usage",
            self.utilization.memory.real_usage as f64,
        )
    }
}

/// Sizes of the shared folders below one parent folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasFolders {
    pub folders: Vec<NasFolder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasFolder {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    pub num_dir: u64,
    pub num_file: u64,
    pub total_size: u64,
    pub time: FolderTimes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderTimes {
    pub last_accessed: i64,
    pub last_changed: i64,
    pub last_modified: i64,
    pub created: i64,
}

impl NasFolders {
    pub fn find(&self, name: &str) -> Option<&NasFolder> {
        self.folders.iter().find(|f| f.name == name)
    }
}

impl Validate for NasFolders {
    fn validate(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        r#"{
            "core": {
                "cpu_clock_speed": 2200, "cpu_cores": 4, "cpu_family": "Ryzen",
                "cpu_series": "R1600", "cpu_vendor": "AMD",
                "external_pci_slot_info": [
                    {"Occupied": "no", "Recognized": "no", "cardName": "-", "slot": "1"}
                ],
                "firmware_date": "2024/01/01", "firmware_ver": "DSM 7.2",
                "model": "DS923+", "ntp_server": "time.google.com",
                "ram_size": 4096, "sys_temp": 41, "temperature_warning": false,
                "up_time": "12:34:56"
            },
            "storage": {
                "hdd_info": [
                    {"capacity": 4000000000000, "diskPath": "/dev/sata2", "diskType": "SATA",
                     "diskno": "Disk 2", "order": 2, "overview_status": "normal",
                     "status": "normal", "temp": 35, "testing_type": "idle"},
                    {"capacity": 4000000000000, "diskPath": "/dev/sata1", "diskType": "SATA",
                     "diskno": "Disk 1", "order": 1, "overview_status": "warning",
                     "status": "normal", "temp": 37, "testing_type": "idle"}
                ],
                "vol_info": [
                    {"desc": "", "is_encrypted": false, "name": "volume_1",
                     "status": "normal", "total_size": 6000000000000, "used_size": 1500000000000}
                ]
            },
            "network": {
                "dns": "192.168.1.1", "enabled_domain": false, "enabled_samba": true,
                "gateway": "192.168.1.1", "hostname": "nas",
                "nif": [
                    {"addr": "192.168.1.20", "id": "eth0", "speed": 1000,
                     "status": "connected", "type": "lan", "use_dhcp": true}
                ],
                "workgroup": "WORKGROUP"
            },
            "utilization": {
                "cpu": {"15min_load": 3, "5min_load": 4, "1min_load": 5},
                "memory": {"real_usage": 22}
            }
        }"#
        .to_string()
    }

    #[test]
    fn decodes_dsm_load_aliases() {
        let nas: NasDiagnostics = serde_json::from_str(&sample_json()).unwrap();
        nas.validate().unwrap();
        assert_eq!(nas.utilization.cpu.load_1_min_avg, 5);
        assert_eq!(nas.utilization.cpu.load_15_min_avg, 3);
    }

    #[test]
    fn decodes_renamed_load_keys() {
        let body = sample_json()
            .replace("15min_load", "load_15_min_avg")
            .replace("\"5min_load", "\"load_5_min_avg")
            .replace("\"1min_load", "\"load_1_min_avg");
        let nas: NasDiagnostics = serde_json::from_str(&body).unwrap();
        assert_eq!(nas.utilization.cpu.load_5_min_avg, 4);
    }

    #[test]
    fn volume_totals_and_disk_order() {
        let nas: NasDiagnostics = serde_json::from_str(&sample_json()).unwrap();
        assert_eq!(nas.storage.volume_totals(), (1_500_000_000_000, 6_000_000_000_000));
        let order: Vec<&str> = nas
            .storage
            .disks_in_order()
            .iter()
            .map(|d| d.diskno.as_str())
            .collect();
        assert_eq!(order, ["Disk 1", "Disk 2"]);
    }

    #[test]
    fn volume_totals_saturate_on_huge_volumes() {
        let mut nas: NasDiagnostics = serde_json::from_str(&sample_json()).unwrap();
        let huge = VolumeInfo {
            total_size: u64::MAX / 2 + 1,
            used_size: u64::MAX / 2 + 1,
            ..nas.storage.vol_info[0].clone()
        };
        nas.storage.vol_info = vec![huge.clone(), huge];
        assert_eq!(nas.storage.volume_totals(), (u64::MAX, u64::MAX));
    }

    #[test]
    fn interface_address_must_be_ipv4() {
        let body = sample_json().replace(r#""addr": "192.168.1.20""#, r#""addr": "fe80::1""#);
        let nas: NasDiagnostics = serde_json::from_str(&body).unwrap();
        assert_eq!(
            nas.validate(),
            Err(SchemaError::InvalidIp {
                field: "network.nif.addr".into(),
                value: "fe80::1".into(),
            })
        );
    }

    #[test]
    fn rejects_hostname_where_ip_expected() {
        let body = sample_json().replace(r#""dns": "192.168.1.1""#, r#""dns": "router""#);
        let nas: NasDiagnostics = serde_json::from_str(&body).unwrap();
        assert!(matches!(nas.validate(), Err(SchemaError::InvalidIp { .. })));
    }

    #[test]
    fn finds_folder_by_name() {
        let body = r#"{"folders": [
            {"name": "tv", "path": "/media/tv", "is_dir": true, "num_dir": 212,
             "num_file": 4000, "total_size": 10,
             "time": {"last_accessed": 0, "last_changed": 0, "last_modified": 0, "created": 0}}
        ]}"#;
        let folders: NasFolders = serde_json::from_str(body).unwrap();
        assert_eq!(folders.find("tv").map(|f| f.num_dir), Some(212));
        assert!(folders.find("movies").is_none());
    }
}
