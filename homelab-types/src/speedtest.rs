//! Result of the most recent network speed test.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{check_ipv4, SchemaError, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTestResult {
    /// Download rate in bits per second.
    pub download: f64,
    /// Upload rate in bits per second.
    pub upload: f64,
    /// Round-trip latency in milliseconds.
    pub ping: f64,
    pub server: SpeedTestServer,
    pub timestamp: DateTime<Utc>,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    #[serde(default)]
    pub share: Option<String>,
    pub client: SpeedTestClient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTestServer {
    pub url: String,
    pub lat: String,
    pub lon: String,
    pub name: String,
    pub country: String,
    pub cc: String,
    pub sponsor: String,
    pub id: String,
    pub host: String,
    /// Distance to the server in km.
    pub d: f64,
    pub latency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTestClient {
    pub ip: String,
    pub lat: String,
    pub lon: String,
    pub isp: String,
    pub isprating: String,
    pub rating: String,
    pub ispdlavg: String,
    pub ispulavg: String,
    pub loggedin: String,
    pub country: String,
}

impl Validate for SpeedTestResult {
    fn validate(&self) -> Result<(), SchemaError> {
        check_ipv4("client.ip", &self.client.ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "download": 512345678.9, "upload": 98765432.1, "ping": 11.2,
            "server": {"url": "http://speed.example:8080/upload.php", "lat": "40.0",
                       "lon": "-75.0", "name": "Philadelphia, PA", "country": "United States",
                       "cc": "US", "sponsor": "Example ISP", "id": "1234",
                       "host": "speed.example:8080", "d": 12.5, "latency": 10.9},
            "timestamp": "2024-05-01T12:00:00.123456Z",
            "bytes_sent": 123000000, "bytes_received": 640000000, "share": null,
            "client": {"ip": "203.0.113.9", "lat": "40.0", "lon": "-75.0",
                       "isp": "Example ISP", "isprating": "3.7", "rating": "0",
                       "ispdlavg": "0", "ispulavg": "0", "loggedin": "0", "country": "US"}
        }"#
    }

    #[test]
    fn decodes_timestamp() {
        let r: SpeedTestResult = serde_json::from_str(sample_json()).unwrap();
        r.validate().unwrap();
        assert_eq!(r.timestamp.to_rfc3339(), "2024-05-01T12:00:00.123456+00:00");
    }

    #[test]
    fn client_ip_must_be_ipv4() {
        let body = sample_json().replace("203.0.113.9", "2001:db8::1");
        let r: SpeedTestResult = serde_json::from_str(&body).unwrap();
        assert!(matches!(r.validate(), Err(SchemaError::InvalidIp { .. })));
    }
}
