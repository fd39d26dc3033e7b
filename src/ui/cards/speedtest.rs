//! Latest network speed test.

use chrono::{DateTime, Utc};
use homelab_types::SpeedTestResult;

use crate::data::format::minutes_since;
use crate::data::units::bits_to_megabits;
use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

pub const SPEEDTEST_URL: &str = "https://www.speedtest.net/";

/// `now` is passed in so the elapsed time is testable.
pub fn card(state: &QueryState<SpeedTestResult>, now: DateTime<Utc>) -> CardView {
    CardView::new("SpeedTest", "⇅")
        .link(SPEEDTEST_URL)
        .from_state(state, 4, |st| {
            vec![
                CardLine::Text(vec![
                    Fragment::plain("↔ "),
                    Fragment::strong(format!("{:.1} ms", st.ping)),
                    Fragment::plain("   ↓ "),
                    Fragment::strong(format!("{:.2} Mbps", bits_to_megabits(st.download))),
                    Fragment::plain("   ↑ "),
                    Fragment::strong(format!("{:.2} Mbps", bits_to_megabits(st.upload))),
                ]),
                CardLine::Text(vec![Fragment::dim(format!(
                    "last tested {} minutes ago",
                    minutes_since(st.timestamp, now)
                ))]),
                CardLine::text(st.client.ip.clone()),
                CardLine::Text(vec![Fragment::dim(format!(
                    "{}, {}",
                    st.client.isp, st.client.country
                ))]),
            ]
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_speeds_age_and_client() {
        let json = serde_json::json!({
            "download": 512_340_000.0, "upload": 21_010_000.0, "ping": 12.345,
            "server": {"url": "http://speed.example.net/upload.php", "lat": "0", "lon": "0",
                       "name": "Seattle", "country": "United States", "cc": "US",
                       "sponsor": "ISP", "id": "1", "host": "speed.example.net:8080",
                       "d": 10.5, "latency": 12.3},
            "timestamp": "2024-05-01T12:00:00Z",
            "bytes_sent": 1, "bytes_received": 2,
            "client": {"ip": "203.0.113.7", "lat": "0", "lon": "0", "isp": "Comcast",
                       "isprating": "3.7", "rating": "0", "ispdlavg": "0", "ispulavg": "0",
                       "loggedin": "0", "country": "US"}
        });
        let result: SpeedTestResult = serde_json::from_value(json).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 7, 30).unwrap();
        let card = card(&QueryState::Success(Arc::new(result)), now);
        assert_eq!(
            card.body_text(),
            vec![
                "↔ 12.3 ms   ↓ 512.34 Mbps   ↑ 21.01 Mbps",
                "last tested 7 minutes ago",
                "203.0.113.7",
                "Comcast, US",
            ]
        );
    }
}
