use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// Application code the mirror directory uses for a good answer.
const DIRECTORY_OK: i64 = 200;

/// One candidate mirror endpoint.
///
/// Records are plain values: two records with the same `url` are treated as
/// independent candidates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorRecord {
    /// Base address, prepended to the canonical URL.
    pub url: String,
    pub server: String,
    pub ip: String,
    pub location: String,
    /// Round-trip latency measured by the directory, lower is better.
    #[serde(rename = "latency")]
    pub latency_ms: u32,
    /// Throughput estimate in MB/s, higher is better.
    #[serde(rename = "speed")]
    pub speed_mbs: f64,
}

impl MirrorRecord {
    pub fn new(url: impl Into<String>, latency_ms: u32, speed_mbs: f64) -> Self {
        Self {
            url: url.into(),
            latency_ms,
            speed_mbs,
            ..Self::default()
        }
    }
}

/// Payload returned by the mirror directory service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectoryResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Vec<MirrorRecord>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub update_time: String,
}

impl DirectoryResponse {
    /// Parse a directory payload, rejecting answers whose in-band code is not 200.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let response: DirectoryResponse =
            serde_json::from_slice(body).map_err(|e| FetchError::parse("mirror directory", e))?;

        if response.code != DIRECTORY_OK {
            return Err(FetchError::Directory {
                code: response.code,
                message: response.msg,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "code": 200,
        "msg": "success",
        "data": [
            {"url": "https://ghproxy.cc", "server": "cloudflare", "ip": "1.1.1.1",
             "location": "US", "latency": 120, "speed": 3.5},
            {"url": "https://gh.b52m.cn", "server": "nginx", "ip": "2.2.2.2",
             "location": "CN", "latency": 45, "speed": 1.25}
        ],
        "total": 2,
        "update_time": "2025-06-01 08:00:00"
    }"#;

    #[test]
    fn parses_directory_payload() {
        let response = DirectoryResponse::from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.update_time, "2025-06-01 08:00:00");
        assert_eq!(response.data[0].url, "https://ghproxy.cc");
        assert_eq!(response.data[0].latency_ms, 120);
        assert_eq!(response.data[1].speed_mbs, 1.25);
        assert_eq!(response.data[1].location, "CN");
    }

    #[test]
    fn in_band_error_code_is_a_directory_error() {
        let body = br#"{"code": 500, "msg": "rate limited", "data": []}"#;
        match DirectoryResponse::from_slice(body) {
            Err(FetchError::Directory { code, message }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected directory error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        let result = DirectoryResponse::from_slice(b"<html>blocked</html>");
        assert!(matches!(result, Err(FetchError::Parse { .. })));
    }

    #[test]
    fn missing_descriptive_fields_default() {
        let body = br#"{"code": 200, "data": [{"url": "https://m.example", "speed": 2.0}]}"#;
        let response = DirectoryResponse::from_slice(body).unwrap();
        let record = &response.data[0];
        assert_eq!(record.latency_ms, 0);
        assert!(record.server.is_empty());
        assert_eq!(response.total, 0);
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let record = MirrorRecord::new("https://m.example", 10, 0.5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["latency"], 10);
        assert_eq!(json["speed"], 0.5);
        assert!(json.get("latency_ms").is_none());
    }
}
