//! Prometheus text exposition for the process-wide default registry.

use axum::http::StatusCode;
use prometheus::{Encoder, TextEncoder};

/// Encode every metric family in the default registry.
pub fn encode_metrics() -> (StatusCode, String) {
    encode_families(&prometheus::gather())
}

fn encode_families(families: &[prometheus::proto::MetricFamily]) -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{IntCounter, Registry};

    #[test]
    fn encodes_registered_counter() {
        let registry = Registry::new();
        let counter = IntCounter::new("test_requests_total", "test counter").expect("counter");
        registry.register(Box::new(counter.clone())).expect("register");
        counter.inc_by(3);

        let (status, body) = encode_families(&registry.gather());
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("test_requests_total 3"), "body was: {body}");
    }
}
