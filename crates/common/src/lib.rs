pub mod types;
pub mod utils;
pub mod metrics;
pub mod admin_http;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_serializes_with_error_status() {
        let body = types::ErrorBody::new("bucket with id b1 not found");
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["status"], "error");
        assert_eq!(json["text"], "bucket with id b1 not found");
    }
}
