//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use serde::Serialize;

/// Response body for GET /get/:key and PUT /get_or_set
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
    /// Remaining TTL in milliseconds; omitted for permanent entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_ms: Option<u64>,
}

impl GetResponse {
    /// Creates a new GetResponse without TTL information
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ttl_ms: None,
        }
    }

    /// Attaches the remaining TTL of the entry.
    ///
    /// # Arguments
    /// * `ttl` - Remaining TTL, or None for a permanent entry
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl_ms = ttl.map(|ttl| ttl.as_millis().min(u64::MAX as u128) as u64);
        self
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted", key),
            key,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Lifecycle state of the cache ("alive", "destroyed", ...)
    pub status: String,
    /// Current number of entries in the cache
    pub entries: usize,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn new(status: impl Into<String>, entries: usize) -> Self {
        Self {
            status: status.into(),
            entries,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for POST /shutdown
#[derive(Debug, Clone, Serialize)]
pub struct ShutdownResponse {
    /// Confirmation message
    pub message: String,
}

impl ShutdownResponse {
    /// Creates the response acknowledging a shutdown request
    pub fn requested() -> Self {
        Self {
            message: "Cache shutdown requested".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", "test_value");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("test_key"));
        assert!(json.contains("test_value"));
    }

    #[test]
    fn test_get_response_ttl_serialization() {
        let permanent = serde_json::to_string(&GetResponse::new("k", "v").with_ttl(None)).unwrap();
        assert!(!permanent.contains("ttl_ms"));

        let expiring = GetResponse::new("k", "v").with_ttl(Some(Duration::from_millis(1500)));
        let json = serde_json::to_string(&expiring).unwrap();
        assert!(json.contains("\"ttl_ms\":1500"));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("deleted_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("deleted_key"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::new("alive", 3);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("alive"));
        assert!(json.contains("\"entries\":3"));
        assert!(json.contains("timestamp"));
    }
}
