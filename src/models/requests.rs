//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl_ms`: Optional TTL in milliseconds; `0` stores a permanent entry,
///   absent uses the cache's default key TTL
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for PUT /get_or_set
///
/// `value` is stored only when `key` is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct GetOrSetRequest {
    /// The cache key
    pub key: String,
    /// The value to store on a miss
    pub value: String,
}

impl GetOrSetRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Checks a key is non-empty and within the length limit.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, "hello");
        assert!(req.ttl_ms.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": "hello", "ttl_ms": 500}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl_ms, Some(500));
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: "test".to_string(),
            ttl_ms: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_key_too_long() {
        let req = GetOrSetRequest {
            key: "x".repeat(MAX_KEY_LENGTH + 1),
            value: "test".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            key: "valid_key".to_string(),
            value: "test".to_string(),
            ttl_ms: Some(0),
        };
        assert!(req.validate().is_none());
    }
}
