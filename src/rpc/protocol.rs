/// JSON-RPC 2.0 message structures and error codes
///
/// This module defines the request/response format the API gateway uses to
/// call the progress service, plus the mapping from service errors to
/// JSON-RPC error codes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::service::ServiceError;
use crate::storage::StorageError;

/// JSON-RPC 2.0 request message
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// Unique identifier for this request
    pub id: Value,
    /// The method to call (e.g., "chapter/complete")
    pub method: String,
    /// Parameters for the method call
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response message
///
/// Contains either a successful result or an error, never both.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID that we're responding to
    pub id: Value,
    /// Successful result (if no error occurred)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information (if something went wrong)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (standard JSON-RPC codes plus application codes)
    pub code: i32,
    /// Human-readable error message
    pub message: String,
}

// JSON-RPC error codes
pub mod error_codes {
    /// Parse error - Invalid JSON was received by the server
    pub const PARSE_ERROR: i32 = -32700;
    /// Method not found - The requested method doesn't exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters - Method exists but parameters are wrong
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error - Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application-specific codes (-32000 to -32099 per the JSON-RPC spec)
    /// The referenced learner does not exist
    pub const LEARNER_NOT_FOUND: i32 = -32001;
    /// The learner is already enrolled
    pub const LEARNER_EXISTS: i32 = -32002;
    /// Input validation failed (bad chapter id, timestamp, or learner id)
    pub const INVALID_ARGUMENT: i32 = -32003;
    /// Database or storage operation failed
    pub const STORAGE_ERROR: i32 = -32004;
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

/// Map a service error to its JSON-RPC error code
pub fn service_error_code(error: &ServiceError) -> i32 {
    match error {
        ServiceError::InvalidArgument(_) => error_codes::INVALID_ARGUMENT,
        ServiceError::Storage(StorageError::LearnerNotFound { .. }) => {
            error_codes::LEARNER_NOT_FOUND
        }
        ServiceError::Storage(StorageError::LearnerExists { .. }) => error_codes::LEARNER_EXISTS,
        ServiceError::Storage(_) => error_codes::STORAGE_ERROR,
    }
}
