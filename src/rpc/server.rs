/// JSON-RPC request loop
///
/// Reads one request per line from stdin, dispatches it to the service
/// layer, and writes one response per line to stdout. Requests are handled
/// strictly in order, which is what gives a single learner's updates their
/// ordering guarantee - there is never a second in-flight write to the same
/// record.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::rpc::protocol::{error_codes, service_error_code, JsonRpcRequest, JsonRpcResponse};
use crate::service;
use crate::storage::LearnerStorage;
use crate::ServerError;

/// JSON-RPC server over stdin/stdout
pub struct RpcServer<S: LearnerStorage> {
    storage: S,
}

impl<S: LearnerStorage> RpcServer<S> {
    /// Create a new RPC server over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Run the request loop until stdin closes
    pub async fn run(&self) -> Result<(), ServerError> {
        info!("Progress service ready, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("Progress service shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        Some(self.handle_request(request))
    }

    /// Handle one JSON-RPC request
    pub fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params = request.params.unwrap_or(Value::Null);

        match self.call_method(&request.method, params) {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err((code, message)) => JsonRpcResponse::error(request.id, code, message),
        }
    }

    /// Dispatch a method call to the service layer
    fn call_method(&self, method: &str, params: Value) -> Result<Value, (i32, String)> {
        match method {
            "learner/enroll" => {
                let params = parse_params(params)?;
                to_result(service::enroll_learner(&self.storage, params))
            }
            "chapter/complete" => {
                let params = parse_params(params)?;
                to_result(service::complete_chapter(&self.storage, params))
            }
            "activity/record" => {
                let params = parse_params(params)?;
                to_result(service::record_activity(&self.storage, params))
            }
            "progress/status" => {
                let params = parse_params(params)?;
                to_result(service::get_status(&self.storage, params))
            }
            "admin/reset_progress" => {
                let params = parse_params(params)?;
                to_result(service::reset_progress(&self.storage, params))
            }
            "admin/reset_streak" => {
                let params = parse_params(params)?;
                to_result(service::reset_streak(&self.storage, params))
            }
            "admin/complete_up_to" => {
                let params = parse_params(params)?;
                to_result(service::complete_up_to(&self.storage, params))
            }
            "admin/withdraw" => {
                let params = parse_params(params)?;
                service::withdraw_learner(&self.storage, params)
                    .map_err(|e| (service_error_code(&e), e.to_string()))?;
                Ok(json!({ "success": true }))
            }
            _ => Err((
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", method),
            )),
        }
    }
}

/// Deserialize method parameters, mapping failures to INVALID_PARAMS
fn parse_params<P: serde::de::DeserializeOwned>(params: Value) -> Result<P, (i32, String)> {
    serde_json::from_value(params)
        .map_err(|e| (error_codes::INVALID_PARAMS, format!("Invalid params: {}", e)))
}

/// Serialize a service result, mapping service errors to their codes
fn to_result<R: serde::Serialize>(
    result: Result<R, service::ServiceError>,
) -> Result<Value, (i32, String)> {
    let response = result.map_err(|e| (service_error_code(&e), e.to_string()))?;
    serde_json::to_value(response)
        .map_err(|e| (error_codes::INTERNAL_ERROR, format!("Serialization failed: {}", e)))
}
