// crates/orion-cli/src/rpc_client.rs
//
// Lightweight JSON-RPC client that POSTs to the orion-daemon HTTP endpoint.

use serde::de::DeserializeOwned;

use orion_rpc::{JsonRpcRequest, JsonRpcResponse};

/// Send a JSON-RPC call to the daemon and return the parsed envelope.
pub async fn rpc_call(
    endpoint: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<JsonRpcResponse, Box<dyn std::error::Error>> {
    let request = JsonRpcRequest {
        method: method.to_string(),
        params,
    };

    let client = reqwest::Client::new();
    let resp = client.post(endpoint).json(&request).send().await?;

    let rpc_response: JsonRpcResponse = resp.json().await?;
    Ok(rpc_response)
}

/// Call `method` and decode its result, turning a failed envelope into an error.
pub async fn call<T: DeserializeOwned>(
    endpoint: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<T, Box<dyn std::error::Error>> {
    let response = rpc_call(endpoint, method, params).await?;
    Ok(unwrap_result(method, response)?)
}

fn unwrap_result<T: DeserializeOwned>(method: &str, response: JsonRpcResponse) -> Result<T, String> {
    if !response.success {
        return Err(format!(
            "{} failed: {}",
            method,
            response.error.unwrap_or_else(|| "unknown error".to_string())
        ));
    }
    let result = response.result.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(result).map_err(|e| format!("{}: malformed result: {}", method, e))
}
