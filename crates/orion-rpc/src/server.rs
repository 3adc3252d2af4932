// crates/orion-rpc/src/server.rs
//
// RPC server setup: OrionRpcServer and RpcConfig.
//
// A single tonic service accepts JSON-encoded requests with a method field,
// dispatches to the matching handler, and returns JSON-encoded responses.
// No proto codegen is involved; tonic supplies transport and interceptors.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use tonic::transport::Server;
use tonic::Status;

use orion_consensus::Aggregator;
use orion_theories::ScoringStrategy;

use crate::handlers;
use crate::middleware;

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the RPC server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50061,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-RPC Envelope
// ---------------------------------------------------------------------------

/// A JSON-RPC-style request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The RPC method to invoke (e.g., "measure", "proofs/list").
    pub method: String,
    /// JSON-encoded parameters for the method. Absent or null means `{}`.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A JSON-RPC-style response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// The result data (if success).
    pub result: Option<serde_json::Value>,
    /// Error message (if not success).
    pub error: Option<String>,
}

impl JsonRpcResponse {
    fn failure(error: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

// ---------------------------------------------------------------------------
// OrionRpcServer
// ---------------------------------------------------------------------------

/// The RPC server for the assessment service.
///
/// Holds the shared aggregator; every connection dispatches into the same
/// registry and proof chain.
#[derive(Debug, Clone)]
pub struct OrionRpcServer {
    config: RpcConfig,
    aggregator: Arc<Aggregator>,
    scoring_strategy: ScoringStrategy,
    start_time: Option<Instant>,
}

impl OrionRpcServer {
    pub fn new(config: RpcConfig, aggregator: Arc<Aggregator>) -> Self {
        Self {
            config,
            aggregator,
            scoring_strategy: ScoringStrategy::default(),
            start_time: None,
        }
    }

    /// Record the scoring strategy the registry was built with, for node/info.
    pub fn with_scoring_strategy(mut self, strategy: ScoringStrategy) -> Self {
        self.scoring_strategy = strategy;
        self
    }

    /// Set the daemon start time for uptime calculation.
    pub fn with_start_time(mut self, st: Instant) -> Self {
        self.start_time = Some(st);
        self
    }

    /// Dispatch a request in-process, bypassing the transport.
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        self.service().dispatch(request).await
    }

    fn service(&self) -> OrionServiceImpl {
        OrionServiceImpl {
            aggregator: self.aggregator.clone(),
            scoring_strategy: self.scoring_strategy,
            start_time: self.start_time,
        }
    }

    /// Start the RPC server and serve until the process is terminated.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Start the RPC server and serve until `signal` resolves.
    pub async fn start_with_shutdown<F>(&self, signal: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()>,
    {
        let addr = format!("{}:{}", self.config.host, self.config.port).parse()?;

        tracing::info!("ORION RPC server starting on {}", addr);

        Server::builder()
            .accept_http1(true)
            .add_service(tonic::service::interceptor::InterceptedService::new(
                OrionJsonRpcServer::new(self.service()),
                middleware::logging_interceptor,
            ))
            .serve_with_shutdown(addr, signal)
            .await?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct OrionServiceImpl {
    aggregator: Arc<Aggregator>,
    scoring_strategy: ScoringStrategy,
    start_time: Option<Instant>,
}

impl OrionServiceImpl {
    /// Dispatch a JSON-RPC request to the appropriate handler based on the method name.
    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params = if request.params.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            request.params
        };
        let agg = self.aggregator.clone();

        let result = match request.method.as_str() {
            "measure" => {
                dispatch_handler(params, |r| async move {
                    handlers::measure::handle_measure(r, &agg).await
                })
                .await
            }
            "theories/list" => {
                dispatch_handler(params, |r| async move {
                    handlers::theories::handle_list_theories(r, &agg).await
                })
                .await
            }
            "proofs/list" => {
                dispatch_handler(params, |r| async move {
                    handlers::proofs::handle_list_proofs(r, &agg).await
                })
                .await
            }
            "proofs/verify" => {
                dispatch_handler(params, |r| async move {
                    handlers::proofs::handle_verify_chain(r, &agg).await
                })
                .await
            }
            "node/health" => {
                dispatch_handler(params, |r| async move {
                    handlers::node::handle_get_health(r, &agg).await
                })
                .await
            }
            "node/info" => {
                let strategy = self.scoring_strategy;
                let start_time = self.start_time;
                dispatch_handler(params, |r| async move {
                    handlers::node::handle_get_node_info(r, &agg, strategy, start_time).await
                })
                .await
            }

            _ => Err(format!("Unknown method: {}", request.method)),
        };

        match result {
            Ok(value) => JsonRpcResponse {
                success: true,
                result: Some(value),
                error: None,
            },
            Err(err) => JsonRpcResponse::failure(err),
        }
    }
}

/// Generic dispatch helper: deserialize params into a request type,
/// call the handler, and serialize the result to JSON.
async fn dispatch_handler<Req, Resp, F, Fut>(
    params: serde_json::Value,
    handler: F,
) -> Result<serde_json::Value, String>
where
    Req: serde::de::DeserializeOwned,
    Resp: serde::Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Resp, String>>,
{
    let request: Req = serde_json::from_value(params)
        .map_err(|e| format!("Failed to deserialize request: {}", e))?;
    let response = handler(request).await?;
    serde_json::to_value(response).map_err(|e| format!("Failed to serialize response: {}", e))
}

// ---------------------------------------------------------------------------
// Tonic Service Wiring
// ---------------------------------------------------------------------------

/// Low-level service: reads the body as a JSON-RPC envelope and dispatches.
#[derive(Clone)]
pub struct OrionJsonRpcServer {
    inner: OrionServiceImpl,
}

impl std::fmt::Debug for OrionJsonRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrionJsonRpcServer").finish()
    }
}

impl OrionJsonRpcServer {
    fn new(inner: OrionServiceImpl) -> Self {
        Self { inner }
    }
}

impl tonic::server::NamedService for OrionJsonRpcServer {
    const NAME: &'static str = "orion.rpc.OrionService";
}

impl<B> tower_service::Service<http::Request<B>> for OrionJsonRpcServer
where
    B: HttpBody + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
    B::Data: Send,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = std::pin::Pin<
        Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();

        Box::pin(async move {
            let body_bytes = match collect_body(req.into_body()).await {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!("Failed to read request body: {}", e);
                    let resp =
                        JsonRpcResponse::failure(format!("Failed to read request body: {}", e));
                    return Ok(build_response(serde_json::to_vec(&resp).unwrap_or_default()));
                }
            };

            let rpc_request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
                Ok(r) => r,
                Err(e) => {
                    let resp = JsonRpcResponse::failure(format!("Invalid JSON-RPC request: {}", e));
                    return Ok(build_response(serde_json::to_vec(&resp).unwrap_or_default()));
                }
            };

            let rpc_response = inner.dispatch(rpc_request).await;
            let json = serde_json::to_vec(&rpc_response).unwrap_or_default();
            Ok(build_response(json))
        })
    }
}

/// Collect the body of an HTTP request into bytes.
async fn collect_body<B>(body: B) -> Result<Vec<u8>, String>
where
    B: HttpBody + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    B::Data: Send,
{
    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    loop {
        match std::future::poll_fn(|cx| HttpBody::poll_frame(body.as_mut(), cx)).await {
            Some(Ok(frame)) => {
                if let Ok(data) = frame.into_data() {
                    use bytes::Buf;
                    collected.extend_from_slice(data.chunk());
                }
            }
            Some(Err(e)) => return Err(e.into().to_string()),
            None => break,
        }
    }

    Ok(collected)
}

/// Build an HTTP 200 response with the given JSON body.
fn build_response(json: Vec<u8>) -> http::Response<tonic::body::BoxBody> {
    let body = tonic::body::BoxBody::new(
        http_body_util::Full::new(bytes::Bytes::from(json))
            .map_err(|e| Status::internal(format!("body error: {}", e))),
    );

    let mut response = http::Response::new(body);
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use orion_consensus::{ChainMode, ProofChain};
    use orion_theories::TheoryRegistry;
    use serde_json::json;

    fn server() -> OrionRpcServer {
        let aggregator = Aggregator::new(
            TheoryRegistry::with_defaults(ScoringStrategy::Deterministic),
            Arc::new(ProofChain::new(ChainMode::Log)),
        );
        OrionRpcServer::new(RpcConfig::default(), Arc::new(aggregator))
            .with_scoring_strategy(ScoringStrategy::Deterministic)
            .with_start_time(Instant::now())
    }

    fn call(method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let resp = server().handle(call("polyp/submit", json!({}))).await;
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Unknown method: polyp/submit"));
    }

    #[tokio::test]
    async fn test_null_params_are_empty_object() {
        let resp = server().handle(call("theories/list", serde_json::Value::Null)).await;
        assert!(resp.success, "{:?}", resp.error);
        let theories = resp.result.unwrap()["theories"].as_array().unwrap().len();
        assert_eq!(theories, 6);
    }

    #[tokio::test]
    async fn test_measure_then_list() {
        let srv = server();
        let resp = srv
            .handle(call("measure", json!({ "nodes": 8, "theories": ["iit", "fep"] })))
            .await;
        assert!(resp.success, "{:?}", resp.error);
        let result = resp.result.unwrap();
        assert_eq!(result["theories"].as_object().unwrap().len(), 2);
        assert_eq!(result["sequence"], 0);

        let listed = srv.handle(call("proofs/list", json!({}))).await.result.unwrap();
        assert_eq!(listed["total"], 1);
        let digest = listed["proofs"][0]["digest"].as_str().unwrap();
        assert!(result["proof"].as_str().unwrap().ends_with(&digest[..16]));
    }

    #[tokio::test]
    async fn test_bad_params_report_deserialize_error() {
        let resp = server().handle(call("measure", json!({ "nodes": "eight" }))).await;
        assert!(!resp.success);
        assert!(resp.error.unwrap().starts_with("Failed to deserialize request"));
    }

    #[tokio::test]
    async fn test_invalid_measure_is_reported() {
        let srv = server();
        let resp = srv.handle(call("measure", json!({ "nodes": 0 }))).await;
        assert!(!resp.success);

        let health = srv.handle(call("node/health", json!({}))).await.result.unwrap();
        assert_eq!(health["proofs"], 0);
        assert_eq!(health["status"], "healthy");
    }

    #[tokio::test]
    async fn test_node_info_reports_modes() {
        let info = server().handle(call("node/info", json!({}))).await.result.unwrap();
        assert_eq!(info["scoring_strategy"], "deterministic");
        assert_eq!(info["chain_mode"], "log");
        assert_eq!(info["unknown_theories"], "lenient");
    }
}
