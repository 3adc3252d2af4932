// crates/orion-daemon/tests/integration.rs
//
// End-to-end tests for the assessment service: registry construction,
// measurement through the JSON-RPC dispatcher, and proof chain auditing.
//
// The daemon is a binary crate with no lib.rs, so these tests wire the
// library crates together the same way main does.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};

use orion_consensus::{Aggregator, AggregatorConfig, ChainMode, ProofChain, UnknownTheoryPolicy};
use orion_core::{crypto, AssessmentBundle, MeasurementResponse};
use orion_rpc::{JsonRpcRequest, JsonRpcResponse, OrionRpcServer, RpcConfig};
use orion_theories::{ScoringStrategy, TheoryRegistry};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Harness {
    server: OrionRpcServer,
    chain: Arc<ProofChain>,
}

fn harness(strategy: ScoringStrategy, policy: UnknownTheoryPolicy, mode: ChainMode) -> Harness {
    let chain = Arc::new(ProofChain::new(mode));
    let aggregator = Aggregator::new(TheoryRegistry::with_defaults(strategy), chain.clone())
        .with_config(AggregatorConfig {
            unknown_theories: policy,
        });
    let server = OrionRpcServer::new(RpcConfig::default(), Arc::new(aggregator))
        .with_scoring_strategy(strategy)
        .with_start_time(Instant::now());
    Harness { server, chain }
}

async fn call(server: &OrionRpcServer, method: &str, params: Value) -> JsonRpcResponse {
    server
        .handle(JsonRpcRequest {
            method: method.to_string(),
            params,
        })
        .await
}

async fn measure(server: &OrionRpcServer, params: Value) -> MeasurementResponse {
    let resp = call(server, "measure", params).await;
    assert!(resp.success, "measure failed: {:?}", resp.error);
    serde_json::from_value(resp.result.unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_full_measurement_flow() {
    let h = harness(ScoringStrategy::Sampling, UnknownTheoryPolicy::Lenient, ChainMode::Log);

    let resp = measure(&h.server, json!({ "nodes": 8 })).await;

    let keys: Vec<&str> = resp.theories.keys().collect();
    assert_eq!(keys, vec!["iit", "gwt", "hot", "ast", "rpt", "fep"]);
    assert_eq!(resp.consensus, resp.theories.consensus_count());
    assert!(resp.consensus <= 6);

    let level = resp.consensus.min(4);
    assert_eq!(resp.classification, format!("C-{}", level));

    // The proof refers to the digest the chain recorded for this bundle.
    let digest = resp.theories.content_digest().unwrap();
    assert_eq!(h.chain.digests(), vec![digest.clone()]);
    assert_eq!(resp.proof, crypto::proof_reference(&digest));
}

#[tokio::test]
async fn test_results_fall_in_documented_ranges() {
    let h = harness(ScoringStrategy::Sampling, UnknownTheoryPolicy::Lenient, ChainMode::Log);

    for _ in 0..25 {
        let resp = measure(&h.server, json!({})).await;
        let iit = resp.theories.get("iit").unwrap();
        assert_eq!(iit.name, "IIT");
        assert!((0.5..3.5).contains(&iit.score));
        assert_eq!(iit.conscious, iit.score > 1.0);

        let hot = resp.theories.get("hot").unwrap();
        assert!((1.0..=5.0).contains(&hot.score));
        assert_eq!(hot.conscious, hot.score >= 3.0);

        let fep = resp.theories.get("fep").unwrap();
        assert!((0.05..0.5).contains(&fep.score));
        assert_eq!(fep.conscious, fep.score < 0.25);
    }
    assert_eq!(h.chain.len(), 25);
}

#[tokio::test]
async fn test_deterministic_strategy_repeats_bundles() {
    let h = harness(
        ScoringStrategy::Deterministic,
        UnknownTheoryPolicy::Lenient,
        ChainMode::Log,
    );

    let params = json!({ "nodes": 12, "state": [0.1, 0.4, 0.9] });
    let first = measure(&h.server, params.clone()).await;
    let second = measure(&h.server, params).await;
    assert_eq!(first.theories, second.theories);
    assert_eq!(first.proof, second.proof);

    // Both assessments are recorded even when identical.
    assert_eq!(h.chain.len(), 2);
    assert_eq!(first.sequence, 0);
    assert_eq!(second.sequence, 1);

    let other = measure(&h.server, json!({ "nodes": 13, "state": [0.1, 0.4, 0.9] })).await;
    assert_ne!(other.theories, first.theories);
}

#[tokio::test]
async fn test_filter_and_unknown_theories() {
    let lenient = harness(ScoringStrategy::Sampling, UnknownTheoryPolicy::Lenient, ChainMode::Log);
    let resp = measure(&lenient.server, json!({ "theories": ["gwt", "unknown_x"] })).await;
    let keys: Vec<&str> = resp.theories.keys().collect();
    assert_eq!(keys, vec!["gwt"]);

    let strict = harness(ScoringStrategy::Sampling, UnknownTheoryPolicy::Strict, ChainMode::Log);
    let err = call(&strict.server, "measure", json!({ "theories": ["gwt", "unknown_x"] })).await;
    assert!(!err.success);
    assert!(err.error.unwrap().contains("unknown_x"));
    assert!(strict.chain.is_empty());
}

#[tokio::test]
async fn test_empty_filter_records_empty_assessment() {
    let h = harness(ScoringStrategy::Sampling, UnknownTheoryPolicy::Lenient, ChainMode::Log);
    let resp = measure(&h.server, json!({ "theories": [] })).await;

    assert!(resp.theories.is_empty());
    assert_eq!(resp.consensus, 0);
    assert_eq!(resp.classification, "C-0");
    assert_eq!(resp.label, "Mechanical");

    let empty_digest = AssessmentBundle::default().content_digest().unwrap();
    assert_eq!(h.chain.digests(), vec![empty_digest]);
}

#[tokio::test]
async fn test_invalid_node_count_is_rejected() {
    let h = harness(ScoringStrategy::Sampling, UnknownTheoryPolicy::Lenient, ChainMode::Log);
    let resp = call(&h.server, "measure", json!({ "nodes": 0 })).await;
    assert!(!resp.success);
    assert!(h.chain.is_empty());
}

#[tokio::test]
async fn test_linked_chain_audit_via_rpc() {
    let h = harness(ScoringStrategy::Sampling, UnknownTheoryPolicy::Lenient, ChainMode::Linked);

    let mut proofs = Vec::new();
    for _ in 0..5 {
        proofs.push(measure(&h.server, json!({})).await.proof);
    }

    let listed = call(&h.server, "proofs/list", json!({})).await.result.unwrap();
    assert_eq!(listed["total"], 5);
    let entries = listed["proofs"].as_array().unwrap();
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry["sequence"], i as u64);
        let digest = entry["digest"].as_str().unwrap();
        assert_eq!(proofs[i], crypto::proof_reference(digest));
        assert!(entry["link"].is_string());
    }

    let verify = call(&h.server, "proofs/verify", json!({})).await.result.unwrap();
    assert_eq!(verify["valid"], true);
    assert_eq!(verify["length"], 5);
    assert_eq!(verify["mode"], "linked");

    // A restored history keeps its verification status.
    let restored = ProofChain::from_entries(ChainMode::Linked, h.chain.list()).unwrap();
    assert!(restored.verify());
    assert_eq!(restored.digests(), h.chain.digests());
}

#[tokio::test]
async fn test_concurrent_requests_share_one_chain() {
    let h = harness(ScoringStrategy::Sampling, UnknownTheoryPolicy::Lenient, ChainMode::Linked);
    let server = Arc::new(h.server);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let server = server.clone();
        handles.push(tokio::spawn(async move {
            let mut sequences = Vec::new();
            for _ in 0..10 {
                sequences.push(measure(&server, json!({})).await.sequence);
            }
            sequences
        }));
    }

    let mut sequences = Vec::new();
    for handle in handles {
        sequences.extend(handle.await.unwrap());
    }
    sequences.sort_unstable();
    assert_eq!(sequences, (0..160).collect::<Vec<u64>>());
    assert_eq!(h.chain.len(), 160);
    assert!(h.chain.verify());
}

#[tokio::test]
async fn test_status_endpoints() {
    let h = harness(
        ScoringStrategy::Deterministic,
        UnknownTheoryPolicy::Strict,
        ChainMode::Log,
    );
    measure(&h.server, json!({})).await;

    let health = call(&h.server, "node/health", Value::Null).await.result.unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["theories"], 6);
    assert_eq!(health["proofs"], 1);

    let info = call(&h.server, "node/info", json!({})).await.result.unwrap();
    assert_eq!(info["scoring_strategy"], "deterministic");
    assert_eq!(info["unknown_theories"], "strict");
    assert_eq!(info["chain_mode"], "log");

    let theories = call(&h.server, "theories/list", json!({})).await.result.unwrap();
    assert_eq!(theories["theories"], json!(["iit", "gwt", "hot", "ast", "rpt", "fep"]));
}
