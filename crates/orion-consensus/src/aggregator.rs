// crates/orion-consensus/src/aggregator.rs
//
// The aggregation engine: runs the selected theories, tallies consensus,
// classifies, and records a proof for every completed assessment.
//
// Steps of `measure`:
// 1. Validate the request
// 2. Resolve the working set (registry order, filtered)
// 3. Evaluate every theory; any failure aborts before step 5
// 4. Hash the canonical bundle (no lock held)
// 5. Append the digest to the proof chain (the only shared mutation)
// 6. Assemble the response

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use orion_core::{
    AssessmentBundle, MeasurementRequest, MeasurementResponse, OrionError, TheoryEvaluator,
};
use orion_theories::TheoryRegistry;

use crate::proof_chain::ProofChain;

/// What to do when a request names a theory that is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTheoryPolicy {
    /// Silently leave the name out of the bundle.
    #[default]
    Lenient,
    /// Fail the call with `UnknownTheoryRequested`.
    Strict,
}

impl fmt::Display for UnknownTheoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownTheoryPolicy::Lenient => write!(f, "lenient"),
            UnknownTheoryPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for UnknownTheoryPolicy {
    type Err = OrionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(UnknownTheoryPolicy::Lenient),
            "strict" => Ok(UnknownTheoryPolicy::Strict),
            other => Err(OrionError::Config(format!(
                "unknown theory policy '{}': use 'lenient' or 'strict'",
                other
            ))),
        }
    }
}

/// Tunables for the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub unknown_theories: UnknownTheoryPolicy,
}

/// Orchestrates one assessment across the registered theories.
///
/// Owns the registry; holds the proof chain it was constructed with for its
/// whole lifetime. Safe to share behind an `Arc` across request tasks.
#[derive(Debug)]
pub struct Aggregator {
    registry: TheoryRegistry,
    proof_chain: Arc<ProofChain>,
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create an aggregator over `registry` that records into `proof_chain`.
    pub fn new(registry: TheoryRegistry, proof_chain: Arc<ProofChain>) -> Self {
        Self {
            registry,
            proof_chain,
            config: AggregatorConfig::default(),
        }
    }

    /// Override the default configuration.
    pub fn with_config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> AggregatorConfig {
        self.config
    }

    pub fn registry(&self) -> &TheoryRegistry {
        &self.registry
    }

    pub fn proof_chain(&self) -> &Arc<ProofChain> {
        &self.proof_chain
    }

    /// Run a full assessment.
    ///
    /// On error nothing is recorded: the proof chain is only touched after
    /// every evaluator has succeeded and the bundle has been hashed.
    pub fn measure(&self, request: &MeasurementRequest) -> Result<MeasurementResponse, OrionError> {
        request.validate()?;

        let working = self.registry.working_set(request.theory_filter.as_ref());
        if !working.unresolved.is_empty() {
            match self.config.unknown_theories {
                UnknownTheoryPolicy::Strict => {
                    return Err(OrionError::UnknownTheoryRequested(working.unresolved.join(", ")));
                }
                UnknownTheoryPolicy::Lenient => {
                    tracing::debug!(
                        "Ignoring unregistered theories: {}",
                        working.unresolved.join(", ")
                    );
                }
            }
        }

        let bundle = evaluate_all(&working.evaluators, request)?;
        let digest = bundle.content_digest()?;
        let sequence = self.proof_chain.append(digest.clone())?;
        let response = MeasurementResponse::assemble(bundle, &digest, sequence);

        tracing::info!(
            "Assessment #{}: {} {} (consensus {}/{}, {})",
            sequence,
            response.classification,
            response.label,
            response.consensus,
            response.theories.len(),
            response.proof
        );

        Ok(response)
    }

    /// Registered theory keys, in registry order.
    pub fn list_theories(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Full hex digests of every recorded assessment, in completion order.
    pub fn list_proofs(&self) -> Vec<String> {
        self.proof_chain.digests()
    }
}

/// Evaluate each theory in order, failing fast with the theory's name.
fn evaluate_all(
    evaluators: &[Arc<dyn TheoryEvaluator>],
    request: &MeasurementRequest,
) -> Result<AssessmentBundle, OrionError> {
    let mut bundle = AssessmentBundle::new();
    for evaluator in evaluators {
        let result = evaluator.evaluate(request).map_err(|e| match e {
            OrionError::EvaluatorFailure { .. } => e,
            other => OrionError::evaluator(evaluator.key(), other.to_string()),
        })?;

        // serde_json writes NaN and infinities as null, which would let
        // distinct results share a digest.
        if let Some(field) = result.non_finite_field() {
            tracing::warn!("Theory {} produced non-finite {}", evaluator.key(), field);
            return Err(OrionError::evaluator(
                evaluator.key(),
                format!("non-finite value in '{}'", field),
            ));
        }

        bundle.insert(evaluator.key(), result);
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof_chain::ChainMode;
    use orion_core::{Classification, TheoryResult};
    use orion_theories::ScoringStrategy;

    /// Evaluator with a fixed verdict.
    struct Fixed {
        key: String,
        conscious: bool,
    }

    impl TheoryEvaluator for Fixed {
        fn key(&self) -> &str {
            &self.key
        }

        fn label(&self) -> &str {
            &self.key
        }

        fn evaluate(&self, _request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
            let score = if self.conscious { 1.0 } else { 0.0 };
            Ok(TheoryResult::new(self.key.to_ascii_uppercase(), score, self.conscious))
        }
    }

    /// Evaluator that always fails.
    struct Broken;

    impl TheoryEvaluator for Broken {
        fn key(&self) -> &str {
            "broken"
        }

        fn label(&self) -> &str {
            "BROKEN"
        }

        fn evaluate(&self, _request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
            Err(OrionError::Serialization("sensor offline".to_string()))
        }
    }

    /// Evaluator that reports a NaN score.
    struct NotANumber;

    impl TheoryEvaluator for NotANumber {
        fn key(&self) -> &str {
            "nan"
        }

        fn label(&self) -> &str {
            "NAN"
        }

        fn evaluate(&self, _request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
            Ok(TheoryResult::new("NAN", f64::NAN, false))
        }
    }

    /// Finite score, but a detail carrying `value`.
    struct BadDetail {
        value: f64,
    }

    impl TheoryEvaluator for BadDetail {
        fn key(&self) -> &str {
            "detail"
        }

        fn label(&self) -> &str {
            "DETAIL"
        }

        fn evaluate(&self, _request: &MeasurementRequest) -> Result<TheoryResult, OrionError> {
            Ok(TheoryResult::new("DETAIL", 1.0, true).with_detail("x", self.value))
        }
    }

    fn default_aggregator(strategy: ScoringStrategy) -> Aggregator {
        Aggregator::new(
            TheoryRegistry::with_defaults(strategy),
            Arc::new(ProofChain::new(ChainMode::Log)),
        )
    }

    fn fixed_aggregator(verdicts: &[bool]) -> Aggregator {
        let mut registry = TheoryRegistry::new();
        for (i, &conscious) in verdicts.iter().enumerate() {
            registry
                .register(Arc::new(Fixed {
                    key: format!("t{}", i),
                    conscious,
                }))
                .unwrap();
        }
        Aggregator::new(registry, Arc::new(ProofChain::new(ChainMode::Log)))
    }

    #[test]
    fn test_full_default_assessment() {
        let agg = default_aggregator(ScoringStrategy::Sampling);
        let resp = agg.measure(&MeasurementRequest::default()).unwrap();

        assert_eq!(
            resp.theories.keys().collect::<Vec<_>>(),
            vec!["iit", "gwt", "hot", "ast", "rpt", "fep"]
        );
        assert!(resp.consensus <= 6);
        let expected = Classification::from_consensus(resp.consensus);
        assert_eq!(resp.classification, expected.code());
        assert_eq!(resp.label, expected.label());
        assert_eq!(resp.sequence, 0);
    }

    #[test]
    fn test_proof_reference_matches_chain() {
        let agg = default_aggregator(ScoringStrategy::Sampling);
        let resp = agg.measure(&MeasurementRequest::default()).unwrap();

        let proofs = agg.list_proofs();
        assert_eq!(proofs.len(), 1);
        assert_eq!(resp.proof, format!("sha256:{}", &proofs[0][..16]));
        assert_eq!(proofs[0], resp.theories.content_digest().unwrap());
    }

    #[test]
    fn test_single_theory_filter() {
        let agg = default_aggregator(ScoringStrategy::Sampling);
        let resp = agg
            .measure(&MeasurementRequest::default().with_theories(["iit"]))
            .unwrap();
        assert_eq!(resp.theories.len(), 1);
        assert!(resp.theories.get("iit").is_some());
    }

    #[test]
    fn test_unknown_filter_is_lenient_by_default() {
        let agg = default_aggregator(ScoringStrategy::Sampling);
        let resp = agg
            .measure(&MeasurementRequest::default().with_theories(["bogus"]))
            .unwrap();
        assert!(resp.theories.is_empty());
        assert_eq!(resp.consensus, 0);
        assert_eq!(resp.classification, "C-0");
        assert_eq!(resp.label, "Mechanical");
        // Empty assessments are still recorded.
        assert_eq!(agg.list_proofs().len(), 1);
    }

    #[test]
    fn test_unknown_filter_fails_in_strict_mode() {
        let agg = default_aggregator(ScoringStrategy::Sampling).with_config(AggregatorConfig {
            unknown_theories: UnknownTheoryPolicy::Strict,
        });
        let err = agg
            .measure(&MeasurementRequest::default().with_theories(["iit", "bogus"]))
            .unwrap_err();
        assert!(matches!(err, OrionError::UnknownTheoryRequested(ref name) if name == "bogus"));
        assert!(agg.list_proofs().is_empty());
    }

    #[test]
    fn test_invalid_request_rejected_before_evaluation() {
        let agg = default_aggregator(ScoringStrategy::Sampling);
        let err = agg
            .measure(&MeasurementRequest::default().with_node_count(0))
            .unwrap_err();
        assert!(matches!(err, OrionError::InvalidRequest(_)));
        assert!(agg.list_proofs().is_empty());
    }

    #[test]
    fn test_consensus_drives_classification() {
        let cases: [(&[bool], &str); 6] = [
            (&[], "C-0"),
            (&[false, false], "C-0"),
            (&[true, false], "C-1"),
            (&[true, true, false], "C-2"),
            (&[true, true, true, false], "C-3"),
            (&[true, true, true, true, true, true], "C-4"),
        ];
        for (verdicts, code) in cases {
            let resp = fixed_aggregator(verdicts)
                .measure(&MeasurementRequest::default())
                .unwrap();
            assert_eq!(resp.consensus, verdicts.iter().filter(|v| **v).count());
            assert_eq!(resp.classification, code);
        }
    }

    #[test]
    fn test_evaluator_failure_aborts_without_proof() {
        let mut registry = TheoryRegistry::with_defaults(ScoringStrategy::Sampling);
        registry.register(Arc::new(Broken)).unwrap();
        let agg = Aggregator::new(registry, Arc::new(ProofChain::new(ChainMode::Log)));

        agg.measure(&MeasurementRequest::default().with_theories(["iit"]))
            .unwrap();
        assert_eq!(agg.list_proofs().len(), 1);

        let err = agg.measure(&MeasurementRequest::default()).unwrap_err();
        match err {
            OrionError::EvaluatorFailure { theory, reason } => {
                assert_eq!(theory, "broken");
                assert!(reason.contains("sensor offline"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(agg.list_proofs().len(), 1);
    }

    #[test]
    fn test_non_finite_score_is_a_failure() {
        let mut registry = TheoryRegistry::new();
        registry.register(Arc::new(NotANumber)).unwrap();
        let agg = Aggregator::new(registry, Arc::new(ProofChain::new(ChainMode::Log)));
        assert!(matches!(
            agg.measure(&MeasurementRequest::default()),
            Err(OrionError::EvaluatorFailure { .. })
        ));
        assert!(agg.list_proofs().is_empty());
    }

    #[test]
    fn test_non_finite_detail_is_a_failure() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut registry = TheoryRegistry::new();
            registry.register(Arc::new(BadDetail { value })).unwrap();
            let agg = Aggregator::new(registry, Arc::new(ProofChain::new(ChainMode::Log)));

            match agg.measure(&MeasurementRequest::default()) {
                Err(OrionError::EvaluatorFailure { theory, reason }) => {
                    assert_eq!(theory, "detail");
                    assert!(reason.contains("'x'"), "{}", reason);
                }
                other => panic!("expected evaluator failure for {}, got {:?}", value, other),
            }
            assert!(agg.list_proofs().is_empty());
        }
    }

    #[test]
    fn test_finite_detail_is_recorded() {
        let mut registry = TheoryRegistry::new();
        registry.register(Arc::new(BadDetail { value: 0.5 })).unwrap();
        let agg = Aggregator::new(registry, Arc::new(ProofChain::new(ChainMode::Log)));
        agg.measure(&MeasurementRequest::default()).unwrap();
        assert_eq!(agg.list_proofs().len(), 1);
    }

    #[test]
    fn test_deterministic_strategy_repeats_digest() {
        let agg = default_aggregator(ScoringStrategy::Deterministic);
        let req = MeasurementRequest::default().with_state(vec![serde_json::json!([1, 0, 1, 1])]);
        let a = agg.measure(&req).unwrap();
        let b = agg.measure(&req).unwrap();
        assert_eq!(a.theories, b.theories);
        assert_eq!(a.proof, b.proof);
        assert_eq!((a.sequence, b.sequence), (0, 1));

        let other = agg.measure(&req.clone().with_node_count(16)).unwrap();
        assert_ne!(other.theories, a.theories);
    }

    #[test]
    fn test_verdicts_match_threshold_rules() {
        let agg = default_aggregator(ScoringStrategy::Sampling);
        for _ in 0..50 {
            let resp = agg.measure(&MeasurementRequest::default()).unwrap();
            for (key, result) in resp.theories.iter() {
                let expected = match key {
                    "iit" => result.score > 1.0,
                    "gwt" => result.score > 0.7,
                    "hot" => result.score >= 3.0,
                    "ast" => result.score > 0.7,
                    "rpt" => result.score > 8.0,
                    "fep" => result.score < 0.25,
                    other => panic!("unexpected theory {}", other),
                };
                assert_eq!(result.conscious, expected, "theory {}", key);
            }
        }
        assert_eq!(agg.list_proofs().len(), 50);
    }

    #[test]
    fn test_concurrent_measurements() {
        let agg = Arc::new(default_aggregator(ScoringStrategy::Sampling));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let agg = agg.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| agg.measure(&MeasurementRequest::default()).unwrap().sequence)
                        .collect::<Vec<u64>>()
                })
            })
            .collect();

        let mut sequences: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        sequences.sort_unstable();
        assert_eq!(sequences, (0..200).collect::<Vec<u64>>());
        assert!(agg.proof_chain().verify());
    }
}
