// crates/orion-theories/src/evaluators/mod.rs
//
// Built-in theory evaluators.
//
// Each evaluator draws one raw quantity through its ScoringStrategy, applies
// its own threshold rule, and reports the intermediate quantities as details.
// The pure `assess` function on each type maps a raw quantity to a result so
// threshold rules can be checked without going through an RNG.

pub mod ast;
pub mod fep;
pub mod gwt;
pub mod hot;
pub mod iit;
pub mod rpt;

use std::sync::Arc;

use orion_core::TheoryEvaluator;

use crate::strategy::ScoringStrategy;

pub use ast::AttentionSchema;
pub use fep::FreeEnergy;
pub use gwt::GlobalWorkspace;
pub use hot::HigherOrderThought;
pub use iit::IntegratedInformation;
pub use rpt::RecurrentProcessing;

/// Keys of the built-in evaluators, in canonical registration order.
pub const BUILTIN_KEYS: [&str; 6] = [
    iit::KEY,
    gwt::KEY,
    hot::KEY,
    ast::KEY,
    rpt::KEY,
    fep::KEY,
];

/// Construct a built-in evaluator by key.
pub fn builtin(key: &str, strategy: ScoringStrategy) -> Option<Arc<dyn TheoryEvaluator>> {
    let evaluator: Arc<dyn TheoryEvaluator> = match key {
        iit::KEY => Arc::new(IntegratedInformation::new(strategy)),
        gwt::KEY => Arc::new(GlobalWorkspace::new(strategy)),
        hot::KEY => Arc::new(HigherOrderThought::new(strategy)),
        ast::KEY => Arc::new(AttentionSchema::new(strategy)),
        rpt::KEY => Arc::new(RecurrentProcessing::new(strategy)),
        fep::KEY => Arc::new(FreeEnergy::new(strategy)),
        _ => return None,
    };
    Some(evaluator)
}
