// crates/orion-daemon/src/main.rs
//
// Binary entrypoint for the ORION assessment service.
//
// Loads configuration, initializes tracing, builds the theory registry,
// proof chain and aggregator, then serves JSON-RPC until Ctrl-C.

mod config;
mod state;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use config::DaemonConfig;
use state::{ServiceState, ServiceStateMachine};

use orion_consensus::{Aggregator, ChainMode, ProofChain, UnknownTheoryPolicy};
use orion_rpc::{OrionRpcServer, RpcConfig};
use orion_theories::ScoringStrategy;

/// ORION daemon: serves consciousness assessments over JSON-RPC.
#[derive(Parser, Debug)]
#[command(name = "orion-daemon", version, about = "ORION assessment service")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.orion/config.toml")]
    config: String,

    /// Scoring strategy: sampling or deterministic. Overrides the config file.
    #[arg(long)]
    strategy: Option<ScoringStrategy>,

    /// Reject theory filters that name unregistered theories.
    #[arg(long)]
    strict: bool,

    /// Record proofs as a hash-linked chain.
    #[arg(long)]
    linked_chain: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Config is read before tracing starts so its log_level can seed the filter.
    let (mut daemon_config, load_error) = match DaemonConfig::load(&args.config) {
        Ok(cfg) => (cfg, None),
        Err(e) => (DaemonConfig::default(), Some(e.to_string())),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&daemon_config.log_level)),
        )
        .init();

    match load_error {
        None => tracing::info!("Loaded configuration from {}", args.config),
        Some(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            args.config,
            e
        ),
    }

    // CLI flags override the config file.
    if let Some(strategy) = args.strategy {
        daemon_config.scoring_strategy = strategy;
    }
    if args.strict {
        daemon_config.unknown_theories = UnknownTheoryPolicy::Strict;
    }
    if args.linked_chain {
        daemon_config.chain_mode = ChainMode::Linked;
    }

    let mut state_machine = ServiceStateMachine::new();
    let start_time = Instant::now();

    tracing::info!("ORION daemon v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "RPC endpoint: {}:{}",
        daemon_config.rpc_host,
        daemon_config.rpc_port
    );
    tracing::info!(
        "Scoring: {}, unknown theories: {}, proof chain: {}",
        daemon_config.scoring_strategy,
        daemon_config.unknown_theories,
        daemon_config.chain_mode
    );

    let registry = daemon_config.registry()?;
    tracing::info!("Registered theories: {}", registry.list().join(", "));

    let proof_chain = Arc::new(ProofChain::new(daemon_config.chain_mode));
    let aggregator = Arc::new(
        Aggregator::new(registry, proof_chain.clone())
            .with_config(daemon_config.aggregator_config()),
    );

    let rpc_config = RpcConfig {
        host: daemon_config.rpc_host.clone(),
        port: daemon_config.rpc_port,
    };
    let rpc_server = OrionRpcServer::new(rpc_config, aggregator)
        .with_scoring_strategy(daemon_config.scoring_strategy)
        .with_start_time(start_time);

    state_machine.transition(ServiceState::Ready)?;

    let served = rpc_server
        .start_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl-C, shutting down");
        })
        .await;

    let _ = state_machine.transition(ServiceState::ShuttingDown);
    if let Err(e) = served {
        tracing::error!("RPC server error: {}", e);
    }

    tracing::info!(
        "ORION daemon shut down: {} proofs recorded (chain valid: {})",
        proof_chain.len(),
        proof_chain.verify()
    );

    Ok(())
}

