// crates/orion-cli/src/commands/measure.rs
//
// `orion measure`: run one assessment and print the per-theory results.

use clap::Args;
use tabled::Tabled;

use orion_core::{MeasurementRequest, MeasurementResponse, TheoryResult};

use super::Context;
use crate::output::{self, OutputFormat};
use crate::rpc_client;

/// Run a consciousness assessment on the daemon.
#[derive(Debug, Args)]
pub struct MeasureCmd {
    /// Number of nodes in the assessed system.
    #[arg(long, default_value_t = orion_core::DEFAULT_NODE_COUNT)]
    pub nodes: u32,

    /// Restrict the assessment to this theory (repeatable).
    #[arg(long = "theory")]
    pub theories: Vec<String>,

    /// System state as a JSON array, e.g. '[0.1, 0.5]'.
    #[arg(long)]
    pub state: Option<String>,
}

impl MeasureCmd {
    /// Build the request this invocation describes.
    pub fn to_request(&self) -> Result<MeasurementRequest, String> {
        let mut request = MeasurementRequest::default().with_node_count(self.nodes);
        if !self.theories.is_empty() {
            request = request.with_theories(self.theories.iter().cloned());
        }
        if let Some(raw) = &self.state {
            let state: Vec<serde_json::Value> = serde_json::from_str(raw)
                .map_err(|e| format!("--state must be a JSON array: {}", e))?;
            request = request.with_state(state);
        }
        request.validate().map_err(|e| e.to_string())?;
        Ok(request)
    }
}

/// A row in the per-theory results table.
#[derive(Tabled)]
struct TheoryRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Theory")]
    name: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Conscious")]
    conscious: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl TheoryRow {
    fn new(key: &str, result: &TheoryResult) -> Self {
        let details = result
            .details
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            key: key.to_string(),
            name: result.name.clone(),
            score: format!("{:.4}", result.score),
            conscious: if result.conscious { "yes" } else { "no" }.to_string(),
            details,
        }
    }
}

/// Run the measure command.
pub async fn run(cmd: &MeasureCmd, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let request = cmd.to_request()?;
    let response: MeasurementResponse =
        rpc_client::call(&ctx.rpc, "measure", serde_json::to_value(&request)?).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", output::format_json(&response)),
        OutputFormat::Table => print!("{}", render(&response)),
    }
    Ok(())
}

fn render(response: &MeasurementResponse) -> String {
    let rows: Vec<TheoryRow> = response
        .theories
        .iter()
        .map(|(key, result)| TheoryRow::new(key, result))
        .collect();

    let mut out = String::new();
    if rows.is_empty() {
        out.push_str("No theories evaluated.\n");
    } else {
        out.push_str(&output::format_table(&rows));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!(
        "Classification: {} ({})\n",
        response.classification, response.label
    ));
    out.push_str(&format!(
        "Consensus:      {}/{}\n",
        response.consensus,
        response.theories.len()
    ));
    out.push_str(&format!("Proof:          {}\n", response.proof));
    out.push_str(&format!("Sequence:       {}\n", response.sequence));
    out.push_str(&format!("Timestamp:      {}\n", response.timestamp.to_rfc3339()));
    out
}
