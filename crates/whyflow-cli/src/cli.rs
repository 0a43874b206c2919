use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use whyflow_core::app::{
    competitor_selection_execution, parse_execution_document, step_detail, step_summaries,
    workflow_graph,
};

use crate::config::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "whyflow", version, about = "Inspect and serve decision executions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the demo competitor-selection execution as JSON
    Demo {
        /// Single-line output instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// Load an execution document and print its steps
    Inspect(InspectArgs),

    /// Serve the competitor-selection API over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Path to a JSON document, or `-` for stdin
    pub path: PathBuf,

    /// Print the node/edge graph instead of the step list
    #[arg(long, conflicts_with = "step")]
    pub graph: bool,

    /// Print the detail of one step (1-based)
    #[arg(long)]
    pub step: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "WHYFLOW_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "WHYFLOW_PORT", default_value_t = 3000)]
    pub port: u16,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
        }
    }
}

pub fn render_demo(compact: bool) -> Result<String> {
    let execution = competitor_selection_execution();
    let text = if compact {
        serde_json::to_string(&execution)?
    } else {
        serde_json::to_string_pretty(&execution)?
    };
    Ok(text)
}

pub fn read_document(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// ドキュメントを要求されたビューで描画
pub fn render_inspect(text: &str, args: &InspectArgs) -> Result<String> {
    let accepted = parse_execution_document(text).context("document rejected")?;
    for field in &accepted.defaulted_fields {
        tracing::warn!(field = *field, "document header field missing; using an empty value");
    }
    let execution = &accepted.execution;

    if args.graph {
        return Ok(serde_json::to_string_pretty(&workflow_graph(execution))?);
    }

    if let Some(number) = args.step {
        let detail = number
            .checked_sub(1)
            .and_then(|index| step_detail(execution, index));
        let Some(detail) = detail else {
            bail!("step {number} does not exist (document has {} steps)", execution.len());
        };
        return Ok(serde_json::to_string_pretty(&detail)?);
    }

    let mut out = format!(
        "{} ({}) at {}: {} steps\n",
        execution.name(),
        execution.execution_id(),
        execution.timestamp(),
        execution.len()
    );
    for summary in step_summaries(execution) {
        match summary.step_type {
            Some(step_type) => out.push_str(&format!("{:>3}. {} [{}]\n", summary.number, summary.name, step_type)),
            None => out.push_str(&format!("{:>3}. {}\n", summary.number, summary.name)),
        }
    }
    Ok(out)
}
