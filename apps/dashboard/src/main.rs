use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    render, stats::Stats, HttpDetectionApi, WorkflowController, WorkflowState, WorkflowStatus,
};
use shared::protocol::AttackResponse;

mod config;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "DNS traffic threat-analysis dashboard")]
struct Args {
    /// Detection service base URL; overrides dashboard.toml and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Emit machine-readable JSON instead of formatted cards.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a synthetic DNS query dataset on the detection service.
    Generate {
        #[arg(long, default_value_t = client_core::DEFAULT_QUERY_COUNT)]
        query_count: u32,
    },
    /// Run threat analysis over the ingested dataset.
    Analyze,
    /// Generate a dataset, wait for ingestion, then analyze it.
    Run {
        #[arg(long, default_value_t = client_core::DEFAULT_QUERY_COUNT)]
        query_count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let settings = config::load_settings();
    let api_url = args
        .api_url
        .map(|raw| config::normalize_api_url(&raw))
        .unwrap_or(settings.api_url);

    let controller = WorkflowController::new(Arc::new(HttpDetectionApi::new(api_url)));
    match args.command {
        Command::Generate { query_count } => {
            controller.generate(query_count).await;
        }
        Command::Analyze => {
            controller.analyze().await;
        }
        Command::Run { query_count } => {
            controller.generate_and_analyze(query_count).await;
        }
    }

    let state = controller.state().await;
    let stats = controller.stats().await;
    if args.json {
        let report = serde_json::json!({
            "status": state.status.as_str(),
            "message": state.message,
            "stats": stats,
            "results": state.results,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&state, &stats);
    }

    if state.status == WorkflowStatus::Error {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(state: &WorkflowState, stats: &Stats) {
    if let Some(message) = &state.message {
        println!("[{}] {message}", state.status.as_str());
    }

    if state.results.is_empty() {
        if state.message.is_none() {
            println!("No analysis results. Generate a dataset and run analysis.");
        }
        return;
    }

    println!();
    println!(
        "Threats: {}   Queries analyzed: {}   Critical: {}   Avg risk: {} ({})",
        stats.total_threats,
        stats.total_queries,
        stats.critical_threats,
        stats.avg_risk_score,
        render::risk_bucket(f64::from(stats.avg_risk_score)).as_str(),
    );

    for result in &state.results {
        print_attack_card(result);
    }
}

fn print_attack_card(result: &AttackResponse) {
    let attack_type = result
        .attack_type
        .as_deref()
        .map(render::format_threat_type)
        .unwrap_or_else(|| "Attack Detected".to_string());
    let severity = render::severity_class(result.severity.as_deref());

    println!();
    println!(
        "== {attack_type}  severity {}  risk {} ({}) ==",
        severity.as_str(),
        result.risk_score,
        render::risk_bucket(result.risk_score).as_str(),
    );
    match result.timestamp {
        Some(timestamp) => println!(
            "   {} queries analyzed in {}ms at {}",
            result.queries_analyzed,
            result.analysis_time_ms,
            render::format_timestamp(timestamp),
        ),
        None => println!(
            "   {} queries analyzed in {}ms",
            result.queries_analyzed, result.analysis_time_ms,
        ),
    }

    for threat in &result.threats {
        println!(
            "   - [{}] {}  risk {} ({})  source {}",
            render::threat_icon(&threat.kind),
            render::format_threat_type(&threat.kind),
            threat.risk_score,
            render::risk_bucket(threat.risk_score).as_str(),
            threat.source_ip,
        );
        for line in threat.description.lines() {
            println!("       {line}");
        }
    }

    if let Some(recommendation) = &result.recommendation {
        println!("   Recommendations:");
        for line in recommendation.lines() {
            println!("       {line}");
        }
    }
}
