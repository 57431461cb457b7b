// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Growth Pilot - log content performance records and derive posting
//! strategy from them.
//!
//! This is the binary entry point. It wires the SQLite record store, the
//! Gemini provider, and the strategy engine behind a small CLI.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use growthpilot_config::GrowthPilotConfig;
use growthpilot_core::types::{OwnerId, PerformanceRecord, RecordId};
use growthpilot_core::{GrowthPilotError, RecordStore};
use growthpilot_engine::{
    GatingState, GeneratorSettings, RewriteGenerator, StrategyPipeline,
};
use growthpilot_gemini::GeminiProvider;
use growthpilot_storage::SqliteRecordStore;
use tracing_subscriber::EnvFilter;

/// Growth Pilot - log content performance and derive posting strategy.
#[derive(Parser, Debug)]
#[command(name = "growthpilot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log one performance record.
    Log {
        /// Body text of the post.
        body: String,
        #[arg(long, default_value_t = 0)]
        views: u64,
        #[arg(long, default_value_t = 0)]
        likes: u64,
        #[arg(long, default_value_t = 0)]
        comments: u64,
        /// Optional URL of an attached visual.
        #[arg(long)]
        image: Option<String>,
        /// When the content was posted (RFC 3339). Defaults to now.
        #[arg(long)]
        posted_at: Option<DateTime<Utc>>,
    },
    /// List logged records, most recent first.
    Records,
    /// Show gating progress toward the content calendar.
    Status,
    /// Run the analysis pipeline and, once unlocked, the content calendar.
    Strategy,
    /// Rewrite a draft with a fresh angle.
    Rewrite {
        /// The draft text to rewrite.
        text: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match growthpilot_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            growthpilot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(command) => run_command(command, &config).await,
        None => {
            println!("growthpilot: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("growthpilot: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_command(
    command: Commands,
    config: &GrowthPilotConfig,
) -> Result<(), GrowthPilotError> {
    let owner = OwnerId(config.agent.owner.clone());

    match command {
        Commands::Log {
            body,
            views,
            likes,
            comments,
            image,
            posted_at,
        } => {
            let store = open_store(config).await?;
            let record = PerformanceRecord {
                id: RecordId(uuid::Uuid::new_v4().to_string()),
                owner,
                body,
                image_url: image,
                views,
                likes,
                comments,
                posted_at: posted_at.unwrap_or_else(Utc::now),
                created_at: 0,
            };
            let inserted = store.insert_record(&record).await?;
            println!("logged record {}", inserted.id.0);
            store.close().await
        }
        Commands::Records => {
            let store = open_store(config).await?;
            let records = store.list_by_owner(&owner).await?;
            if records.is_empty() {
                println!("no records logged yet");
            }
            for r in &records {
                let visual = if r.has_visual() { " [visual]" } else { "" };
                println!(
                    "{}  views {:>6}  likes {:>4}  comments {:>4}{}  {}",
                    r.posted_at.format("%Y-%m-%d %H:%M"),
                    r.views,
                    r.likes,
                    r.comments,
                    visual,
                    r.body
                );
            }
            store.close().await
        }
        Commands::Status => {
            let store = open_store(config).await?;
            let records = store.list_by_owner(&owner).await?;
            let gating = GatingState::from_count(records.len());
            println!(
                "{} / {} records logged ({}%)",
                gating.record_count, gating.threshold, gating.progress
            );
            if gating.locked {
                println!("content calendar locked -- keep logging to unlock it");
            } else {
                println!("content calendar unlocked");
            }
            store.close().await
        }
        Commands::Strategy => {
            let store = Arc::new(open_store(config).await?);
            let provider = Arc::new(GeminiProvider::new(&config.gemini)?);
            let pipeline =
                StrategyPipeline::new(store.clone(), provider, settings(config));

            let report = pipeline.run(&owner).await;
            print_report(&report);
            store.close().await
        }
        Commands::Rewrite { text } => {
            let provider = Arc::new(GeminiProvider::new(&config.gemini)?);
            let rewriter = RewriteGenerator::new(provider, settings(config));
            println!("{}", rewriter.rewrite(&text).await);
            Ok(())
        }
    }
}

async fn open_store(config: &GrowthPilotConfig) -> Result<SqliteRecordStore, GrowthPilotError> {
    let store = SqliteRecordStore::new(config.storage.clone());
    store.initialize().await?;
    Ok(store)
}

fn settings(config: &GrowthPilotConfig) -> GeneratorSettings {
    GeneratorSettings {
        deadline: Duration::from_secs(config.gemini.request_timeout_secs),
        max_output_tokens: config.gemini.max_output_tokens,
    }
}

fn print_report(report: &growthpilot_engine::StrategyReport) {
    println!(
        "learning phase: {} / {} records ({}%)",
        report.gating.record_count, report.gating.threshold, report.gating.progress
    );

    let analysis = report.analysis.result();
    let provenance = if report.analysis.is_fallback() {
        " (defaults -- provider unavailable)"
    } else {
        ""
    };
    println!("\nniche: {}{}", analysis.niche_analysis, provenance);
    println!("engagement health: {} / 100", analysis.engagement_score);
    println!("best posting times:");
    for slot in &analysis.best_time_slots {
        println!("  - {slot}");
    }

    match &report.calendar {
        None => println!("\ncontent calendar locked -- keep logging records"),
        Some(entries) if entries.is_empty() => {
            println!("\nno calendar suggestions were generated")
        }
        Some(entries) => {
            println!("\nupcoming schedule:");
            for entry in entries {
                println!("  {} {} [{}]", entry.day, entry.time, entry.topic);
                println!("    {}", entry.hook);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Config loads with defaults when no config file is present.
        let config = growthpilot_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.agent.owner, "local");
    }
}
