// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr, so JSON on stdout stays clean)
// 2. Parse command-line arguments using clap
// 3. Build the index through AppState, the same path a server would use
// 4. Run the query and print results
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use trie_search::state::{AppState, BuildStatus, SearchHit};
use trie_search::WordIndex;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let state = build(&cli).await?;

    match cli.command {
        Commands::Index { json } => print_index(&state, json)?,
        Commands::Search { pattern, json } => {
            let hits = state.search(&pattern);
            print_hits(&hits, json)?;
        }
        Commands::Complete { prefix, json } => {
            let words = state.autocomplete(&prefix);
            if json {
                println!("{}", serde_json::to_string_pretty(&words)?);
            } else {
                for word in &words {
                    println!("{}", word);
                }
            }
        }
    }

    Ok(0)
}

// Runs one build to completion and returns the finished state
async fn build(cli: &Cli) -> Result<Arc<AppState>> {
    let config = cli.app_config();
    let state = Arc::new(AppState::new(config.clone()));

    let handle = state.spawn_rebuild(config, cli.fetch_config())?;
    handle.await?;

    match state.status() {
        BuildStatus::Ready { words } => {
            tracing::info!(words, "index ready");
            Ok(state)
        }
        BuildStatus::Failed { error } => Err(anyhow!("index build failed: {}", error)),
        other => Err(anyhow!("unexpected build status: {:?}", other)),
    }
}

fn print_index(state: &AppState, json: bool) -> Result<()> {
    let Some(index) = state.index() else {
        return Ok(());
    };

    if json {
        let map: BTreeMap<String, &BTreeSet<String>> = index.iter().collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        print_summary(&index);
    }
    Ok(())
}

fn print_summary(index: &WordIndex) {
    let pages: BTreeSet<&String> = index.iter().flat_map(|(_, urls)| urls).collect();

    println!("📊 Summary:");
    println!("   📝 Words: {}", index.len());
    println!("   📄 Pages: {}", pages.len());
}

fn print_hits(hits: &[SearchHit], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matches");
        return Ok(());
    }

    println!("{:<30} {}", "WORD", "PAGES");
    println!("{}", "=".repeat(80));
    for hit in hits {
        println!("{:<30} {}", hit.word, hit.urls.join(", "));
    }
    println!();
    println!("📋 Total: {}", hits.len());
    Ok(())
}
