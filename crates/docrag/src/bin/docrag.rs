//! Document QA agent binary
//!
//! Run with: cargo run -p docrag -- <document.pdf>

use std::io::{BufRead, Write};
use std::path::Path;

use docrag::ingestion::extract_chunks;
use docrag::{Agent, AgentConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docrag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(document) = args.get(1) else {
        eprintln!("Usage: docrag <document.pdf|document.txt|document.md>");
        std::process::exit(1);
    };

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                  Document Query Agent                     ║
║        Ask questions about a single document              ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration (docrag.toml next to the working directory, if any)
    let config = AgentConfig::load_or_default(Path::new("docrag.toml"))?;

    tracing::info!("Configuration loaded");
    tracing::info!(
        "  - Embedding model: {} ({} dims)",
        config.llm.embed_model,
        config.embedding.dimensions
    );
    tracing::info!("  - Generation model: {}", config.llm.generate_model);
    tracing::info!("  - Retrieval width: {}", config.retrieval.top_k);

    // Check Ollama
    tracing::info!("Checking Ollama at {}...", config.llm.base_url);
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/api/tags", config.llm.base_url))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Ollama is running");
        }
        _ => {
            tracing::warn!("Ollama not available at {}", config.llm.base_url);
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Start: ollama serve");
            tracing::warn!(
                "  2. Pull models: ollama pull {} && ollama pull {}",
                config.llm.embed_model,
                config.llm.generate_model
            );
        }
    }

    let chunks = extract_chunks(Path::new(document))?;
    tracing::info!("Extracted {} chunks from {}", chunks.len(), document);

    let agent = Agent::from_config(&config);
    let report = agent.initialize(chunks).await?;

    println!(
        "\nIndexed {} chunks ({} dims) in {}ms",
        report.chunks, report.dimensions, report.elapsed_ms
    );
    println!("Document fingerprint: {}", &report.fingerprint[..16]);
    tracing::debug!(
        "Index report: {}",
        serde_json::to_string(&report).unwrap_or_default()
    );

    let stdin = std::io::stdin();
    loop {
        print!("\nAsk a question about the document (type 'exit' to quit): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            break;
        }

        let answer = agent.query(question).await?;
        println!("\nAgent: {}", answer);
    }

    Ok(())
}
