//! Doctor Command
//!
//! Health checks against the configured provider and vector store.
//! Informational: prints one line per dependency and reports overall status.

use console::style;
use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::llm::{create_provider, OpenAiEmbedder};
use crate::store::{ChromaStore, DocumentStore};
use crate::types::{Result, TriageError};

pub async fn run() -> Result<()> {
    let config = ConfigLoader::load()?;
    let mut healthy = true;

    println!("{}", style("triagent doctor").bold());

    match create_provider(&config.llm) {
        Ok(provider) => {
            let up = matches!(provider.health_check().await, Ok(true));
            healthy &= up;
            print_check(
                &format!("provider {} ({})", provider.name(), provider.model()),
                up,
            );
        }
        Err(e) => {
            healthy = false;
            print_check(&format!("provider: {}", e), false);
        }
    }

    match OpenAiEmbedder::new(&config.embedding)
        .and_then(|embedder| ChromaStore::new(&config.store, Arc::new(embedder)))
    {
        Ok(store) => {
            let up = matches!(store.health_check().await, Ok(true));
            healthy &= up;
            print_check(&format!("vector store at {}", config.store.base_url), up);
        }
        Err(e) => {
            healthy = false;
            print_check(&format!("vector store: {}", e), false);
        }
    }

    if healthy {
        println!("{}", style("All checks passed.").green());
        Ok(())
    } else {
        Err(TriageError::Config(
            "one or more dependencies are unavailable".to_string(),
        ))
    }
}

fn print_check(label: &str, up: bool) {
    let mark = if up {
        style("✓").green()
    } else {
        style("✗").red()
    };
    println!("{} {}", mark, label);
}
