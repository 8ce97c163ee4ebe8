//! Ask Command
//!
//! One-shot query through the full pipeline.

use console::style;

use crate::config::ConfigLoader;
use crate::engine::AgentEngine;
use crate::types::Result;

pub async fn run(query: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    let engine = AgentEngine::from_config(&config).await?;

    let response = engine.handle(query).await?;

    println!("{}", style(format!("[{}]", response.route)).dim());
    println!("{}", response.response_text);

    Ok(())
}
