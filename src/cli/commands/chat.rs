//! Chat Command
//!
//! Interactive REPL over the triage pipeline. Each turn is awaited to
//! completion before the next prompt. `exit`, `quit`, end-of-input, and
//! Ctrl-C all terminate gracefully.

use console::style;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::ConfigLoader;
use crate::engine::AgentEngine;
use crate::types::Result;

pub async fn run() -> Result<()> {
    let config = ConfigLoader::load()?;
    let engine = AgentEngine::from_config(&config).await?;

    println!(
        "{}",
        style("triagent chat. Ask an IT or finance question ('exit' to leave).").bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let Some(line) = line else {
            // stdin closed
            break;
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "exit" | "quit") {
            break;
        }

        let response = engine.handle(query).await?;
        println!("{}", style(format!("[{}]", response.route)).dim());
        println!("{}\n", response.response_text);
    }

    println!("{}", style("Bye.").dim());
    Ok(())
}
