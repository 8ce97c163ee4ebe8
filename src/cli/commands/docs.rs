//! Docs Command
//!
//! Run the policy document relevance search directly, outside the agent
//! pipeline. The three outcomes print distinguishably.

use console::style;

use crate::config::ConfigLoader;
use crate::gdocs::{DocSearchOutcome, GoogleDocsClient, PolicyDocSearcher};
use crate::types::Result;

pub async fn run(query: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    let client = GoogleDocsClient::new(&config.docs)?;
    let searcher = PolicyDocSearcher::new(client, config.docs.document_ids.clone());

    match searcher.search(query).await {
        DocSearchOutcome::Found(excerpts) => {
            println!("{}", style("Relevant excerpts:").bold());
            println!("{}", excerpts);
        }
        DocSearchOutcome::NotFound => {
            println!("{}", style("No matching content in the policy documents.").yellow());
        }
        DocSearchOutcome::Failed(reason) => {
            println!("{} {}", style("Search failed:").red(), reason);
        }
    }

    Ok(())
}
