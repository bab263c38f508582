//! JSON file export of an aggregated batch, for consumption by static
//! frontends that read the file directly instead of the API.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use habari_core::{Article, Result};

pub fn export_articles(path: &Path, articles: &[Article]) -> Result<()> {
    let sources: BTreeSet<&str> = articles.iter().map(|a| a.source.as_str()).collect();

    let payload = serde_json::json!({
        "timestamp": Utc::now().to_rfc3339(),
        "total_articles": articles.len(),
        "sources": sources,
        "articles": articles,
    });

    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &payload)?;

    info!(count = articles.len(), path = %path.display(), "💾 exported articles");
    Ok(())
}
