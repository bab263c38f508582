use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use habari_core::{Article, Result};
use habari_feeds::{default_sources, export::export_articles, AggregationService};
use habari_web::AppState;

/// Duration given as a compound string like `30m`, `1h15m` or `90s`.
/// A bare number is taken as seconds.
#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if c.is_whitespace() {
                continue;
            } else {
                let num: u64 = current_number
                    .parse()
                    .map_err(|_| format!("expected a number before '{}'", c))?;
                total_seconds += match c {
                    's' => num,
                    'm' => num * 60,
                    'h' => num * 3600,
                    'd' => num * 86400,
                    _ => return Err(format!("invalid duration unit: {}", c)),
                };
                current_number.clear();
            }
        }

        if !current_number.is_empty() {
            total_seconds += current_number
                .parse::<u64>()
                .map_err(|_| "invalid number in duration".to_string())?;
        }

        if total_seconds == 0 {
            return Err("duration must be positive".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "African news aggregation service", long_about = None)]
struct Cli {
    /// Storage backend for the article cache
    #[arg(long, default_value = "memory")]
    storage: String,

    /// Database file used by the sqlite backend
    #[arg(long, default_value = "news_cache.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the aggregation pipeline and print a summary
    Aggregate {
        /// Write the aggregated batch to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
        /// Keep running, re-aggregating on this interval (e.g. 30m, 1h15m)
        #[arg(long)]
        interval: Option<HumanDuration>,
    },
    /// Serve the query API with a periodic background refresh
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = "30m")]
        interval: HumanDuration,
    },
    /// List the configured feed sources
    Sources,
}

fn print_summary(articles: &[Article]) {
    println!("Total articles: {}", articles.len());
    println!(
        "Breaking news: {}",
        articles.iter().filter(|a| a.is_breaking).count()
    );
    println!(
        "Trending: {}",
        articles.iter().filter(|a| a.is_trending).count()
    );

    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
    for article in articles {
        *categories.entry(article.category.as_str()).or_insert(0) += 1;
    }
    println!("\nCategories:");
    for (category, count) in categories {
        println!("  {}: {}", category, count);
    }

    let mut countries: BTreeMap<&str, usize> = BTreeMap::new();
    for article in articles {
        for country in &article.country_focus {
            *countries.entry(country).or_insert(0) += 1;
        }
    }
    let mut countries: Vec<_> = countries.into_iter().collect();
    countries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    println!("\nTop countries:");
    for (country, count) in countries.into_iter().take(10) {
        println!("  {}: {}", country, count);
    }
}

async fn run_once(service: &AggregationService, export: Option<&PathBuf>) -> Result<()> {
    let articles = service.refresh().await;
    print_summary(&articles);

    if let Some(path) = export {
        export_articles(path, &articles)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let storage = habari_storage::create_store(&cli.storage, &cli.db).await?;
    info!(backend = %cli.storage, "💾 storage initialized");

    let service = Arc::new(AggregationService::new(default_sources(), storage));
    info!(sources = service.sources().len(), "📰 aggregation service ready");

    match cli.command {
        Commands::Aggregate { export, interval } => {
            if let Some(interval) = interval {
                info!(seconds = interval.0.as_secs(), "running in periodic mode");
                loop {
                    if let Err(e) = run_once(&service, export.as_ref()).await {
                        error!(error = %e, "aggregation cycle failed");
                    }
                    info!(seconds = interval.0.as_secs(), "waiting for next cycle");
                    tokio::time::sleep(interval.0).await;
                }
            } else {
                run_once(&service, export.as_ref()).await?;
            }
        }
        Commands::Serve { port, interval } => {
            // Warm the snapshot before accepting queries.
            service.refresh().await;

            let background = service.clone();
            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(interval.0).await;
                    background.refresh().await;
                }
            });

            habari_web::serve(AppState { service }, port).await?;
        }
        Commands::Sources => {
            for source in service.sources() {
                println!(
                    "{} - {} ({}, {}, credibility {:.1})",
                    source.id, source.name, source.country, source.language, source.credibility
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration_units() {
        assert_eq!(HumanDuration::from_str("30m").unwrap().0.as_secs(), 1800);
        assert_eq!(HumanDuration::from_str("1h15m").unwrap().0.as_secs(), 4500);
        assert_eq!(HumanDuration::from_str("90").unwrap().0.as_secs(), 90);
        assert_eq!(HumanDuration::from_str("1d").unwrap().0.as_secs(), 86400);
    }

    #[test]
    fn test_human_duration_rejects_garbage() {
        assert!(HumanDuration::from_str("").is_err());
        assert!(HumanDuration::from_str("h").is_err());
        assert!(HumanDuration::from_str("10x").is_err());
        assert!(HumanDuration::from_str("0").is_err());
    }
}
