// social-audit: audit the social sharing meta tags of one URL
//
// Prints the Facebook and Twitter results as text, or the whole report as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use social_meta_audit::{BrowserManager, PageAudit, ScoredResult, audit_url, load_yaml_config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Score a page's Open Graph and Twitter Card meta tags", long_about = None)]
struct Args {
    /// Page to audit (http or https)
    url: String,

    /// YAML config file
    #[arg(long, default_value = social_meta_audit::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Navigation timeout in milliseconds (overrides config)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// CSS selector to wait for before extracting (overrides config)
    #[arg(long)]
    wait_for: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = load_yaml_config(&args.config)?;
    if let Some(timeout_ms) = args.timeout_ms {
        config.navigation_timeout_ms = timeout_ms;
    }
    if args.wait_for.is_some() {
        config.wait_for_selector = args.wait_for.clone();
    }
    if args.headed {
        config.browser.headless = false;
    }

    let manager = BrowserManager::with_config(config.browser.clone());
    let outcome = audit_url(&manager, &args.url, &config.navigate_options()).await;
    manager.shutdown().await?;

    let page_audit = outcome.with_context(|| format!("Audit of {} failed", args.url))?;

    if args.json {
        let json = serde_json::to_string_pretty(&page_audit).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print_report(&page_audit);
    }

    Ok(())
}

fn print_report(page_audit: &PageAudit) {
    println!("{}", page_audit.url);
    println!("Overall score: {:.0}%\n", page_audit.overall_score * 100.0);

    for result in page_audit.report.results() {
        print_result(result);
    }
}

fn print_result(result: &ScoredResult) {
    println!("== {} ({:.0}%)", result.title, result.score * 100.0);
    println!("{}\n", result.description);

    let key_width = result
        .table
        .rows()
        .iter()
        .map(|row| row[0].chars().count())
        .max()
        .unwrap_or(0);
    for row in result.table.rows() {
        println!("  {:<width$}  {}", row[0], row[1], width = key_width);
    }

    if result.recommendations.is_empty() {
        println!("\n  No recommendations.\n");
        return;
    }

    println!();
    for recommendation in &result.recommendations {
        println!("  [{}] {}", recommendation.severity, recommendation.message);
    }
    println!();
}
