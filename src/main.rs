// jobharvest CLI
//
// Extracts job listings from one rendered career page and prints the
// result as JSON. Exits non-zero when the run fails or finds nothing.

use anyhow::Result;

use jobharvest::JobScraper;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let target_url = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: jobharvest <career-page-url>"))?;

    let config = jobharvest::load_yaml_config().unwrap_or_default();
    let scraper = JobScraper::new(config);
    let result = scraper.scrape(&target_url).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
