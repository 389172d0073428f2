//! Thin command-line consumer of the forecast pipeline.
//!
//! Stands in for the presentation layer: it supplies area selections and
//! date queries, and renders the hierarchy/forecast structures the pipeline
//! returns.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use tenki_core::Config;
use tenki_jma::{
    ForecastRecord, ForecastStore, Ingestor, JmaClient, RetryPolicy, WeatherKind, SHORT_RANGE_DAYS,
};

#[tokio::main]
async fn main() -> Result<()> {
    tenki_core::init()?;
    let config = Config::load_validated()?;

    let client = JmaClient::with_base_url(&config.upstream.base_url)?.with_retry(RetryPolicy {
        attempts: config.upstream.retry_attempts,
        ..RetryPolicy::default()
    });

    if let Some(parent) = config.store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create store directory")?;
    }
    let store = ForecastStore::open(&config.store.path)?;
    tracing::info!(store = %config.store.path.display(), "forecast cache ready");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("areas") => {
            let hierarchy = client.resolve_hierarchy().await?;
            for region in &hierarchy.regions {
                println!("{}", region.name);
                for (office, code) in &region.offices {
                    println!("  {office} ({code})");
                }
            }
        }
        Some("fetch") => {
            let area_code = args.get(1).map(String::as_str).unwrap_or("130000");
            let ingestor = Ingestor::new(&client, &store);
            ingestor.ingest(area_code).await?;

            let records = store.recent(area_code, SHORT_RANGE_DAYS)?;
            for record in &records {
                print_record(record);
            }
        }
        Some("show") => {
            let area_code = args
                .get(1)
                .context("usage: tenki show <area_code> [YYYY-MM-DD]")?;

            match args.get(2) {
                Some(raw) => {
                    let date: NaiveDate = raw
                        .parse()
                        .with_context(|| format!("not a date: {raw}"))?;
                    match store.by_date(area_code, date)? {
                        Some(record) => print_record(&record),
                        None => println!("no cached forecast for {area_code} on {date}"),
                    }
                }
                None => {
                    let records = store.recent(area_code, SHORT_RANGE_DAYS)?;
                    if records.is_empty() {
                        println!("no cached forecasts for {area_code}");
                    }
                    for record in &records {
                        print_record(record);
                    }
                }
            }
        }
        _ => {
            eprintln!("usage: tenki <areas | fetch [area_code] | show <area_code> [YYYY-MM-DD]>");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn print_record(record: &ForecastRecord) {
    let icon = WeatherKind::classify(&record.weather).glyph();
    let temps = match (record.temp_min, record.temp_max) {
        (Some(low), Some(high)) => format!("{low}/{high}℃"),
        (Some(low), None) => format!("{low}/-℃"),
        (None, Some(high)) => format!("-/{high}℃"),
        (None, None) => "-".to_string(),
    };
    println!("{} {} {} {}", record.date, icon, record.weather, temps);
}
