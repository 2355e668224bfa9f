//! Health Tracker demo
//!
//! Records a week of sample observations, prints trend statistics, and
//! exports the entries to CSV.

use anyhow::{Context, Result};
use chrono::{Days, Local};
use health_tracker::{
    add_entry, export_csv, import_csv, moving_average, moving_average_series, summarize_week,
    Config, EntryStore, DATE_FORMAT, VERSION,
};

/// Sample body weights for the seven days ending today, oldest first.
const SAMPLE_WEIGHTS: [f64; 7] = [70.0, 71.0, 70.5, 69.0, 68.5, 69.2, 70.0];

/// Sample nightly sleep, recorded for the last four days only.
const SAMPLE_SLEEP: [f64; 4] = [7.5, 6.0, 8.25, 7.0];

fn main() -> Result<()> {
    let config = load_config();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    println!("Health Tracker v{VERSION} - demo");
    println!();

    let entries = build_sample()?;
    println!("Created {} sample entries.", entries.len());
    println!();

    print_moving_averages(&entries, config.moving_average_window)?;
    print_weekly_summaries(&entries)?;

    export_csv(&entries, &config.export_path).with_context(|| {
        format!("failed to export entries to {}", config.export_path.display())
    })?;
    println!("Exported entries to {}", config.export_path.display());

    let reloaded = import_csv(&config.export_path)
        .with_context(|| format!("failed to read back {}", config.export_path.display()))?;
    if reloaded == entries {
        println!("Verified {} rows round-trip.", reloaded.len());
    } else {
        anyhow::bail!(
            "exported file does not match recorded entries ({} vs {} rows)",
            reloaded.len(),
            entries.len()
        );
    }

    Ok(())
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config, using defaults: {e}");
            Config::default()
        }
    }
}

fn build_sample() -> Result<EntryStore> {
    let today = Local::now().date_naive();
    let mut entries = EntryStore::new();

    for (offset, weight) in (0..SAMPLE_WEIGHTS.len() as u64).rev().zip(SAMPLE_WEIGHTS) {
        let date = today
            .checked_sub_days(Days::new(offset))
            .context("sample date out of range")?;
        add_entry(&mut entries, &date.format(DATE_FORMAT).to_string(), "weight", weight)?;
    }

    for (offset, hours) in (0..SAMPLE_SLEEP.len() as u64).rev().zip(SAMPLE_SLEEP) {
        let date = today
            .checked_sub_days(Days::new(offset))
            .context("sample date out of range")?;
        add_entry(&mut entries, &date.format(DATE_FORMAT).to_string(), "sleep_hours", hours)?;
    }

    Ok(entries)
}

fn print_moving_averages(entries: &EntryStore, window: usize) -> Result<()> {
    for metric in entries.metrics() {
        let latest = moving_average(entries, metric, window)?;
        println!("Moving average for {metric} (window={window}): {latest:.2}");

        for point in moving_average_series(entries, metric, window)? {
            println!("  {}: {:.2}", point.date.format(DATE_FORMAT), point.average);
        }
        println!();
    }
    Ok(())
}

fn print_weekly_summaries(entries: &EntryStore) -> Result<()> {
    println!("7-day summaries:");
    let mut summaries = Vec::new();
    for metric in entries.metrics() {
        let summary = summarize_week(entries, metric, None)?;
        println!("  {}", summary.summary());
        summaries.push(summary);
    }
    println!();

    let json = serde_json::to_string_pretty(&summaries).context("serializing summaries")?;
    println!("7-day summaries (JSON):\n{json}");
    println!();
    Ok(())
}
