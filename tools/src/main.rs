//! report-runner: headless dataset + report generator.
//!
//! Usage:
//!   report-runner --seed 42 --customers 500
//!   report-runner --seed 42 --customers 100 --regions "EMEA,LATAM" --csv-dir ./out
//!   report-runner --summary-only

use anyhow::{Context, Result};
use crmsynth_core::{
    dataset::DatasetGenerator,
    insight_engine::InsightEngine,
    params::GeneratorParams,
    tabular::{to_table, Tabular},
};
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let customers = parse_arg(&args, "--customers", 500usize);
    let regions = parse_list(&args, "--regions");
    let segments = parse_list(&args, "--segments");
    let csv_dir = args
        .windows(2)
        .find(|w| w[0] == "--csv-dir")
        .map(|w| w[1].clone());
    let summary_only = args.iter().any(|a| a == "--summary-only");

    let params = GeneratorParams::new(customers, regions, segments);
    let generator = DatasetGenerator::new(params, seed);
    let dataset = generator.generate().context("dataset generation failed")?;

    log::info!(
        "batch ready: {} customers, {} deals, {} feedback entries, pipeline ${:.0}",
        dataset.summary.total_customers,
        dataset.summary.total_deals,
        dataset.summary.total_feedback,
        dataset.summary.total_pipeline,
    );

    if let Some(dir) = csv_dir {
        export_tables(&dataset, Path::new(&dir))?;
    }

    if summary_only {
        println!("{}", serde_json::to_string_pretty(&dataset.summary)?);
        return Ok(());
    }

    let report = InsightEngine::new().analyze(&dataset.customers, &dataset.deals, &dataset.feedback);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn export_tables(dataset: &crmsynth_core::Dataset, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;
    write_table(dir, "customers.csv", &dataset.customers)?;
    write_table(dir, "deals.csv", &dataset.deals)?;
    write_table(dir, "feedback.csv", &dataset.feedback)?;
    log::info!("exported tables to {}", dir.display());
    Ok(())
}

fn write_table<T: Tabular>(dir: &Path, name: &str, records: &[T]) -> Result<()> {
    let path = dir.join(name);
    let text = to_table(records)
        .to_delimited(b',')
        .with_context(|| format!("rendering {}", path.display()))?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn parse_list(args: &[String], flag: &str) -> Vec<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| {
            w[1].split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
