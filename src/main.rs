//! `safeeats` — look up food products by barcode and classify ingredient risk.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`logging`]).
//! 2. Load config ([`config::load_config`]).
//! 3. For each barcode ([`scan::scan`]): validate, consult the cache
//!    ([`cache`]), fetch the product ([`source`]), classify its ingredients
//!    ([`pipeline`]) and cache the report.
//! 4. Render the requested report ([`report`]).
//! 5. Exit `0`, or `1` if any scan failed or a product reached `policy.fail_on`.

mod cache;
mod cli;
mod config;
mod error;
mod ingredient;
mod logging;
mod models;
mod pipeline;
mod report;
mod rules;
mod scan;
mod source;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::{debug, warn};

use cache::{FileCache, NoCache, ResultCache};
use cli::{Cli, Command, OutputArgs, ReportFormat};
use config::{load_config, Config};
use models::ScanReport;
use source::open_food_facts::OpenFoodFacts;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.output.verbose)?;

    let ok = match cli.command {
        Command::Scan {
            barcodes,
            config,
            no_cache,
        } => {
            let cwd = std::env::current_dir()?;
            let config = load_config(&cwd, config.as_deref())?;
            run_scan(&barcodes, &config, no_cache, &cli.output).await?
        }
        Command::Classify { text } => run_classify(&text, &cli.output)?,
        Command::Rules => run_rules(&cli.output)?,
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

/// Scan barcodes and report. Returns `false` when the exit code should be 1.
async fn run_scan(
    barcodes: &[String],
    config: &Config,
    no_cache: bool,
    output: &OutputArgs,
) -> Result<bool> {
    const BATCH_SIZE: usize = 16;

    let source = OpenFoodFacts::new(&config.source)?;
    let cache = open_cache(config, no_cache);

    if !output.quiet {
        eprintln!(
            "  {} scanning {} barcode(s)",
            "→".cyan(),
            barcodes.len()
        );
    }

    let pb = if !output.quiet && barcodes.len() > 1 {
        let pb = ProgressBar::new(barcodes.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports: Vec<ScanReport> = Vec::new();
    let mut failures: Vec<(String, String)> = Vec::new();

    for batch in barcodes.chunks(BATCH_SIZE) {
        let futures: Vec<_> = batch
            .iter()
            .map(|barcode| scan::scan(barcode, &source, cache.as_ref()))
            .collect();

        let results = join_all(futures).await;

        for (barcode, result) in batch.iter().zip(results) {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    debug!(barcode = barcode.as_str(), "scan failed: {e:#}");
                    failures.push((barcode.clone(), e.to_string()));
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    match output.report {
        ReportFormat::Terminal => {
            report::terminal::render_scans(&reports, &failures, output.verbose, output.quiet);
        }
        ReportFormat::Json => {
            let errors: Vec<_> = failures
                .iter()
                .map(|(barcode, detail)| json!({ "barcode": barcode, "detail": detail }))
                .collect();
            let body = json!({ "products": reports, "errors": errors });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    let over_threshold = reports
        .iter()
        .any(|r| config.policy.violated_by(r.overall_risk));

    Ok(failures.is_empty() && !over_threshold)
}

fn open_cache(config: &Config, no_cache: bool) -> Box<dyn ResultCache> {
    if no_cache || !config.cache.enabled {
        return Box::new(NoCache);
    }
    match config.cache.resolved_path() {
        Some(path) => Box::new(FileCache::open(path, config.cache.ttl())),
        None => {
            warn!("no cache directory available; caching disabled");
            Box::new(NoCache)
        }
    }
}

fn run_classify(text: &str, output: &OutputArgs) -> Result<bool> {
    let outcome = match pipeline::classify(Some(text)) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            return Ok(false);
        }
    };

    match output.report {
        ReportFormat::Terminal => report::terminal::render_classification(
            &outcome.ingredients,
            outcome.overall_risk,
            output.verbose,
            output.quiet,
        ),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(true)
}

fn run_rules(output: &OutputArgs) -> Result<bool> {
    let meta = rules::metadata::metadata();
    let table = rules::table::rules();

    match output.report {
        ReportFormat::Terminal => {
            report::terminal::render_rules(&meta, &table, output.verbose, output.quiet);
        }
        ReportFormat::Json => {
            let entries: Vec<_> = table
                .iter()
                .map(|(name, rule)| {
                    json!({
                        "ingredient": name,
                        "risk": rule.risk,
                        "source": rule.source,
                        "notes": rule.notes,
                    })
                })
                .collect();
            let body = json!({ "metadata": meta, "rules": entries });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(true)
}
