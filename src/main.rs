mod args;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::Args;
use donation_analytics::config::Percentile;
use donation_analytics::ingest::run_to_file;
use donation_analytics::report::build_summary_table;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    let t0 = Instant::now();

    let args = Args::parse();

    let percentile = match (args.percentile, &args.percentile_file) {
        (Some(p), _) => Percentile::new(p)?,
        (None, Some(path)) => Percentile::from_file(path)
            .with_context(|| format!("read percentile from {}", path.display()))?,
        (None, None) => return Err(anyhow!("either --percentile-file or --percentile is required")),
    };
    info!("using percentile {}", percentile);

    let stats = run_to_file(&args.inputs, percentile, &args.output, args.append)?;
    info!(
        "{} records accepted, {} rejected, {} lines emitted to {}",
        stats.records_accepted,
        stats.records_rejected,
        stats.lines_emitted,
        args.output.display()
    );

    if args.summary {
        build_summary_table(&stats).printstd();
    }
    if let Some(path) = &args.stats_json {
        stats.write_json(path)?;
    }

    info!("total: {:.3}s", t0.elapsed().as_secs_f64());
    Ok(())
}
