use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{Percentile, PROGRESS_EVERY_LINES};
use crate::engine::AnalyticsEngine;
use crate::io_utils::{collect_sources, open_output, open_source, InputSource};
use crate::sink::{LineSink, OutputSink};
use crate::stats::RunStats;
use crate::validator::parse_record;

/// Streams every line of `reader` through the validator and the engine.
/// Rejected lines are counted and skipped.
pub fn process_reader<R: BufRead, S: OutputSink>(
    reader: &mut R,
    engine: &mut AnalyticsEngine,
    sink: &mut S,
    stats: &mut RunStats,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).context("read input line")?;
        if n == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        stats.lines_read += 1;
        if stats.lines_read % PROGRESS_EVERY_LINES == 0 {
            info!("processed {} lines...", stats.lines_read);
        }

        match parse_record(line) {
            Ok(record) => {
                stats.records_accepted += 1;
                engine
                    .process_into(&record, sink)
                    .context("write output line")?;
            }
            Err(err) => {
                debug!(line = stats.lines_read, %err, "skip record");
                stats.record_rejection(&err);
            }
        }
    }
    Ok(())
}

/// Processes all sources one after the other, in order.
pub fn process_sources<S: OutputSink>(
    sources: &[InputSource],
    engine: &mut AnalyticsEngine,
    sink: &mut S,
) -> Result<RunStats> {
    let mut stats = RunStats {
        sources: sources.len(),
        percentile: engine.groups().percentile().get(),
        ..RunStats::default()
    };

    for (idx, source) in sources.iter().enumerate() {
        let t_source = Instant::now();
        let before = stats.lines_read;
        let mut reader = open_source(source)?;
        process_reader(&mut reader, engine, sink, &mut stats)
            .with_context(|| format!("process {}", source.path().display()))?;
        info!(
            "source {}/{} {}: {} lines in {:.3}s",
            idx + 1,
            sources.len(),
            source.path().display(),
            stats.lines_read - before,
            t_source.elapsed().as_secs_f64()
        );
    }
    sink.flush().context("flush output")?;

    stats.absorb_engine(engine.counters());
    stats.unique_donors = engine.history().len();
    stats.groups = engine.groups().group_count();
    Ok(stats)
}

/// Runs a fresh engine over `inputs` and writes the summaries to `output`.
pub fn run_to_file(
    inputs: &[PathBuf],
    percentile: Percentile,
    output: &Path,
    append: bool,
) -> Result<RunStats> {
    let sources = collect_sources(inputs)?;
    let mut sink = LineSink::new(open_output(output, append)?);
    let mut engine = AnalyticsEngine::new(percentile);
    let stats = process_sources(&sources, &mut engine, &mut sink)?;
    debug!("{} lines written to {}", sink.lines_written(), output.display());
    Ok(stats)
}
