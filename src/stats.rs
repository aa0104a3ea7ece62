use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::engine::EngineCounters;
use crate::errors::RecordError;

/// Counters of one run, serialized by `--stats-json`.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct RunStats {
    pub sources: usize,
    pub lines_read: u64,
    pub records_accepted: u64,
    pub records_rejected: u64,
    pub rejected_by_reason: BTreeMap<String, u64>,
    pub first_sightings: u64,
    pub backdated_skipped: u64,
    pub lines_emitted: u64,
    pub unique_donors: usize,
    pub groups: usize,
    pub percentile: u8,
}

impl RunStats {
    pub fn record_rejection(&mut self, err: &RecordError) {
        self.records_rejected += 1;
        *self.rejected_by_reason.entry(err.label()).or_insert(0) += 1;
    }

    pub fn absorb_engine(&mut self, counters: EngineCounters) {
        self.first_sightings = counters.first_sightings;
        self.backdated_skipped = counters.backdated;
        self.lines_emitted = counters.emitted;
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let body = serde_json::to_string_pretty(self).context("serialize run stats")?;
        fs::write(path, body).with_context(|| format!("write {}", path.display()))
    }
}
