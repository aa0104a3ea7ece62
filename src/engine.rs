use std::io;

use tracing::debug;

use crate::config::Percentile;
use crate::donor_history::{DonorHistory, Observation};
use crate::model::{DonationRecord, RepeatDonorSummary};
use crate::quantile::GroupAggregator;
use crate::sink::OutputSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Donor registered; nothing emitted.
    FirstSighting,
    /// Repeat donor dated before its first sighting; ignored.
    Backdated { reference_year: i32 },
    Emitted(RepeatDonorSummary),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineCounters {
    pub first_sightings: u64,
    pub backdated: u64,
    pub emitted: u64,
}

pub struct AnalyticsEngine {
    history: DonorHistory,
    groups: GroupAggregator,
    counters: EngineCounters,
}

impl AnalyticsEngine {
    pub fn new(percentile: Percentile) -> Self {
        Self::with_state(DonorHistory::new(), GroupAggregator::new(percentile))
    }

    pub fn with_state(history: DonorHistory, groups: GroupAggregator) -> Self {
        Self {
            history,
            groups,
            counters: EngineCounters::default(),
        }
    }

    pub fn process(&mut self, record: &DonationRecord) -> Outcome {
        let year = record.transaction_year();
        let observation = self.history.observe(
            record.donor_key(),
            record.recipient_id(),
            record.postal_code(),
            year,
        );

        let reference = match observation {
            Observation::FirstSighting => {
                self.counters.first_sightings += 1;
                return Outcome::FirstSighting;
            }
            Observation::Repeat(reference) => reference,
        };

        if year < reference.year {
            debug!(
                donor = %record.donor_key().name,
                year,
                reference_year = reference.year,
                "skip backdated repeat donation"
            );
            self.counters.backdated += 1;
            return Outcome::Backdated {
                reference_year: reference.year,
            };
        }

        let snapshot = self.groups.insert_and_query(record.group_key(), record.amount());
        self.counters.emitted += 1;
        Outcome::Emitted(RepeatDonorSummary {
            recipient_id: record.recipient_id().to_string(),
            postal_code: record.postal_code().to_string(),
            year,
            percentile_value: snapshot.percentile_value,
            running_total: snapshot.running_total,
            running_count: snapshot.running_count,
        })
    }

    /// Processes one record and hands any summary to `sink` before returning.
    pub fn process_into<S: OutputSink>(
        &mut self,
        record: &DonationRecord,
        sink: &mut S,
    ) -> io::Result<Outcome> {
        let outcome = self.process(record);
        if let Outcome::Emitted(summary) = &outcome {
            sink.write(summary)?;
        }
        Ok(outcome)
    }

    pub fn run<'a, I, S>(&mut self, records: I, sink: &mut S) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a DonationRecord>,
        S: OutputSink,
    {
        for record in records {
            self.process_into(record, sink)?;
        }
        sink.flush()
    }

    pub fn counters(&self) -> EngineCounters {
        self.counters
    }

    pub fn history(&self) -> &DonorHistory {
        &self.history
    }

    pub fn groups(&self) -> &GroupAggregator {
        &self.groups
    }
}
