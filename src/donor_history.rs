use std::collections::HashMap;

use crate::model::{DonorKey, DonorReference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    FirstSighting,
    Repeat(DonorReference),
}

/// First sighting of every donor seen during a run.
#[derive(Debug, Default)]
pub struct DonorHistory {
    first_seen: HashMap<DonorKey, DonorReference>,
}

impl DonorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an unseen donor, or reports the reference stored when it was
    /// first seen. A stored reference is never replaced.
    pub fn observe(
        &mut self,
        donor_key: &DonorKey,
        recipient_id: &str,
        postal_code: &str,
        year: i32,
    ) -> Observation {
        if let Some(reference) = self.first_seen.get(donor_key) {
            return Observation::Repeat(reference.clone());
        }
        self.first_seen.insert(
            donor_key.clone(),
            DonorReference {
                recipient_id: recipient_id.to_string(),
                postal_code: postal_code.to_string(),
                year,
            },
        );
        Observation::FirstSighting
    }

    pub fn reference(&self, donor_key: &DonorKey) -> Option<&DonorReference> {
        self.first_seen.get(donor_key)
    }

    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}
