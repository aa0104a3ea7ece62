use std::fmt;

use crate::config::{MAX_ABS_AMOUNT, OUTPUT_DELIMITER, ZIP_CODE_LEN};
use crate::errors::RecordError;

/// Donor identity: full name plus 5-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DonorKey {
    pub name: String,
    pub postal_code: String,
}

/// Where a donor was first seen. Never changes after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorReference {
    pub recipient_id: String,
    pub postal_code: String,
    pub year: i32,
}

/// Aggregation unit for running statistics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub recipient_id: String,
    pub postal_code: String,
    pub year: i32,
}

/// A validated contribution. Fields are private so a malformed record
/// cannot be assembled outside [`DonationRecord::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct DonationRecord {
    recipient_id: String,
    donor_key: DonorKey,
    transaction_year: i32,
    amount: f64,
}

impl DonationRecord {
    pub fn new(
        recipient_id: impl Into<String>,
        donor_name: impl Into<String>,
        postal_code: impl Into<String>,
        transaction_year: i32,
        amount: f64,
    ) -> Result<Self, RecordError> {
        let recipient_id = recipient_id.into();
        let name = donor_name.into();
        let postal_code = postal_code.into();
        if recipient_id.is_empty() {
            return Err(RecordError::malformed("CMTE_ID", "is empty"));
        }
        if name.is_empty() {
            return Err(RecordError::malformed("NAME", "is empty"));
        }
        if postal_code.chars().count() != ZIP_CODE_LEN {
            return Err(RecordError::malformed("ZIP_CODE", "is not 5 characters"));
        }
        if !amount.is_finite() || amount.abs() >= MAX_ABS_AMOUNT {
            return Err(RecordError::parse("TRANSACTION_AMT", &amount.to_string()));
        }
        Ok(Self {
            recipient_id,
            donor_key: DonorKey { name, postal_code },
            transaction_year,
            amount,
        })
    }

    pub fn recipient_id(&self) -> &str {
        &self.recipient_id
    }

    pub fn donor_key(&self) -> &DonorKey {
        &self.donor_key
    }

    pub fn postal_code(&self) -> &str {
        &self.donor_key.postal_code
    }

    pub fn transaction_year(&self) -> i32 {
        self.transaction_year
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            recipient_id: self.recipient_id.clone(),
            postal_code: self.donor_key.postal_code.clone(),
            year: self.transaction_year,
        }
    }
}

/// One output line: running statistics of a group right after a repeat
/// donation joined it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatDonorSummary {
    pub recipient_id: String,
    pub postal_code: String,
    pub year: i32,
    pub percentile_value: i64,
    pub running_total: i128,
    pub running_count: usize,
}

impl fmt::Display for RepeatDonorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = OUTPUT_DELIMITER;
        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            self.recipient_id,
            self.postal_code,
            self.year,
            self.percentile_value,
            self.running_total,
            self.running_count,
        )
    }
}
