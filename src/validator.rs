use crate::config::{
    CMTE_ID_FIELD, FIELD_DELIMITER, MIN_FIELD_COUNT, NAME_FIELD, OTHER_ID_FIELD,
    TRANSACTION_AMT_FIELD, TRANSACTION_DT_FIELD, TRANSACTION_DT_LEN, YEAR_LEN, ZIP_CODE_FIELD,
    ZIP_CODE_LEN,
};
use crate::errors::RecordError;
use crate::model::DonationRecord;

fn leading_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn trailing_chars(s: &str, n: usize) -> &str {
    let total = s.chars().count();
    if total <= n {
        return s;
    }
    match s.char_indices().nth(total - n) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// Parses one `|`-delimited itcont line into a record.
///
/// Only the columns the analysis needs are inspected. Postal codes longer
/// than five characters (ZIP+4) are cut to the first five; the year is the
/// last four characters of `TRANSACTION_DT` (`MMDDYYYY`).
pub fn parse_record(line: &str) -> Result<DonationRecord, RecordError> {
    let fields: Vec<&str> = line
        .trim_end_matches(['\r', '\n'])
        .split(FIELD_DELIMITER)
        .collect();
    if fields.len() < MIN_FIELD_COUNT {
        return Err(RecordError::malformed("line", "has too few fields"));
    }

    let cmte_id = fields[CMTE_ID_FIELD];
    if cmte_id.is_empty() {
        return Err(RecordError::malformed("CMTE_ID", "is empty"));
    }

    let name = fields[NAME_FIELD];
    if name.is_empty() {
        return Err(RecordError::malformed("NAME", "is empty"));
    }

    let zip_code = fields[ZIP_CODE_FIELD];
    if zip_code.chars().count() < ZIP_CODE_LEN {
        return Err(RecordError::malformed("ZIP_CODE", "is shorter than 5"));
    }

    let transaction_dt = fields[TRANSACTION_DT_FIELD];
    if transaction_dt.chars().count() < TRANSACTION_DT_LEN {
        return Err(RecordError::malformed("TRANSACTION_DT", "is shorter than 8"));
    }

    let raw_amount = fields[TRANSACTION_AMT_FIELD];
    let amount: f64 = raw_amount
        .trim()
        .parse()
        .map_err(|_| RecordError::parse("TRANSACTION_AMT", raw_amount))?;

    if !fields[OTHER_ID_FIELD].is_empty() {
        return Err(RecordError::malformed("OTHER_ID", "is not empty"));
    }

    let raw_year = trailing_chars(transaction_dt, YEAR_LEN);
    let year: i32 = raw_year
        .parse()
        .map_err(|_| RecordError::parse("TRANSACTION_DT", transaction_dt))?;

    DonationRecord::new(
        cmte_id,
        name,
        leading_chars(zip_code, ZIP_CODE_LEN),
        year,
        amount,
    )
}
