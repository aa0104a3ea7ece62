use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::ConfigError;

pub const FIELD_DELIMITER: char = '|';
pub const OUTPUT_DELIMITER: &str = "|";

// Column positions in an FEC itcont line.
pub const CMTE_ID_FIELD: usize = 0;
pub const NAME_FIELD: usize = 7;
pub const ZIP_CODE_FIELD: usize = 10;
pub const TRANSACTION_DT_FIELD: usize = 13;
pub const TRANSACTION_AMT_FIELD: usize = 14;
pub const OTHER_ID_FIELD: usize = 15;
pub const MIN_FIELD_COUNT: usize = OTHER_ID_FIELD + 1;

pub const ZIP_CODE_LEN: usize = 5;
pub const TRANSACTION_DT_LEN: usize = 8;
pub const YEAR_LEN: usize = 4;

/// Largest accepted `|TRANSACTION_AMT|`; beyond 2^53 an f64 no longer holds
/// every whole currency unit.
pub const MAX_ABS_AMOUNT: f64 = 9_007_199_254_740_992.0;

/// Preferred member name when an input is a `.7z` archive.
pub const ARCHIVE_MEMBER: &str = "itcont.txt";
pub const INPUT_EXTENSIONS: [&str; 2] = ["txt", "7z"];

pub const PROGRESS_EVERY_LINES: u64 = 100_000;

/// Nearest-rank percentile in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percentile(u8);

impl Percentile {
    pub fn new(value: i64) -> Result<Self, ConfigError> {
        match value {
            0..=100 => Ok(Percentile(value as u8)),
            _ => Err(ConfigError::PercentileOutOfRange(value)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let line = raw
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or(ConfigError::EmptyPercentile)?;
        let value: i64 = line
            .parse()
            .map_err(|_| ConfigError::InvalidPercentile(line.to_string()))?;
        Percentile::new(value)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Percentile::parse(&raw)
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
