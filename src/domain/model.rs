use crate::utils::error::FitmentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed interval of model years. Always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearRange {
    start: u16,
    end: u16,
}

impl YearRange {
    pub fn new(start: u16, end: u16) -> Result<Self, FitmentError> {
        if start > end {
            return Err(FitmentError::InvalidYearRange {
                input: format!("{}-{}", start, end),
                reason: "start year is after end year".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn single(year: u16) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn contains(&self, year: u16) -> bool {
        self.start <= year && year <= self.end
    }
}

fn parse_year(input: &str, part: &str) -> Result<u16, FitmentError> {
    let part = part.trim();
    if part.len() != 4 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FitmentError::InvalidYearRange {
            input: input.to_string(),
            reason: format!("'{}' is not a four-digit year", part),
        });
    }
    part.parse::<u16>()
        .map_err(|e| FitmentError::InvalidYearRange {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

impl FromStr for YearRange {
    type Err = FitmentError;

    /// Accepts `"YYYY"` or `"YYYY-YYYY"` (hyphen or en dash).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FitmentError::InvalidYearRange {
                input: s.to_string(),
                reason: "empty year range".to_string(),
            });
        }

        let parts: Vec<&str> = trimmed.split(['-', '–']).collect();
        match parts.as_slice() {
            [year] => Ok(Self::single(parse_year(s, year)?)),
            [start, end] => {
                let start = parse_year(s, start)?;
                let end = parse_year(s, end)?;
                Self::new(start, end).map_err(|_| FitmentError::InvalidYearRange {
                    input: s.to_string(),
                    reason: "start year is after end year".to_string(),
                })
            }
            _ => Err(FitmentError::InvalidYearRange {
                input: s.to_string(),
                reason: "expected YYYY or YYYY-YYYY".to_string(),
            }),
        }
    }
}

impl TryFrom<String> for YearRange {
    type Error = FitmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearRange> for String {
    fn from(range: YearRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:04}", self.start, self.end)
    }
}

/// One vehicle a product fits. `None` in `model` or `year_range` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompatibilityEntry {
    pub make: String,
    pub model: Option<String>,
    pub year_range: Option<YearRange>,
}

impl CompatibilityEntry {
    /// Blank models are stored as `None` so that `""` and absent compare equal.
    pub fn new(
        make: impl Into<String>,
        model: Option<String>,
        year_range: Option<YearRange>,
    ) -> Self {
        Self {
            make: make.into().trim().to_string(),
            model: model
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            year_range,
        }
    }

    pub fn exact(make: &str, model: &str, year_range: YearRange) -> Self {
        Self::new(make, Some(model.to_string()), Some(year_range))
    }

    pub fn is_universal_model(&self) -> bool {
        self.model.is_none()
    }

    pub fn is_universal_year(&self) -> bool {
        self.year_range.is_none()
    }
}

impl fmt::Display for CompatibilityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.make)?;
        match &self.model {
            Some(model) => write!(f, " {}", model)?,
            None => write!(f, " (all models)")?,
        }
        match &self.year_range {
            Some(range) => write!(f, " {}", range),
            None => write!(f, " (all years)"),
        }
    }
}

/// Free-text grouping shown on the product page, e.g. a list of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub label: String,
    pub value: String,
}

impl CustomField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.value.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}
