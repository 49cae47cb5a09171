//! Configuration options for the consolidation pipeline.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Options controlling a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Date at which ages are computed.
    ///
    /// Runs with the same input and the same reference date produce
    /// identical reports.
    pub reference_date: NaiveDate,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the reference date used for age computation.
    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialize() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date");
        let options = PipelineOptions::new().with_reference_date(date);
        let json = serde_json::to_string(&options).expect("serialize options");
        assert_eq!(json, r#"{"reference_date":"2024-06-30"}"#);
        let round: PipelineOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round, options);
    }
}
