use crate::errors::SctoError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Format of returned form data.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Shape of returned CSV form data.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// One row per submission, repeat groups flattened into columns.
    #[default]
    Wide,
    /// One table per repeat group.
    Long,
}

/// Review status of a submission in the "Review and Corrections" workflow.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Approved,
    Pending,
    Rejected,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Wide => "wide",
            Shape::Long => "long",
        }
    }
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Pending => "pending",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SctoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(SctoError::InvalidArgument(format!(
                "Support for downloading data in '{}' format is currently not available. \
                Allowed values are: 'json' and 'csv'.",
                s
            ))),
        }
    }
}

impl FromStr for Shape {
    type Err = SctoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wide" => Ok(Shape::Wide),
            "long" => Ok(Shape::Long),
            _ => Err(SctoError::InvalidArgument(
                "Wrong value passed in 'shape'. Allowed values are 'long' and 'wide'.".to_string(),
            )),
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = SctoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewStatus::Approved),
            "pending" => Ok(ReviewStatus::Pending),
            "rejected" => Ok(ReviewStatus::Rejected),
            _ => Err(SctoError::InvalidArgument(
                "Wrong value passed in 'review_status'. \
                Allowed values are 'approved', 'rejected' and 'pending'."
                    .to_string(),
            )),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for ReviewStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty set of [ReviewStatus], kept in the order given.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReviewStatuses(Vec<ReviewStatus>);

impl ReviewStatuses {
    /// Validate review status names. Duplicates are dropped.
    pub fn parse<I, S>(statuses: I) -> Result<Self, SctoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed: Vec<ReviewStatus> = statuses
            .into_iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from_iter(parsed)
    }

    pub fn try_from_iter(statuses: impl IntoIterator<Item = ReviewStatus>) -> Result<Self, SctoError> {
        let statuses: Vec<ReviewStatus> = statuses.into_iter().unique().collect();
        if statuses.is_empty() {
            Err(SctoError::InvalidArgument(
                "'review_status' must contain at least one of 'approved', 'rejected' and 'pending'."
                    .to_string(),
            ))
        } else {
            Ok(Self(statuses))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReviewStatus> {
        self.0.iter()
    }

    /// Value of the `r` query parameter, e.g. `approved,pending`
    pub fn to_query(&self) -> String {
        self.0.iter().map(ReviewStatus::as_str).join(",")
    }
}

impl Default for ReviewStatuses {
    fn default() -> Self {
        Self(vec![ReviewStatus::Approved])
    }
}

impl Display for ReviewStatuses {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(&["approved"], "approved")]
    #[case(&["approved", "pending", "rejected"], "approved,pending,rejected")]
    #[case(&["rejected", "approved", "rejected"], "rejected,approved")]
    fn test_review_statuses_query(#[case] given: &[&str], #[case] expected: &str) {
        assert_eq!(ReviewStatuses::parse(given).unwrap().to_query(), expected)
    }

    #[rstest]
    #[case(&["approved", "WrongValue"])]
    #[case(&["Approved"])]
    #[case(&[])]
    fn test_review_statuses_invalid(#[case] given: &[&str]) {
        assert!(matches!(
            ReviewStatuses::parse(given).unwrap_err(),
            SctoError::InvalidArgument(_)
        ))
    }

    #[test]
    fn test_default_review_status() {
        assert_eq!(ReviewStatuses::default().to_query(), "approved")
    }

    #[rstest]
    #[case("tall")]
    #[case("WIDE")]
    fn test_shape_invalid(#[case] given: &str) {
        assert!(matches!(
            given.parse::<Shape>().unwrap_err(),
            SctoError::InvalidArgument(_)
        ))
    }

    #[test]
    fn test_format_invalid() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.to_string().contains("'xml'"))
    }
}
