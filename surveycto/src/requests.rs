//! Defines models for requests sent to SurveyCTO, and the rules for
//! which combinations of options are allowed.

use crate::errors::SctoError;
use crate::models::Warning;
use crate::types::*;
use bytes::Bytes;

/// Options for [crate::SurveyCtoClient::get_form_data].
///
/// ```
/// use surveycto::requests::FormDataRequest;
/// use surveycto::types::{OutputFormat, Shape};
///
/// let request = FormDataRequest::new("household_survey")
///     .format(OutputFormat::Csv)
///     .shape(Shape::Long)
///     .review_statuses(["approved", "pending"]);
/// assert!(request.plan().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FormDataRequest {
    form_id: FormId,
    format: OutputFormat,
    shape: Shape,
    oldest_completion_date: Option<CompletionDate>,
    review_statuses: Option<Vec<String>>,
    repeat_groups: Option<bool>,
    line_breaks: Option<String>,
    key: Option<Bytes>,
}

/// What a [FormDataRequest] resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `api/v1/forms/data/wide/csv`
    WideCsv(ReviewStatuses),
    /// `api/v1/forms/data/csv`, top-level data only.
    LongCsv(ReviewStatuses),
    /// The top-level data and every repeat group, from the form files listing.
    RepeatGroups(ReviewStatuses),
    /// `api/v1/forms/data/wide/json`
    JsonByStatus(ReviewStatuses),
    /// `api/v2/forms/data/wide/json`, all dates if `None`.
    JsonSince(Option<CompletionDate>),
}

/// A validated [FormDataRequest].
#[derive(Debug, Clone)]
pub struct FormDataPlan<'a> {
    pub form_id: &'a FormId,
    pub target: Target,
    /// Only set for CSV targets.
    pub line_breaks: Option<&'a str>,
    pub key: Option<&'a [u8]>,
    pub warnings: Vec<Warning>,
}

impl FormDataRequest {
    pub fn new(form_id: impl Into<FormId>) -> Self {
        Self {
            form_id: form_id.into(),
            format: OutputFormat::default(),
            shape: Shape::default(),
            oldest_completion_date: None,
            review_statuses: None,
            repeat_groups: None,
            line_breaks: None,
            key: None,
        }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Only return submissions completed after this date (UTC). JSON only.
    pub fn oldest_completion_date(mut self, date: impl Into<CompletionDate>) -> Self {
        self.oldest_completion_date = Some(date.into());
        self
    }

    /// Only return submissions with these review statuses. Allowed values
    /// are `approved`, `pending` and `rejected`. Checked by [Self::plan].
    pub fn review_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.review_statuses = Some(statuses.into_iter().map(Into::into).collect());
        self
    }

    /// Whether long CSV data should include the repeat groups (default: yes).
    pub fn repeat_groups(mut self, repeat_groups: bool) -> Self {
        self.repeat_groups = Some(repeat_groups);
        self
    }

    /// Replace line breaks in CSV data with this string.
    pub fn line_breaks(mut self, replacement: impl Into<String>) -> Self {
        self.line_breaks = Some(replacement.into());
        self
    }

    /// Private key for decrypting encrypted form data. JSON only.
    pub fn key(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }

    /// Check the combination of options and decide which endpoint to use.
    ///
    /// Errors are returned for invalid values and for combinations which
    /// cannot be served. Options which are merely ignored are reported
    /// as [Warning]s.
    pub fn plan(&self) -> Result<FormDataPlan<'_>, SctoError> {
        let explicit_statuses = self
            .review_statuses
            .as_ref()
            .map(ReviewStatuses::parse)
            .transpose()?;
        let mut warnings = Vec::new();

        let (target, line_breaks) = match self.format {
            OutputFormat::Csv => {
                if self.key.is_some() {
                    return Err(SctoError::encrypted_extraction());
                }
                if self.oldest_completion_date.is_some() {
                    warnings.push(Warning::DateIgnoredForCsv);
                }
                let statuses = explicit_statuses.unwrap_or_default();
                let target = match (self.shape, self.repeat_groups) {
                    (Shape::Wide, repeat_groups) => {
                        if repeat_groups.is_some() {
                            warnings.push(Warning::RepeatGroupsIgnored);
                        }
                        Target::WideCsv(statuses)
                    }
                    (Shape::Long, Some(false)) => Target::LongCsv(statuses),
                    (Shape::Long, _) => Target::RepeatGroups(statuses),
                };
                (target, self.line_breaks.as_deref())
            }
            OutputFormat::Json => {
                if self.shape != Shape::Wide {
                    warnings.push(Warning::ShapeForcedWide);
                }
                if self.repeat_groups.is_some() {
                    warnings.push(Warning::RepeatGroupsIgnored);
                }
                if self.line_breaks.is_some() {
                    warnings.push(Warning::LineBreaksIgnored);
                }
                if self.key.is_some() && explicit_statuses.is_some() {
                    return Err(SctoError::encrypted_extraction());
                }
                let target = match (self.oldest_completion_date, explicit_statuses) {
                    (Some(date), Some(_)) => {
                        warnings.push(Warning::ReviewStatusIgnoredWithDate);
                        Target::JsonSince(Some(date))
                    }
                    (Some(date), None) => Target::JsonSince(Some(date)),
                    (None, Some(statuses)) => Target::JsonByStatus(statuses),
                    (None, None) => Target::JsonSince(None),
                };
                (target, None)
            }
        };

        Ok(FormDataPlan {
            form_id: &self.form_id,
            target,
            line_breaks,
            key: self.key.as_deref(),
            warnings,
        })
    }
}

/// Options for [crate::SurveyCtoClient::get_repeatgroup].
#[derive(Debug, Clone)]
pub struct RepeatGroupRequest {
    form_id: FormId,
    group: RepeatGroupName,
    review_statuses: Option<Vec<String>>,
    line_breaks: Option<String>,
}

impl RepeatGroupRequest {
    pub fn new(form_id: impl Into<FormId>, group: impl Into<RepeatGroupName>) -> Self {
        Self {
            form_id: form_id.into(),
            group: group.into(),
            review_statuses: None,
            line_breaks: None,
        }
    }

    /// Only return submissions with these review statuses (default: `approved`).
    pub fn review_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.review_statuses = Some(statuses.into_iter().map(Into::into).collect());
        self
    }

    /// Replace line breaks in CSV data with this string.
    pub fn line_breaks(mut self, replacement: impl Into<String>) -> Self {
        self.line_breaks = Some(replacement.into());
        self
    }

    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }

    pub fn group(&self) -> &RepeatGroupName {
        &self.group
    }

    pub fn line_break_replacement(&self) -> Option<&str> {
        self.line_breaks.as_deref()
    }

    /// Validated review statuses, defaulting to `approved`.
    pub fn statuses(&self) -> Result<ReviewStatuses, SctoError> {
        self.review_statuses
            .as_ref()
            .map(ReviewStatuses::parse)
            .unwrap_or_else(|| Ok(ReviewStatuses::default()))
    }
}
