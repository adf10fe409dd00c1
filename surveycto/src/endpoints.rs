//! URLs of the SurveyCTO REST API.

use crate::types::*;

/// Builds endpoint URLs under a [ServerUrl].
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: ServerUrl,
}

impl Endpoints {
    pub fn new(base: ServerUrl) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &ServerUrl {
        &self.base
    }

    pub fn root(&self) -> String {
        self.base.to_string()
    }

    pub fn login(&self) -> String {
        format!("{}/login", self.base)
    }

    pub fn form_design(&self, form_id: &FormId) -> String {
        format!("{}/forms/{}/design", self.base, form_id)
    }

    /// Line-break replacement setting for CSV data. With `None`, the URL
    /// is used with DELETE to restore the default.
    pub fn line_break_setting(&self, line_breaks: Option<&str>) -> String {
        let url = format!("{}/api/v1/forms/settings/csv/linebreak", self.base);
        match line_breaks {
            Some(value) => format!("{}?v={}", url, urlencoding::encode(value)),
            None => url,
        }
    }

    /// Newline-separated list of the CSV file URLs of a form: the top-level
    /// data first, then one for each repeat group.
    pub fn form_files(&self, form_id: &FormId) -> String {
        format!("{}/api/v1/forms/files/csv/{}", self.base, form_id)
    }

    pub fn wide_csv(&self, form_id: &FormId, statuses: &ReviewStatuses) -> String {
        format!(
            "{}/api/v1/forms/data/wide/csv/{}?r={}",
            self.base,
            form_id,
            statuses.to_query()
        )
    }

    pub fn long_csv(&self, form_id: &FormId, statuses: &ReviewStatuses) -> String {
        format!(
            "{}/api/v1/forms/data/csv/{}?r={}",
            self.base,
            form_id,
            statuses.to_query()
        )
    }

    pub fn repeat_group_csv(
        &self,
        form_id: &FormId,
        group: &RepeatGroupName,
        statuses: &ReviewStatuses,
    ) -> String {
        format!(
            "{}/api/v1/forms/data/csv/{}/{}?r={}",
            self.base,
            form_id,
            group,
            statuses.to_query()
        )
    }

    /// v1 JSON API, filtered by review status.
    pub fn wide_json_by_status(&self, form_id: &FormId, statuses: &ReviewStatuses) -> String {
        format!(
            "{}/api/v1/forms/data/wide/json/{}?r={}",
            self.base,
            form_id,
            statuses.to_query()
        )
    }

    /// v2 JSON API, filtered by completion date. `None` means all dates.
    pub fn wide_json_since(
        &self,
        form_id: &FormId,
        since: Option<&CompletionDate>,
    ) -> Result<String, crate::errors::SctoError> {
        let date = match since {
            Some(d) => d.to_query()?,
            None => "0".to_string(),
        };
        Ok(format!(
            "{}/api/v2/forms/data/wide/json/{}?date={}",
            self.base, form_id, date
        ))
    }

    pub fn dataset_csv(&self, dataset_id: &DatasetId) -> String {
        format!("{}/api/v2/datasets/data/csv/{}", self.base, dataset_id)
    }
}

/// Append the review status filter to a URL from the form files listing.
pub(crate) fn with_statuses(url: &str, statuses: &ReviewStatuses) -> String {
    format!("{}?r={}", url, statuses.to_query())
}
