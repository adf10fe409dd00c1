//! Values returned by [crate::SurveyCtoClient].

use crate::types::RepeatGroupName;
use std::fmt::{Display, Formatter};

/// Form data as returned by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum FormData {
    Csv(String),
    Json(serde_json::Value),
    /// Long CSV data of the top-level form and each of its repeat groups.
    RepeatGroups(RepeatGroupData),
}

impl FormData {
    pub fn as_csv(&self) -> Option<&str> {
        match self {
            Self::Csv(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_repeat_groups(&self) -> Option<&RepeatGroupData> {
        match self {
            Self::RepeatGroups(groups) => Some(groups),
            _ => None,
        }
    }
}

/// CSV text of repeat groups, in the order the server lists them.
/// The first entry is always [crate::types::MAIN].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatGroupData(Vec<(RepeatGroupName, String)>);

impl RepeatGroupData {
    pub(crate) fn push(&mut self, name: RepeatGroupName, csv: String) {
        self.0.push((name, csv))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, csv)| csv.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &RepeatGroupName> {
        self.0.iter().map(|(n, _)| n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RepeatGroupName, &str)> {
        self.0.iter().map(|(n, csv)| (n, csv.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for RepeatGroupData {
    type Item = (RepeatGroupName, String);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// An option which was given but does not apply to the request,
/// and was therefore ignored or overridden.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Warning {
    /// `oldest_completion_date` was given for CSV data.
    DateIgnoredForCsv,
    /// `shape=long` was given for JSON data.
    ShapeForcedWide,
    /// `repeat_groups` was given for wide data.
    RepeatGroupsIgnored,
    /// `line_breaks` was given for JSON data.
    LineBreaksIgnored,
    /// Review statuses were given together with a completion date for JSON data.
    ReviewStatusIgnoredWithDate,
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::DateIgnoredForCsv => {
                "'oldest_completion_date' can only be specified when returning data in json format. \
                Returning data for all dates."
            }
            Self::ShapeForcedWide => {
                "Shape can only be specified when returning data in csv format. \
                Returning data in 'wide' format."
            }
            Self::RepeatGroupsIgnored => {
                "Repeat groups can only be specified when returning data in csv long format. \
                Returning data for all repeat groups."
            }
            Self::LineBreaksIgnored => {
                "Line breaks can only be specified when returning data in csv format."
            }
            Self::ReviewStatusIgnoredWithDate => {
                "Review status can only be specified when returning data without a date filter. \
                Returning data for 'approved' review status."
            }
        };
        f.write_str(msg)
    }
}
