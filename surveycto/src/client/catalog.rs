use crate::errors::SctoError;
use crate::types::{RepeatGroupName, MAIN};
use itertools::Itertools;

/// Data URLs of a form's top-level data and repeat groups, in the order
/// given by the form files listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatGroupCatalog(Vec<(RepeatGroupName, String)>);

impl RepeatGroupCatalog {
    /// Parse the newline-separated URL listing of `api/v1/forms/files/csv`.
    ///
    /// The first URL is the top-level data, named [MAIN]. Every other URL
    /// is named by what follows the first URL and a `/`.
    pub fn parse(listing: &str) -> Self {
        let mut urls = listing.lines().map(str::trim).filter(|l| !l.is_empty());
        let Some(base) = urls.next() else {
            return Self(Vec::new());
        };
        let prefix = format!("{}/", base);
        let groups = urls.map(|url| {
            let name = url.strip_prefix(&prefix).unwrap_or(url);
            (RepeatGroupName::from(name), url.to_string())
        });
        let entries = std::iter::once((RepeatGroupName::from(MAIN), base.to_string()))
            .chain(groups)
            .unique_by(|(name, _)| name.clone())
            .collect();
        Self(entries)
    }

    /// Catalog of repeat groups only, without [MAIN].
    pub fn without_main(self) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|(name, _)| name.as_str() != MAIN)
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, url)| url.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &RepeatGroupName> {
        self.0.iter().map(|(n, _)| n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RepeatGroupName, &str)> {
        self.0.iter().map(|(n, url)| (n, url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a repeat group by name. The catalog must not contain [MAIN].
    pub(crate) fn require(&self, name: &RepeatGroupName) -> Result<&str, SctoError> {
        if self.is_empty() {
            return Err(SctoError::InvalidArgument(
                "No repeat groups found in the specified SurveyCTO form.".to_string(),
            ));
        }
        self.get(name.as_str()).ok_or_else(|| {
            SctoError::InvalidArgument(format!(
                "Wrong repeat group name passed in arguments. Available repeat groups are: {}",
                self.names().join(", ")
            ))
        })
    }
}
