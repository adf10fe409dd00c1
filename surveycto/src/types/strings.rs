use aliri_braid::braid;

/// SurveyCTO user's username.
#[braid(serde)]
pub struct Username;

/// The form ID of a SurveyCTO form, e.g. `household_survey`.
#[braid(serde)]
pub struct FormId;

/// ID of a server dataset.
#[braid(serde)]
pub struct DatasetId;

/// Name of a repeat group as it appears in the form's file listing,
/// e.g. `household_members`. The top-level data is named [MAIN].
#[braid(serde)]
pub struct RepeatGroupName;

/// Name of the synthetic repeat group which holds the top-level form data.
pub const MAIN: &str = "Main";
