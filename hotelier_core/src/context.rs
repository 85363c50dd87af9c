use serde::{Deserialize, Serialize};

/// Preferences the assistant has extracted from the conversation so far.
///
/// The service owns this record. The client mirrors it verbatim and replaces
/// it wholesale on every successful chat turn; it never merges fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub preferred_amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_type: Option<String>,
    #[serde(default)]
    pub special_requirements: Vec<String>,
}

impl UserContext {
    /// True when nothing has been extracted yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.check_in_date.is_none()
            && self.check_out_date.is_none()
            && self.guests.is_none()
            && self.budget_range.is_none()
            && self.hotel_type.is_none()
            && self.preferred_amenities.is_empty()
            && self.special_requirements.is_empty()
    }
}
