use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// A hotel suggestion as returned by the service.
///
/// `amenities` keeps the category order of the JSON object, which is the
/// order amenity chips are displayed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub local_tips: Vec<String>,
    #[serde(default)]
    pub url: String,
}
