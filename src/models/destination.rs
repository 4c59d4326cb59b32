//! Destination model.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Geographic position of a destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    #[serde(default, deserialize_with = "lenient::number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub longitude: Option<f64>,
}

/// A destination as returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Server-assigned identity
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub best_time_to_visit: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<String>,
}

impl Destination {
    /// "name, country", or just the name when the country is unknown.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// An entry in a destination picker: the stored id plus a human label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationChoice {
    pub id: String,
    pub label: String,
}

/// Picker entries for every destination that has an identity.
pub fn destination_choices(destinations: &[Destination]) -> Vec<DestinationChoice> {
    destinations
        .iter()
        .filter_map(|d| {
            d.id.as_ref().map(|id| DestinationChoice {
                id: id.clone(),
                label: d.label(),
            })
        })
        .collect()
}

/// Coordinates as submitted: always both axes, possibly not-a-number.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoordinatesPayload {
    pub latitude: f64,
    pub longitude: f64,
}

/// Request body for creating or updating a destination.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationPayload {
    pub name: String,
    pub country: String,
    pub description: String,
    pub coordinates: CoordinatesPayload,
    pub best_time_to_visit: String,
    pub currency: String,
    pub language: String,
}
