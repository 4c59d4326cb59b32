//! Hotel model.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Destination fields the backend embeds when it populates a hotel's reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DestinationSummary {
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
}

/// A hotel's destination: either the bare id or a populated record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DestinationRef {
    Id(String),
    Populated(DestinationSummary),
}

impl DestinationRef {
    /// The referenced destination's id, whichever shape it arrived in.
    pub fn id(&self) -> Option<&str> {
        match self {
            DestinationRef::Id(id) => Some(id),
            DestinationRef::Populated(summary) => summary.id.as_deref(),
        }
    }

    /// "name, country" when the backend populated the reference.
    pub fn label(&self) -> Option<String> {
        match self {
            DestinationRef::Id(_) => None,
            DestinationRef::Populated(summary) if summary.country.is_empty() => {
                Some(summary.name.clone())
            }
            DestinationRef::Populated(summary) => Some(format!(
                "{}, {}",
                summary.name, summary.country
            )),
        }
    }
}

/// A point of interest near a hotel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NearbyAttraction {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub distance: Option<String>,
}

/// Hotel contact details; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Room type offered by a hotel. Read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_per_night: Option<f64>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub amenities: Vec<String>,
}

/// Landmark with a numeric distance. Read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearbyLandmark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance_in_km: Option<f64>,
}

/// A hotel as returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Server-assigned identity
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<DestinationRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub star_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub guest_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_per_night: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub hotel_amenities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub nearby_attractions: Vec<NearbyAttraction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub room_categories: Vec<RoomCategory>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub nearby_landmarks: Vec<NearbyLandmark>,
}

/// Attraction as submitted: both parts always present.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttractionPayload {
    pub name: String,
    pub distance: String,
}

/// Contact details as submitted: blank strings for unset fields.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoPayload {
    pub phone_number: String,
    pub email: String,
    pub website: String,
}

/// Request body for creating or updating a hotel.
///
/// `star_rating` is `None` when the entered text was not an integer; it is then sent
/// as `null` and left to the backend to reject.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelPayload {
    pub name: String,
    pub destination_id: String,
    pub address: String,
    pub star_rating: Option<i64>,
    pub guest_rating: f64,
    pub price_per_night: f64,
    pub image_url: String,
    pub hotel_amenities: Vec<String>,
    pub nearby_attractions: Vec<AttractionPayload>,
    pub contact_info: ContactInfoPayload,
}
