//! Entity kinds managed by the console.
//!
//! A kind describes everything the generic form and list need to know about one
//! record type: its editable fields, which of them are required, how form text turns
//! into a request body, and which client calls persist it.

use std::fmt::Debug;
use std::future::Future;

use serde::Serialize;

use crate::client::CatalogClient;
use crate::coerce;
use crate::errors::ClientError;
use crate::models::{
    ContactInfoPayload, CoordinatesPayload, Destination, DestinationPayload, Hotel, HotelPayload,
};

/// Schema and persistence hooks for one record type.
pub trait EntityKind: 'static {
    /// Record as returned by the backend.
    type Record: Clone + Debug + Send + Sync;
    /// Editable text state of the form.
    type Fields: Clone + Default + PartialEq + Debug + Send;
    /// Request body sent on create and update.
    type Payload: Serialize + Clone + Debug + Send + Sync;

    /// Capitalized singular name, e.g. `Hotel`.
    const LABEL: &'static str;

    fn record_id(record: &Self::Record) -> Option<&str>;

    /// Form state for editing `record`; absent optional values become blanks.
    fn hydrate(record: &Self::Record) -> Self::Fields;

    /// The text slot addressed by `path` (`name` or `parent.child`).
    fn field_mut<'a>(fields: &'a mut Self::Fields, path: &str) -> Option<&'a mut String>;

    /// Every field path with its current text, in form order.
    fn field_values(fields: &Self::Fields) -> Vec<(&'static str, &str)>;

    /// Paths of required fields that are blank, in form order.
    fn missing_required(fields: &Self::Fields) -> Vec<&'static str>;

    /// Submit-time transform from form text to request body.
    fn to_payload(fields: &Self::Fields) -> Self::Payload;

    fn list(
        client: &CatalogClient,
    ) -> impl Future<Output = Result<Vec<Self::Record>, ClientError>> + Send;

    /// Save a new record. `Ok` means the backend accepted it; the echoed record is
    /// `None` when the response body could not be read as one.
    fn create(
        client: &CatalogClient,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<Option<Self::Record>, ClientError>> + Send;

    fn update(
        client: &CatalogClient,
        id: &str,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<Option<Self::Record>, ClientError>> + Send;

    fn delete(client: &CatalogClient, id: &str)
        -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Lowercase singular name used in messages.
    fn noun() -> String {
        Self::LABEL.to_lowercase()
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ==================== DESTINATION ====================

/// Destination records.
#[derive(Debug, Clone, Copy)]
pub struct DestinationKind;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateFields {
    pub latitude: String,
    pub longitude: String,
}

/// Editable state of the destination form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationFields {
    pub name: String,
    pub country: String,
    pub description: String,
    pub coordinates: CoordinateFields,
    pub best_time_to_visit: String,
    pub currency: String,
    pub language: String,
}

impl EntityKind for DestinationKind {
    type Record = Destination;
    type Fields = DestinationFields;
    type Payload = DestinationPayload;

    const LABEL: &'static str = "Destination";

    fn record_id(record: &Destination) -> Option<&str> {
        record.id.as_deref()
    }

    fn hydrate(record: &Destination) -> DestinationFields {
        let coordinates = record.coordinates.clone().unwrap_or_default();
        DestinationFields {
            name: record.name.clone(),
            country: record.country.clone(),
            description: record.description.clone(),
            coordinates: CoordinateFields {
                latitude: coerce::number_text(coordinates.latitude),
                longitude: coerce::number_text(coordinates.longitude),
            },
            best_time_to_visit: record.best_time_to_visit.clone().unwrap_or_default(),
            currency: record.currency.clone().unwrap_or_default(),
            language: record.language.clone().unwrap_or_default(),
        }
    }

    fn field_mut<'a>(fields: &'a mut DestinationFields, path: &str) -> Option<&'a mut String> {
        let slot = match path {
            "name" => &mut fields.name,
            "country" => &mut fields.country,
            "description" => &mut fields.description,
            "coordinates.latitude" => &mut fields.coordinates.latitude,
            "coordinates.longitude" => &mut fields.coordinates.longitude,
            "bestTimeToVisit" => &mut fields.best_time_to_visit,
            "currency" => &mut fields.currency,
            "language" => &mut fields.language,
            _ => return None,
        };
        Some(slot)
    }

    fn field_values(fields: &DestinationFields) -> Vec<(&'static str, &str)> {
        vec![
            ("name", fields.name.as_str()),
            ("country", fields.country.as_str()),
            ("description", fields.description.as_str()),
            ("coordinates.latitude", fields.coordinates.latitude.as_str()),
            ("coordinates.longitude", fields.coordinates.longitude.as_str()),
            ("bestTimeToVisit", fields.best_time_to_visit.as_str()),
            ("currency", fields.currency.as_str()),
            ("language", fields.language.as_str()),
        ]
    }

    fn missing_required(fields: &DestinationFields) -> Vec<&'static str> {
        [
            ("name", &fields.name),
            ("country", &fields.country),
            ("description", &fields.description),
            ("coordinates.latitude", &fields.coordinates.latitude),
            ("coordinates.longitude", &fields.coordinates.longitude),
        ]
        .into_iter()
        .filter(|(_, value)| blank(value))
        .map(|(path, _)| path)
        .collect()
    }

    fn to_payload(fields: &DestinationFields) -> DestinationPayload {
        let latitude = coerce::parse_float(&fields.coordinates.latitude);
        let longitude = coerce::parse_float(&fields.coordinates.longitude);
        if latitude.is_nan() || longitude.is_nan() {
            tracing::warn!(
                "Submitting non-numeric coordinates ({:?}, {:?})",
                fields.coordinates.latitude,
                fields.coordinates.longitude
            );
        }

        DestinationPayload {
            name: fields.name.clone(),
            country: fields.country.clone(),
            description: fields.description.clone(),
            coordinates: CoordinatesPayload {
                latitude,
                longitude,
            },
            best_time_to_visit: fields.best_time_to_visit.clone(),
            currency: fields.currency.clone(),
            language: fields.language.clone(),
        }
    }

    async fn list(client: &CatalogClient) -> Result<Vec<Destination>, ClientError> {
        client.list_destinations().await
    }

    async fn create(
        client: &CatalogClient,
        payload: &DestinationPayload,
    ) -> Result<Option<Destination>, ClientError> {
        client.create_destination(payload).await
    }

    async fn update(
        client: &CatalogClient,
        id: &str,
        payload: &DestinationPayload,
    ) -> Result<Option<Destination>, ClientError> {
        client.update_destination(id, payload).await
    }

    async fn delete(client: &CatalogClient, id: &str) -> Result<(), ClientError> {
        client.delete_destination(id).await
    }
}

// ==================== HOTEL ====================

/// Hotel records.
#[derive(Debug, Clone, Copy)]
pub struct HotelKind;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub phone_number: String,
    pub email: String,
    pub website: String,
}

/// Editable state of the hotel form.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelFields {
    pub name: String,
    pub destination_id: String,
    pub address: String,
    pub star_rating: String,
    pub guest_rating: String,
    pub price_per_night: String,
    pub image_url: String,
    pub hotel_amenities: String,
    pub nearby_attractions: String,
    pub contact_info: ContactFields,
}

/// Star rating a new hotel starts with.
pub const DEFAULT_STAR_RATING: &str = "3";
/// Guest rating a new hotel starts with.
pub const DEFAULT_GUEST_RATING: &str = "0";

impl Default for HotelFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            destination_id: String::new(),
            address: String::new(),
            star_rating: DEFAULT_STAR_RATING.to_string(),
            guest_rating: DEFAULT_GUEST_RATING.to_string(),
            price_per_night: String::new(),
            image_url: String::new(),
            hotel_amenities: String::new(),
            nearby_attractions: String::new(),
            contact_info: ContactFields::default(),
        }
    }
}

impl EntityKind for HotelKind {
    type Record = Hotel;
    type Fields = HotelFields;
    type Payload = HotelPayload;

    const LABEL: &'static str = "Hotel";

    fn record_id(record: &Hotel) -> Option<&str> {
        record.id.as_deref()
    }

    fn hydrate(record: &Hotel) -> HotelFields {
        let contact = record.contact_info.clone().unwrap_or_default();
        HotelFields {
            name: record.name.clone().unwrap_or_default(),
            destination_id: record
                .destination_id
                .as_ref()
                .and_then(|d| d.id())
                .unwrap_or_default()
                .to_string(),
            address: record.address.clone().unwrap_or_default(),
            star_rating: record
                .star_rating
                .map(|v| v.to_string())
                .unwrap_or_else(|| DEFAULT_STAR_RATING.to_string()),
            guest_rating: record
                .guest_rating
                .map(|v| v.to_string())
                .unwrap_or_else(|| DEFAULT_GUEST_RATING.to_string()),
            price_per_night: coerce::number_text(record.price_per_night),
            image_url: record.image_url.clone().unwrap_or_default(),
            hotel_amenities: coerce::join_list(&record.hotel_amenities),
            nearby_attractions: coerce::join_attractions(&record.nearby_attractions),
            contact_info: ContactFields {
                phone_number: contact.phone_number.unwrap_or_default(),
                email: contact.email.unwrap_or_default(),
                website: contact.website.unwrap_or_default(),
            },
        }
    }

    fn field_mut<'a>(fields: &'a mut HotelFields, path: &str) -> Option<&'a mut String> {
        let slot = match path {
            "name" => &mut fields.name,
            "destinationId" => &mut fields.destination_id,
            "address" => &mut fields.address,
            "starRating" => &mut fields.star_rating,
            "guestRating" => &mut fields.guest_rating,
            "pricePerNight" => &mut fields.price_per_night,
            "imageUrl" => &mut fields.image_url,
            "hotelAmenities" => &mut fields.hotel_amenities,
            "nearbyAttractions" => &mut fields.nearby_attractions,
            "contactInfo.phoneNumber" => &mut fields.contact_info.phone_number,
            "contactInfo.email" => &mut fields.contact_info.email,
            "contactInfo.website" => &mut fields.contact_info.website,
            _ => return None,
        };
        Some(slot)
    }

    fn field_values(fields: &HotelFields) -> Vec<(&'static str, &str)> {
        vec![
            ("name", fields.name.as_str()),
            ("destinationId", fields.destination_id.as_str()),
            ("address", fields.address.as_str()),
            ("starRating", fields.star_rating.as_str()),
            ("guestRating", fields.guest_rating.as_str()),
            ("pricePerNight", fields.price_per_night.as_str()),
            ("imageUrl", fields.image_url.as_str()),
            ("hotelAmenities", fields.hotel_amenities.as_str()),
            ("nearbyAttractions", fields.nearby_attractions.as_str()),
            ("contactInfo.phoneNumber", fields.contact_info.phone_number.as_str()),
            ("contactInfo.email", fields.contact_info.email.as_str()),
            ("contactInfo.website", fields.contact_info.website.as_str()),
        ]
    }

    fn missing_required(fields: &HotelFields) -> Vec<&'static str> {
        [
            ("name", &fields.name),
            ("destinationId", &fields.destination_id),
            ("address", &fields.address),
            ("starRating", &fields.star_rating),
            ("pricePerNight", &fields.price_per_night),
        ]
        .into_iter()
        .filter(|(_, value)| blank(value))
        .map(|(path, _)| path)
        .collect()
    }

    fn to_payload(fields: &HotelFields) -> HotelPayload {
        let star_rating = coerce::parse_int(&fields.star_rating);
        let guest_rating = coerce::parse_float(&fields.guest_rating);
        let price_per_night = coerce::parse_float(&fields.price_per_night);
        if star_rating.is_none() || guest_rating.is_nan() || price_per_night.is_nan() {
            tracing::warn!(
                "Submitting non-numeric hotel ratings or price ({:?}, {:?}, {:?})",
                fields.star_rating,
                fields.guest_rating,
                fields.price_per_night
            );
        }

        HotelPayload {
            name: fields.name.clone(),
            destination_id: fields.destination_id.clone(),
            address: fields.address.clone(),
            star_rating,
            guest_rating,
            price_per_night,
            image_url: fields.image_url.clone(),
            hotel_amenities: coerce::split_list(&fields.hotel_amenities),
            nearby_attractions: coerce::split_attractions(&fields.nearby_attractions),
            contact_info: ContactInfoPayload {
                phone_number: fields.contact_info.phone_number.clone(),
                email: fields.contact_info.email.clone(),
                website: fields.contact_info.website.clone(),
            },
        }
    }

    async fn list(client: &CatalogClient) -> Result<Vec<Hotel>, ClientError> {
        client.list_hotels(None).await
    }

    async fn create(
        client: &CatalogClient,
        payload: &HotelPayload,
    ) -> Result<Option<Hotel>, ClientError> {
        client.create_hotel(payload).await
    }

    async fn update(
        client: &CatalogClient,
        id: &str,
        payload: &HotelPayload,
    ) -> Result<Option<Hotel>, ClientError> {
        client.update_hotel(id, payload).await
    }

    async fn delete(client: &CatalogClient, id: &str) -> Result<(), ClientError> {
        client.delete_hotel(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactInfo, DestinationRef, DestinationSummary, NearbyAttraction};

    #[test]
    fn test_destination_required_fields() {
        let mut fields = DestinationFields::default();
        assert_eq!(
            DestinationKind::missing_required(&fields),
            vec![
                "name",
                "country",
                "description",
                "coordinates.latitude",
                "coordinates.longitude"
            ]
        );
        fields.name = "Goa".to_string();
        fields.country = "  ".to_string();
        assert!(!DestinationKind::missing_required(&fields).contains(&"name"));
        assert!(DestinationKind::missing_required(&fields).contains(&"country"));
    }

    #[test]
    fn test_destination_payload_keeps_nan_coordinates() {
        let fields = DestinationFields {
            name: "Goa".to_string(),
            country: "India".to_string(),
            description: "Beaches".to_string(),
            coordinates: CoordinateFields {
                latitude: "north".to_string(),
                longitude: "74.12".to_string(),
            },
            ..Default::default()
        };
        let payload = DestinationKind::to_payload(&fields);
        assert!(payload.coordinates.latitude.is_nan());
        assert_eq!(payload.coordinates.longitude, 74.12);
        assert_eq!(payload.best_time_to_visit, "");
    }

    #[test]
    fn test_hotel_defaults() {
        let payload = HotelKind::to_payload(&HotelFields {
            name: "Inn".to_string(),
            destination_id: "d1".to_string(),
            address: "Main St".to_string(),
            price_per_night: "99.5".to_string(),
            ..Default::default()
        });
        assert_eq!(payload.star_rating, Some(3));
        assert_eq!(payload.guest_rating, 0.0);
        assert_eq!(payload.price_per_night, 99.5);
        assert!(payload.hotel_amenities.is_empty());
        assert!(payload.nearby_attractions.is_empty());
    }

    #[test]
    fn test_hotel_hydrate_from_populated_record() {
        let hotel = Hotel {
            id: Some("h1".to_string()),
            name: Some("Sea View".to_string()),
            destination_id: Some(DestinationRef::Populated(DestinationSummary {
                id: Some("d1".to_string()),
                name: "Goa".to_string(),
                country: "India".to_string(),
            })),
            address: Some("Beach Rd".to_string()),
            star_rating: Some(4.0),
            price_per_night: Some(120.0),
            hotel_amenities: vec!["Wifi".to_string(), "Pool".to_string()],
            nearby_attractions: vec![NearbyAttraction {
                name: Some("Fort".to_string()),
                distance: Some("2km".to_string()),
            }],
            contact_info: Some(ContactInfo {
                email: Some("desk@seaview.test".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let fields = HotelKind::hydrate(&hotel);
        assert_eq!(fields.destination_id, "d1");
        assert_eq!(fields.star_rating, "4");
        assert_eq!(fields.guest_rating, "0");
        assert_eq!(fields.price_per_night, "120");
        assert_eq!(fields.hotel_amenities, "Wifi, Pool");
        assert_eq!(fields.nearby_attractions, "Fort|2km");
        assert_eq!(fields.contact_info.email, "desk@seaview.test");
        assert_eq!(fields.contact_info.phone_number, "");
    }

    #[test]
    fn test_field_paths() {
        let mut fields = HotelFields::default();
        *HotelKind::field_mut(&mut fields, "contactInfo.website").unwrap() =
            "https://inn.test".to_string();
        assert_eq!(fields.contact_info.website, "https://inn.test");
        assert!(HotelKind::field_mut(&mut fields, "contactInfo.fax").is_none());
        assert!(HotelKind::field_mut(&mut fields, "coordinates.latitude").is_none());

        let mut fields = DestinationFields::default();
        assert!(DestinationKind::field_mut(&mut fields, "coordinates.latitude").is_some());
    }

    #[test]
    fn test_every_listed_path_is_settable() {
        let mut hotel = HotelFields::default();
        let paths: Vec<&str> = HotelKind::field_values(&HotelFields::default())
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        for path in paths {
            assert!(HotelKind::field_mut(&mut hotel, path).is_some(), "{}", path);
        }

        let mut destination = DestinationFields::default();
        let paths: Vec<&str> = DestinationKind::field_values(&DestinationFields::default())
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        for path in paths {
            assert!(DestinationKind::field_mut(&mut destination, path).is_some(), "{}", path);
        }
    }

    #[test]
    fn test_noun() {
        assert_eq!(HotelKind::noun(), "hotel");
        assert_eq!(DestinationKind::noun(), "destination");
    }
}
