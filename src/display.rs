//! Derived display values.
//!
//! Nothing here is stored state: every value is recomputed from a record and must
//! cope with any optional field being absent.

use std::fmt;

use crate::models::{Destination, Hotel};

/// Shown where a value is missing or unusable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Whole stars to draw for a rating: truncated and clamped to `0..=5`.
pub fn star_count(rating: Option<f64>) -> usize {
    match rating {
        Some(r) if r.is_finite() => r.trunc().clamp(0.0, 5.0) as usize,
        _ => 0,
    }
}

pub fn stars(rating: Option<f64>) -> String {
    "★".repeat(star_count(rating))
}

/// Guest rating text, `N/A` when absent.
pub fn guest_rating_text(rating: Option<f64>) -> String {
    match rating {
        Some(r) => r.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Currency formatter using Indian digit grouping (`12,34,567.80`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFormatter {
    currency: String,
}

impl Default for PriceFormatter {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl PriceFormatter {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.trim().to_uppercase(),
        }
    }

    fn symbol(&self) -> String {
        match self.currency.as_str() {
            "USD" => "$".to_string(),
            "INR" => "₹".to_string(),
            "EUR" => "€".to_string(),
            "GBP" => "£".to_string(),
            "JPY" => "¥".to_string(),
            other => format!("{} ", other),
        }
    }

    /// Format a price, or `N/A` when absent or not a finite number.
    pub fn format(&self, value: Option<f64>) -> String {
        let value = match value {
            Some(v) if v.is_finite() => v,
            _ => return NOT_AVAILABLE.to_string(),
        };

        let fixed = format!("{:.2}", value.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!("{}{}{}.{}", sign, self.symbol(), group_indian(whole), fraction)
    }
}

/// Group digits as the last three, then pairs: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// A room category line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLine {
    pub name: String,
    pub price: String,
    pub amenities: Vec<String>,
}

/// Display-ready view of a hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelCard {
    pub id: Option<String>,
    pub name: String,
    pub destination: Option<String>,
    pub address: Option<String>,
    /// Image to try; a failed load shows nothing
    pub image_url: Option<String>,
    pub stars: String,
    pub guest_rating: String,
    pub price: String,
    pub amenities: Vec<String>,
    pub attractions: Vec<String>,
    pub rooms: Vec<RoomLine>,
    pub landmarks: Vec<String>,
    pub contact: Vec<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

impl HotelCard {
    pub fn new(hotel: &Hotel, prices: &PriceFormatter) -> Self {
        let contact = hotel
            .contact_info
            .as_ref()
            .map(|c| {
                [
                    ("Phone", &c.phone_number),
                    ("Email", &c.email),
                    ("Website", &c.website),
                ]
                .into_iter()
                .filter_map(|(label, value)| present(value).map(|v| format!("{}: {}", label, v)))
                .collect()
            })
            .unwrap_or_default();

        Self {
            id: hotel.id.clone(),
            name: present(&hotel.name).unwrap_or_else(|| "Unnamed Hotel".to_string()),
            destination: hotel.destination_id.as_ref().and_then(|d| d.label()),
            address: present(&hotel.address),
            image_url: present(&hotel.image_url),
            stars: stars(hotel.star_rating),
            guest_rating: guest_rating_text(hotel.guest_rating),
            price: prices.format(hotel.price_per_night),
            amenities: hotel.hotel_amenities.clone(),
            attractions: hotel
                .nearby_attractions
                .iter()
                .map(|a| {
                    format!(
                        "{} ({})",
                        a.name.as_deref().unwrap_or(""),
                        a.distance.as_deref().unwrap_or("")
                    )
                })
                .collect(),
            rooms: hotel
                .room_categories
                .iter()
                .map(|room| RoomLine {
                    name: present(&room.category_name).unwrap_or_else(|| "Room".to_string()),
                    price: prices.format(room.price_per_night),
                    amenities: room.amenities.clone(),
                })
                .collect(),
            landmarks: hotel
                .nearby_landmarks
                .iter()
                .map(|l| {
                    format!(
                        "{} - {}km away",
                        present(&l.landmark_name).unwrap_or_else(|| "Landmark".to_string()),
                        l.distance_in_km
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "-".to_string())
                    )
                })
                .collect(),
            contact,
        }
    }
}

impl fmt::Display for HotelCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => writeln!(f, "{} [{}]", self.name, id)?,
            None => writeln!(f, "{}", self.name)?,
        }
        if let Some(destination) = &self.destination {
            writeln!(f, "  Destination: {}", destination)?;
        }
        if let Some(address) = &self.address {
            writeln!(f, "  Address: {}", address)?;
        }
        if let Some(image) = &self.image_url {
            writeln!(f, "  Image: {}", image)?;
        }
        writeln!(f, "  Star Rating: {}", self.stars)?;
        writeln!(f, "  Guest Rating: {}/5", self.guest_rating)?;
        writeln!(f, "  Price per Night: {}", self.price)?;
        if !self.amenities.is_empty() {
            writeln!(f, "  Amenities: {}", self.amenities.join(", "))?;
        }
        if !self.attractions.is_empty() {
            writeln!(f, "  Nearby Attractions: {}", self.attractions.join(", "))?;
        }
        for room in &self.rooms {
            writeln!(f, "  Room {}: {}/night", room.name, room.price)?;
            if !room.amenities.is_empty() {
                writeln!(f, "    Amenities: {}", room.amenities.join(", "))?;
            }
        }
        for landmark in &self.landmarks {
            writeln!(f, "  Landmark: {}", landmark)?;
        }
        for line in &self.contact {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

/// Display-ready summary of a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationInfo {
    pub id: Option<String>,
    pub heading: String,
    pub description: Option<String>,
    pub coordinates: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub currency: Option<String>,
    pub language: Option<String>,
}

impl DestinationInfo {
    pub fn new(destination: &Destination) -> Self {
        let coordinates = destination
            .coordinates
            .as_ref()
            .filter(|c| c.latitude.is_some() || c.longitude.is_some())
            .map(|c| {
                let axis = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
                format!("{}, {}", axis(c.latitude), axis(c.longitude))
            });

        Self {
            id: destination.id.clone(),
            heading: destination.label(),
            description: Some(destination.description.clone()).filter(|d| !d.trim().is_empty()),
            coordinates,
            best_time_to_visit: present(&destination.best_time_to_visit),
            currency: present(&destination.currency),
            language: present(&destination.language),
        }
    }
}

impl fmt::Display for DestinationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => writeln!(f, "{} [{}]", self.heading, id)?,
            None => writeln!(f, "{}", self.heading)?,
        }
        let lines = [
            ("Description", &self.description),
            ("Coordinates", &self.coordinates),
            ("Best Time to Visit", &self.best_time_to_visit),
            ("Currency", &self.currency),
            ("Language", &self.language),
        ];
        for (label, value) in lines {
            if let Some(value) = value {
                writeln!(f, "  {}: {}", label, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, NearbyLandmark, RoomCategory};

    #[test]
    fn test_star_count_clamps() {
        assert_eq!(star_count(Some(4.0)), 4);
        assert_eq!(star_count(Some(4.9)), 4);
        assert_eq!(star_count(Some(9.0)), 5);
        assert_eq!(star_count(Some(-2.0)), 0);
        assert_eq!(star_count(None), 0);
        assert_eq!(stars(Some(3.0)), "★★★");
    }

    #[test]
    fn test_guest_rating_text() {
        assert_eq!(guest_rating_text(Some(4.5)), "4.5");
        assert_eq!(guest_rating_text(None), "N/A");
    }

    #[test]
    fn test_price_formatting() {
        let prices = PriceFormatter::default();
        assert_eq!(prices.format(Some(0.0)), "$0.00");
        assert_eq!(prices.format(Some(999.5)), "$999.50");
        assert_eq!(prices.format(Some(1234.5)), "$1,234.50");
        assert_eq!(prices.format(Some(1234567.891)), "$12,34,567.89");
        assert_eq!(prices.format(Some(-50.0)), "-$50.00");
        assert_eq!(prices.format(None), "N/A");
        assert_eq!(prices.format(Some(f64::NAN)), "N/A");

        assert_eq!(PriceFormatter::new("inr").format(Some(3500.0)), "₹3,500.00");
        assert_eq!(PriceFormatter::new("CHF").format(Some(10.0)), "CHF 10.00");
    }

    #[test]
    fn test_card_tolerates_empty_hotel() {
        let card = HotelCard::new(&Hotel::default(), &PriceFormatter::default());
        assert_eq!(card.name, "Unnamed Hotel");
        assert_eq!(card.stars, "");
        assert_eq!(card.guest_rating, "N/A");
        assert_eq!(card.price, "N/A");
        assert!(card.contact.is_empty());
        assert!(card.to_string().contains("Guest Rating: N/A/5"));
    }

    #[test]
    fn test_card_rooms_and_landmarks() {
        let hotel = Hotel {
            name: Some("Palace".to_string()),
            star_rating: Some(7.0),
            room_categories: vec![RoomCategory {
                category_name: None,
                price_per_night: Some(2000.0),
                amenities: vec!["Balcony".to_string()],
            }],
            nearby_landmarks: vec![NearbyLandmark {
                landmark_name: Some("Lake".to_string()),
                distance_in_km: None,
            }],
            ..Default::default()
        };
        let card = HotelCard::new(&hotel, &PriceFormatter::default());
        assert_eq!(card.stars, "★★★★★");
        assert_eq!(card.rooms[0].name, "Room");
        assert_eq!(card.rooms[0].price, "$2,000.00");
        assert_eq!(card.landmarks, vec!["Lake - -km away"]);
    }

    #[test]
    fn test_destination_info() {
        let info = DestinationInfo::new(&Destination {
            id: Some("d1".to_string()),
            name: "Goa".to_string(),
            country: "India".to_string(),
            coordinates: Some(Coordinates {
                latitude: Some(15.3),
                longitude: None,
            }),
            currency: Some("INR".to_string()),
            ..Default::default()
        });
        assert_eq!(info.heading, "Goa, India");
        assert_eq!(info.coordinates.as_deref(), Some("15.3, -"));
        assert!(info.description.is_none());
        assert!(info.to_string().contains("Currency: INR"));
    }
}
