use serde::{Deserialize, Serialize};

use super::Booking;

/// A bookable unit. A room owns its bookings exclusively: deleting the room
/// deletes them, and booking order is request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_per_night: i64,
    pub max_guests: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Amenity {
    pub name: String,
    /// Either a known icon slug ("wifi", "pool", ...) or inline SVG markup
    /// from the icon generator.
    pub icon: String,
}

impl Room {
    pub fn booking_by_id(&self, booking_id: i64) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }

    /// Amenity names must be unique within a room.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("room name is required".to_string());
        }
        if self.price_per_night <= 0 {
            return Err("price per night must be positive".to_string());
        }
        if self.max_guests == 0 {
            return Err("max guests must be positive".to_string());
        }
        for (i, amenity) in self.amenities.iter().enumerate() {
            if self.amenities[..i].iter().any(|a| a.name == amenity.name) {
                return Err(format!("duplicate amenity: {}", amenity.name));
            }
        }
        Ok(())
    }
}
