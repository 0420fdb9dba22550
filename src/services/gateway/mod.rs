pub mod script;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AppSettings, Amenity, Booking, EncodedFile, Room};

/// A remote call either never produced a usable response (transport) or the
/// backend explicitly reported failure (backend). Neither is fatal and
/// neither may leave a partial local write behind.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Intent for the `addBooking` action. Ids are assigned by the backend; the
/// caller supplies a locally generated one only so the write can be
/// correlated if the backend echoes it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIntent {
    pub id: i64,
    pub room_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub total_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_screenshot: Option<EncodedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Payload for `saveRoom`: create when `id` is absent, update when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price_per_night: i64,
    pub max_guests: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

/// Wire statuses for `updateBookingStatus`. `declined` tells the backend to
/// delete the row; it is never stored locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusUpdate {
    Confirmed,
    Declined,
}

impl StatusUpdate {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusUpdate::Confirmed => "confirmed",
            StatusUpdate::Declined => "declined",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage_image_url: Option<String>,
}

/// Boundary to the external persistence endpoint. Confirm-then-apply: every
/// mutating call returns the authoritative entity (or unit ack) and only a
/// successful response may be applied to the local store.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn get_rooms(&self) -> Result<Vec<Room>, GatewayError>;
    async fn get_settings(&self) -> Result<AppSettings, GatewayError>;
    async fn add_booking(&self, intent: &BookingIntent) -> Result<Booking, GatewayError>;
    async fn update_booking_status(
        &self,
        booking_id: i64,
        status: StatusUpdate,
    ) -> Result<(), GatewayError>;
    async fn save_room(&self, payload: &RoomPayload) -> Result<Room, GatewayError>;
    async fn delete_room(&self, room_id: i64) -> Result<(), GatewayError>;
    async fn update_settings(&self, payload: &SettingsPayload)
        -> Result<AppSettings, GatewayError>;
}
