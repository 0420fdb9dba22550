use crate::models::{AppSettings, Booking, BookingStatus, Room};

/// In-memory cache of the remote catalog. Mutations are synchronous and
/// local; durability belongs to the gateway, which the store never calls.
/// Handlers mutate it under a single lock scope so partial updates are never
/// observable.
#[derive(Debug, Default)]
pub struct CatalogStore {
    rooms: Vec<Room>,
    settings: AppSettings,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_by_id(&self, id: i64) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn replace_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    /// Inserts or replaces by id, keeping catalog order for existing rooms.
    pub fn upsert_room(&mut self, room: Room) {
        match self.rooms.iter_mut().find(|r| r.id == room.id) {
            Some(existing) => *existing = room,
            None => self.rooms.push(room),
        }
    }

    pub fn remove_room(&mut self, id: i64) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|r| r.id != id);
        self.rooms.len() != before
    }

    /// Appends the booking, or replaces it in place when a booking with the
    /// same id already exists (id reconciliation after a confirmed write).
    pub fn upsert_booking_on_room(&mut self, room_id: i64, booking: Booking) -> bool {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) else {
            return false;
        };
        match room.bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(existing) => *existing = booking,
            None => room.bookings.push(booking),
        }
        true
    }

    pub fn remove_booking_from_room(&mut self, room_id: i64, booking_id: i64) -> bool {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) else {
            return false;
        };
        let before = room.bookings.len();
        room.bookings.retain(|b| b.id != booking_id);
        room.bookings.len() != before
    }

    pub fn update_booking_status(
        &mut self,
        room_id: i64,
        booking_id: i64,
        status: BookingStatus,
    ) -> bool {
        self.rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .and_then(|r| r.bookings.iter_mut().find(|b| b.id == booking_id))
            .map(|b| b.status = status)
            .is_some()
    }

    /// Locates a booking without knowing its room up front, the way the
    /// admin dashboard addresses bookings by id alone.
    pub fn find_booking(&self, booking_id: i64) -> Option<(&Room, &Booking)> {
        self.rooms.iter().find_map(|room| {
            room.booking_by_id(booking_id).map(|booking| (room, booking))
        })
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: AppSettings) {
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn room(id: i64) -> Room {
        Room {
            id,
            name: format!("Room {id}"),
            description: String::new(),
            price_per_night: 1000,
            max_guests: 2,
            images: vec![],
            amenities: vec![],
            bookings: vec![],
        }
    }

    fn booking(id: i64, room_id: i64) -> Booking {
        Booking {
            id,
            room_id,
            name: None,
            email: "guest@example.com".to_string(),
            phone: None,
            checkin: date("2024-06-01"),
            checkout: date("2024-06-03"),
            status: BookingStatus::Pending,
            total_amount: 2000,
            payment_screenshot: None,
            comments: None,
        }
    }

    #[test]
    fn test_upsert_room_inserts_then_replaces() {
        let mut store = CatalogStore::new();
        store.upsert_room(room(1));
        store.upsert_room(room(2));

        let mut updated = room(1);
        updated.name = "Renamed".to_string();
        store.upsert_room(updated);

        assert_eq!(store.rooms().len(), 2);
        assert_eq!(store.room_by_id(1).unwrap().name, "Renamed");
        // Order preserved on replace.
        assert_eq!(store.rooms()[0].id, 1);
    }

    #[test]
    fn test_remove_room_drops_its_bookings() {
        let mut store = CatalogStore::new();
        store.upsert_room(room(1));
        store.upsert_booking_on_room(1, booking(10, 1));

        assert!(store.remove_room(1));
        assert!(store.room_by_id(1).is_none());
        assert!(store.find_booking(10).is_none());
        assert!(!store.remove_room(1));
    }

    #[test]
    fn test_booking_append_order_is_request_order() {
        let mut store = CatalogStore::new();
        store.upsert_room(room(1));
        store.upsert_booking_on_room(1, booking(10, 1));
        store.upsert_booking_on_room(1, booking(11, 1));

        let ids: Vec<i64> = store.room_by_id(1).unwrap().bookings.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn test_upsert_booking_replaces_same_id() {
        let mut store = CatalogStore::new();
        store.upsert_room(room(1));
        store.upsert_booking_on_room(1, booking(10, 1));

        let mut updated = booking(10, 1);
        updated.total_amount = 9999;
        store.upsert_booking_on_room(1, updated);

        let room = store.room_by_id(1).unwrap();
        assert_eq!(room.bookings.len(), 1);
        assert_eq!(room.bookings[0].total_amount, 9999);
    }

    #[test]
    fn test_upsert_booking_on_unknown_room() {
        let mut store = CatalogStore::new();
        assert!(!store.upsert_booking_on_room(42, booking(10, 42)));
    }

    #[test]
    fn test_remove_booking() {
        let mut store = CatalogStore::new();
        store.upsert_room(room(1));
        store.upsert_booking_on_room(1, booking(10, 1));

        assert!(store.remove_booking_from_room(1, 10));
        assert!(store.room_by_id(1).unwrap().bookings.is_empty());
        assert!(!store.remove_booking_from_room(1, 10));
    }

    #[test]
    fn test_update_booking_status() {
        let mut store = CatalogStore::new();
        store.upsert_room(room(1));
        store.upsert_booking_on_room(1, booking(10, 1));

        assert!(store.update_booking_status(1, 10, BookingStatus::Confirmed));
        assert_eq!(
            store.room_by_id(1).unwrap().bookings[0].status,
            BookingStatus::Confirmed
        );
        assert!(!store.update_booking_status(1, 99, BookingStatus::Confirmed));
    }

    #[test]
    fn test_find_booking_across_rooms() {
        let mut store = CatalogStore::new();
        store.upsert_room(room(1));
        store.upsert_room(room(2));
        store.upsert_booking_on_room(2, booking(20, 2));

        let (found_room, found_booking) = store.find_booking(20).unwrap();
        assert_eq!(found_room.id, 2);
        assert_eq!(found_booking.id, 20);
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut store = CatalogStore::new();
        assert_eq!(store.settings().upi_id, "");

        store.set_settings(AppSettings {
            upi_id: "host@icici".to_string(),
            homepage_image_url: Some("https://example.com/hero.jpg".to_string()),
        });
        assert_eq!(store.settings().upi_id, "host@icici");
    }
}
