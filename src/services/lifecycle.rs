use chrono::{NaiveDate, Utc};

use crate::errors::AppError;
use crate::models::availability;
use crate::models::{BookingStatus, EncodedFile, Room};
use crate::services::gateway::BookingIntent;
use crate::store::CatalogStore;

/// A guest's booking request as it arrives from the detail page.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub payment_screenshot: Option<EncodedFile>,
    pub comments: Option<String>,
}

/// Validates a request against the room and freezes the price into an
/// intent. No mutation happens here; on any error the room is untouched and
/// the guest may correct the form and resubmit.
///
/// The conflict check runs against ALL bookings of the room, pending ones
/// included, so two guests cannot hold the same dates while one awaits
/// review. The search page is deliberately laxer (confirmed only).
pub fn prepare_request(room: &Room, request: &BookingRequest) -> Result<BookingIntent, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::InvalidInput("email is required".to_string()));
    }

    let nights = availability::compute_nights(request.checkin, request.checkout)?;

    if availability::has_conflict(&room.bookings, request.checkin, request.checkout) {
        return Err(AppError::DateConflict);
    }

    let total_amount = availability::compute_total(nights, room.price_per_night)?;

    Ok(BookingIntent {
        // Provisional time-based id; the backend's id is authoritative once
        // the write is confirmed.
        id: Utc::now().timestamp_millis(),
        room_id: room.id,
        name: request.name.clone(),
        email: request.email.clone(),
        phone: request.phone.clone(),
        checkin: request.checkin,
        checkout: request.checkout,
        total_amount,
        payment_screenshot: request.payment_screenshot.clone(),
        comments: request.comments.clone(),
    })
}

/// Transitions an admin may apply to a pending booking. Confirmed is
/// terminal; there is no cancellation path out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminDecision {
    Approve,
    Decline,
}

/// Guard for approve/decline: the booking must exist and be pending. Returns
/// the owning room's id so the caller can apply the store mutation after the
/// remote write is confirmed.
pub fn decision_guard(store: &CatalogStore, booking_id: i64) -> Result<i64, AppError> {
    let (room, booking) = store
        .find_booking(booking_id)
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))?;

    if booking.status != BookingStatus::Pending {
        return Err(AppError::InvalidInput(format!(
            "booking {booking_id} is not pending"
        )));
    }

    Ok(room.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Booking;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn room() -> Room {
        Room {
            id: 1,
            name: "Emerald Loft".to_string(),
            description: "A stylish loft.".to_string(),
            price_per_night: 1000,
            max_guests: 3,
            images: vec![],
            amenities: vec![],
            bookings: vec![],
        }
    }

    fn request(checkin: &str, checkout: &str) -> BookingRequest {
        BookingRequest {
            name: Some("Asha".to_string()),
            email: "asha@example.com".to_string(),
            phone: None,
            checkin: date(checkin),
            checkout: date(checkout),
            payment_screenshot: None,
            comments: None,
        }
    }

    fn pending_booking(id: i64, checkin: &str, checkout: &str) -> Booking {
        Booking {
            id,
            room_id: 1,
            name: None,
            email: "other@example.com".to_string(),
            phone: None,
            checkin: date(checkin),
            checkout: date(checkout),
            status: BookingStatus::Pending,
            total_amount: 3000,
            payment_screenshot: None,
            comments: None,
        }
    }

    #[test]
    fn test_prepare_freezes_total_amount() {
        let intent = prepare_request(&room(), &request("2024-06-01", "2024-06-04")).unwrap();
        assert_eq!(intent.total_amount, 3000);
        assert_eq!(intent.room_id, 1);
        assert!(intent.id > 0);
    }

    #[test]
    fn test_prepare_rejects_inverted_range() {
        let result = prepare_request(&room(), &request("2024-06-04", "2024-06-01"));
        assert!(matches!(result, Err(AppError::InvalidRange)));
    }

    #[test]
    fn test_prepare_rejects_missing_email() {
        let mut req = request("2024-06-01", "2024-06-04");
        req.email = "  ".to_string();
        assert!(matches!(
            prepare_request(&room(), &req),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_prepare_rejects_overlap_with_pending_hold() {
        let mut r = room();
        r.bookings.push(pending_booking(10, "2024-06-01", "2024-06-04"));

        let result = prepare_request(&r, &request("2024-06-03", "2024-06-05"));
        assert!(matches!(result, Err(AppError::DateConflict)));
    }

    #[test]
    fn test_prepare_allows_back_to_back() {
        let mut r = room();
        r.bookings.push(pending_booking(10, "2024-06-01", "2024-06-04"));

        let intent = prepare_request(&r, &request("2024-06-04", "2024-06-06")).unwrap();
        assert_eq!(intent.total_amount, 2000);
    }

    #[test]
    fn test_guard_unknown_booking_is_not_found() {
        let mut store = CatalogStore::new();
        store.upsert_room(room());

        assert!(matches!(
            decision_guard(&store, 404),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_guard_rejects_confirmed_booking() {
        let mut store = CatalogStore::new();
        store.upsert_room(room());
        let mut b = pending_booking(10, "2024-06-01", "2024-06-04");
        b.status = BookingStatus::Confirmed;
        store.upsert_booking_on_room(1, b);

        assert!(matches!(
            decision_guard(&store, 10),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_guard_passes_pending_booking() {
        let mut store = CatalogStore::new();
        store.upsert_room(room());
        store.upsert_booking_on_room(1, pending_booking(10, "2024-06-01", "2024-06-04"));

        assert_eq!(decision_guard(&store, 10).unwrap(), 1);
    }
}
