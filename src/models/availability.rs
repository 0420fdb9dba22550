use chrono::NaiveDate;

use super::{Booking, BookingStatus, Room};

#[derive(Debug, PartialEq)]
pub enum AvailabilityError {
    InvalidRange,
    InvalidInput(String),
}

impl std::fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityError::InvalidRange => {
                write!(f, "check-out date must be after check-in date")
            }
            AvailabilityError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

pub fn compute_nights(checkin: NaiveDate, checkout: NaiveDate) -> Result<i64, AvailabilityError> {
    let nights = (checkout - checkin).num_days();
    if nights <= 0 {
        return Err(AvailabilityError::InvalidRange);
    }
    Ok(nights)
}

pub fn compute_total(nights: i64, price_per_night: i64) -> Result<i64, AvailabilityError> {
    if nights <= 0 {
        return Err(AvailabilityError::InvalidInput("nights must be positive".to_string()));
    }
    if price_per_night <= 0 {
        return Err(AvailabilityError::InvalidInput(
            "price per night must be positive".to_string(),
        ));
    }
    Ok(nights * price_per_night)
}

/// Request-time check: a new request collides with ANY existing booking of
/// the room, pending ones included. Pending requests are tentative holds, so
/// a second guest cannot double-request the same dates before admin review.
/// Intervals are half-open [checkin, checkout): touching at the boundary is
/// not a conflict.
pub fn has_conflict(bookings: &[Booking], checkin: NaiveDate, checkout: NaiveDate) -> bool {
    bookings
        .iter()
        .any(|b| checkin < b.checkout && checkout > b.checkin)
}

/// Search-time filter: capacity plus overlap against CONFIRMED bookings
/// only. A pending booking keeps the room visible to other browsers; the
/// stricter check in `has_conflict` only applies when a request is actually
/// submitted. An absent or inverted date range disables filtering.
pub fn filter_available(
    rooms: &[Room],
    checkin: Option<NaiveDate>,
    checkout: Option<NaiveDate>,
    guests: u32,
) -> Vec<Room> {
    let (start, end) = match (checkin, checkout) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return rooms.to_vec(),
    };

    rooms
        .iter()
        .filter(|room| {
            if room.max_guests < guests {
                return false;
            }
            !room
                .bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Confirmed)
                .any(|b| start < b.checkout && end > b.checkin)
        })
        .cloned()
        .collect()
}
