use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::{BookingStatus, Room};

// ── Accounting ──

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingSummary {
    pub confirmed_revenue: i64,
    pub pending_revenue: i64,
    pub confirmed_count: usize,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub booking_id: i64,
    pub room_name: String,
    pub email: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub amount: i64,
}

/// Financial overview for the admin dashboard: confirmed revenue is money in
/// hand, pending revenue is what the open requests would bring in.
pub fn accounting_summary(rooms: &[Room]) -> AccountingSummary {
    let mut confirmed_revenue = 0;
    let mut pending_revenue = 0;
    let mut transactions = Vec::new();

    for room in rooms {
        for booking in &room.bookings {
            match booking.status {
                BookingStatus::Confirmed => {
                    confirmed_revenue += booking.total_amount;
                    transactions.push(Transaction {
                        booking_id: booking.id,
                        room_name: room.name.clone(),
                        email: booking.email.clone(),
                        checkin: booking.checkin,
                        checkout: booking.checkout,
                        amount: booking.total_amount,
                    });
                }
                BookingStatus::Pending => pending_revenue += booking.total_amount,
            }
        }
    }

    AccountingSummary {
        confirmed_revenue,
        pending_revenue,
        confirmed_count: transactions.len(),
        transactions,
    }
}

// ── Occupancy calendar ──

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOccupancy {
    pub date: NaiveDate,
    pub bookings: Vec<OccupancyEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyEntry {
    pub booking_id: i64,
    pub email: String,
    pub status: BookingStatus,
}

/// Per-day occupancy of one room for a calendar month. A booking occupies
/// every date in [checkin, checkout); the checkout day itself is free.
pub fn month_occupancy(room: &Room, year: i32, month: u32) -> Option<Vec<DayOccupancy>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    let mut days = Vec::with_capacity(31);
    let mut date = first;
    while date < next_month {
        let bookings = room
            .bookings
            .iter()
            .filter(|b| b.checkin <= date && date < b.checkout)
            .map(|b| OccupancyEntry {
                booking_id: b.id,
                email: b.email.clone(),
                status: b.status,
            })
            .collect();
        days.push(DayOccupancy { date, bookings });
        date = date.checked_add_days(Days::new(1))?;
    }

    debug_assert_eq!(days.len() as u32, days_in_month(year, month));
    Some(days)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        _ => 28,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Booking;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(id: i64, checkin: &str, checkout: &str, status: BookingStatus, amount: i64) -> Booking {
        Booking {
            id,
            room_id: 1,
            name: None,
            email: format!("guest{id}@example.com"),
            phone: None,
            checkin: date(checkin),
            checkout: date(checkout),
            status,
            total_amount: amount,
            payment_screenshot: None,
            comments: None,
        }
    }

    fn room(bookings: Vec<Booking>) -> Room {
        Room {
            id: 1,
            name: "Sunstone Suite".to_string(),
            description: String::new(),
            price_per_night: 1000,
            max_guests: 2,
            images: vec![],
            amenities: vec![],
            bookings,
        }
    }

    #[test]
    fn test_accounting_splits_confirmed_and_pending() {
        let rooms = vec![room(vec![
            booking(1, "2024-06-01", "2024-06-04", BookingStatus::Confirmed, 3000),
            booking(2, "2024-06-10", "2024-06-12", BookingStatus::Confirmed, 2000),
            booking(3, "2024-07-01", "2024-07-02", BookingStatus::Pending, 1000),
        ])];

        let summary = accounting_summary(&rooms);
        assert_eq!(summary.confirmed_revenue, 5000);
        assert_eq!(summary.pending_revenue, 1000);
        assert_eq!(summary.confirmed_count, 2);
        assert_eq!(summary.transactions.len(), 2);
        assert_eq!(summary.transactions[0].room_name, "Sunstone Suite");
    }

    #[test]
    fn test_accounting_empty_catalog() {
        let summary = accounting_summary(&[]);
        assert_eq!(summary.confirmed_revenue, 0);
        assert_eq!(summary.pending_revenue, 0);
        assert!(summary.transactions.is_empty());
    }

    #[test]
    fn test_occupancy_marks_half_open_range() {
        let r = room(vec![booking(
            1,
            "2024-06-10",
            "2024-06-12",
            BookingStatus::Confirmed,
            2000,
        )]);
        let days = month_occupancy(&r, 2024, 6).unwrap();
        assert_eq!(days.len(), 30);

        let by_day = |d: u32| &days[(d - 1) as usize];
        assert!(by_day(9).bookings.is_empty());
        assert_eq!(by_day(10).bookings.len(), 1);
        assert_eq!(by_day(11).bookings.len(), 1);
        // Checkout day is free.
        assert!(by_day(12).bookings.is_empty());
    }

    #[test]
    fn test_occupancy_spans_month_boundary() {
        let r = room(vec![booking(
            1,
            "2024-05-30",
            "2024-06-02",
            BookingStatus::Pending,
            3000,
        )]);
        let days = month_occupancy(&r, 2024, 6).unwrap();
        assert_eq!(days[0].bookings.len(), 1);
        assert!(days[2].bookings.is_empty());
    }

    #[test]
    fn test_occupancy_rejects_invalid_month() {
        assert!(month_occupancy(&room(vec![]), 2024, 13).is_none());
    }

    #[test]
    fn test_occupancy_leap_february() {
        let days = month_occupancy(&room(vec![]), 2024, 2).unwrap();
        assert_eq!(days.len(), 29);
        let days = month_occupancy(&room(vec![]), 2023, 2).unwrap();
        assert_eq!(days.len(), 28);
    }
}
