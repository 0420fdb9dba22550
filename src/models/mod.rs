pub mod availability;
pub mod booking;
pub mod room;
pub mod settings;
pub mod upload;

pub use booking::{Booking, BookingStatus};
pub use room::{Amenity, Room};
pub use settings::AppSettings;
pub use upload::EncodedFile;
