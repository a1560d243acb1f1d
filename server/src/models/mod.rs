pub mod artist;
pub mod booking;
pub mod event;

pub use artist::{Artist, ArtistSummary, ArtistWithEvent, NewArtist};
pub use booking::{Booking, BookingWithEvent, BookingWithEventBrief, NewBooking};
pub use event::{Event, EventBrief, EventStats, EventSummary, EventWithArtists, NewEvent};
