//! Client library for the soirée ticketing API: typed requests for the read
//! and write endpoints, a TTL cache over the reads, and a locally persisted
//! record of the bookings this device has created.

pub mod api;
pub mod cache;
pub mod error;
pub mod store;
pub mod types;

pub use api::ApiClient;
pub use error::ClientError;
pub use store::BookingStore;
