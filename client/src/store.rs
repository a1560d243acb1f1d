use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::types::Booking;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    bookings: Vec<Booking>,
    user_email: Option<String>,
}

/// Locally persisted record of the bookings this device created, plus the
/// email last used to book. Written through on every mutation so the list
/// survives restarts. The server stays the source of truth: a successful
/// list-by-email read replaces the local list outright.
pub struct BookingStore {
    path: PathBuf,
    data: StoreData,
}

impl BookingStore {
    /// Opens the store at the platform data dir, e.g.
    /// `~/.local/share/soiree/bookings.json` on Linux.
    pub fn open_default() -> Result<Self, ClientError> {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(base.join("soiree").join("bookings.json"))
    }

    pub fn open(path: PathBuf) -> Result<Self, ClientError> {
        let data = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, data })
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.data.bookings
    }

    pub fn user_email(&self) -> Option<&str> {
        self.data.user_email.as_deref()
    }

    /// Appends a booking returned by a successful create.
    pub fn add(&mut self, booking: Booking) -> Result<(), ClientError> {
        self.data.user_email = Some(booking.email.clone());
        self.data.bookings.push(booking);
        self.persist()
    }

    /// Drops the booking matching `code` after a successful cancel.
    pub fn remove(&mut self, code: &str) -> Result<(), ClientError> {
        self.data
            .bookings
            .retain(|booking| booking.confirmation_code != code);
        self.persist()
    }

    /// Replaces the local list with the server's rows for `email`. Replace,
    /// not merge: anything the server no longer knows about is dropped.
    pub fn reconcile(&mut self, email: &str, bookings: Vec<Booking>) -> Result<(), ClientError> {
        self.data.user_email = Some(email.to_string());
        self.data.bookings = bookings;
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), ClientError> {
        self.data = StoreData::default();
        self.persist()
    }

    fn persist(&self) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(&self.data)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("soiree-store-{}-{}", std::process::id(), name))
    }

    fn booking(code: &str, email: &str) -> Booking {
        Booking {
            id: 1,
            name: "Ahmed".to_string(),
            email: email.to_string(),
            phone: "0612345678".to_string(),
            tickets_count: 2,
            confirmation_code: code.to_string(),
            event_id: 1,
            created_at: Utc.with_ymd_and_hms(2025, 11, 1, 10, 0, 0).unwrap(),
            event: None,
        }
    }

    #[test]
    fn test_add_then_remove() {
        let path = temp_path("add-remove.json");
        let mut store = BookingStore::open(path.clone()).unwrap();
        store.clear().unwrap();

        store.add(booking("AB12CD34", "a@example.com")).unwrap();
        assert_eq!(store.bookings().len(), 1);
        assert_eq!(store.user_email(), Some("a@example.com"));

        store.remove("AB12CD34").unwrap();
        assert!(store.bookings().is_empty());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_survives_reopen() {
        let path = temp_path("reopen.json");
        {
            let mut store = BookingStore::open(path.clone()).unwrap();
            store.clear().unwrap();
            store.add(booking("ZZ99YY88", "b@example.com")).unwrap();
        }

        let store = BookingStore::open(path.clone()).unwrap();
        assert_eq!(store.bookings().len(), 1);
        assert_eq!(store.bookings()[0].confirmation_code, "ZZ99YY88");
        assert_eq!(store.user_email(), Some("b@example.com"));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_reconcile_replaces_rather_than_merges() {
        let path = temp_path("reconcile.json");
        let mut store = BookingStore::open(path.clone()).unwrap();
        store.clear().unwrap();

        store.add(booking("LOCALONE", "c@example.com")).unwrap();
        store.add(booking("LOCALTWO", "c@example.com")).unwrap();

        // Server only knows about one of them
        store
            .reconcile("c@example.com", vec![booking("LOCALTWO", "c@example.com")])
            .unwrap();

        assert_eq!(store.bookings().len(), 1);
        assert_eq!(store.bookings()[0].confirmation_code, "LOCALTWO");

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let path = temp_path("never-written.json");
        fs::remove_file(&path).ok();
        let store = BookingStore::open(path).unwrap();
        assert!(store.bookings().is_empty());
        assert!(store.user_email().is_none());
    }
}
