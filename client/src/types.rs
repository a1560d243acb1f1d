//! Wire types for the API's JSON envelopes. Unknown fields are ignored so
//! additive server changes do not break older clients.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

/// One page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Parent-event fields embedded in artist and booking responses. `location`
/// is absent in the brief form used by the admin booking list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EventSummary {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDetails {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: String,
    pub banner_url: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventStats {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub artist_count: i64,
    pub booking_count: i64,
    pub tickets_sold: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub performance_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub bio: String,
    pub image_url: Option<String>,
    pub performance_time: NaiveTime,
    pub event_id: i32,
    pub event: Option<EventSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Booking {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tickets_count: i32,
    pub confirmation_code: String,
    pub event_id: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub event: Option<EventSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tickets_count: i32,
    pub event_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_envelope_decodes() {
        let raw = r#"{
            "success": true,
            "data": {
                "id": 1,
                "name": "Ahmed",
                "email": "ahmed@example.com",
                "phone": "0612345678",
                "tickets_count": 2,
                "confirmation_code": "AB12CD34",
                "event_id": 1,
                "created_at": "2025-11-01T10:00:00Z",
                "updated_at": "2025-11-01T10:00:00Z"
            },
            "message": "Booking confirmed! Your code: AB12CD34"
        }"#;

        let envelope: Envelope<Booking> = serde_json::from_str(raw).unwrap();
        assert!(envelope.success);
        let booking = envelope.data.unwrap();
        assert_eq!(booking.confirmation_code, "AB12CD34");
        assert_eq!(booking.tickets_count, 2);
        assert!(booking.event.is_none());
    }

    #[test]
    fn test_paginated_artist_envelope_decodes() {
        let raw = r#"{
            "success": true,
            "data": [{
                "id": 3,
                "name": "Maâlem Hassan Boussou",
                "bio": "Maître Gnawa.",
                "image_url": null,
                "performance_time": "20:00:00",
                "event_id": 1,
                "created_at": "2025-11-01T10:00:00Z",
                "updated_at": "2025-11-01T10:00:00Z",
                "event": {"id": 1, "title": "La Grande Soirée Gnawa", "date": "2025-12-20", "location": "Agadir"}
            }],
            "pagination": {"currentPage": 1, "totalPages": 1, "totalItems": 1, "itemsPerPage": 10}
        }"#;

        let envelope: Envelope<Vec<Artist>> = serde_json::from_str(raw).unwrap();
        let artists = envelope.data.unwrap();
        assert_eq!(artists.len(), 1);
        assert_eq!(
            artists[0].event.as_ref().unwrap().location.as_deref(),
            Some("Agadir")
        );
        assert_eq!(envelope.pagination.unwrap().total_pages, 1);
    }

    #[test]
    fn test_failure_envelope_decodes_without_data() {
        let raw = r#"{"success": false, "message": "Booking not found"}"#;
        let envelope: Envelope<Booking> = serde_json::from_str(raw).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("Booking not found"));
    }
}
