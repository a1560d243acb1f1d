use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::artist::ArtistSummary;
use crate::utils::error::AppError;

/// The single ticketed happening. The schema permits several rows but the
/// application reads the first one; see `store::events::find_current`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: String,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parent-event fields attached to artist and booking detail responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventSummary {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
}

/// Shorter form used by the admin booking listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventBrief {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct EventWithArtists {
    #[serde(flatten)]
    pub event: Event,
    pub artists: Vec<ArtistSummary>,
}

#[derive(Debug, Serialize)]
pub struct EventStats {
    #[serde(flatten)]
    pub event: Event,
    pub artist_count: i64,
    pub booking_count: i64,
    pub tickets_sold: i64,
}

/// Candidate event record, created by the seed/admin process.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: String,
    pub banner_url: Option<String>,
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::Validation("Location is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> NewEvent {
        NewEvent {
            title: "La Grande Soirée Gnawa".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            location: "Place Al Amal, Agadir".to_string(),
            description: "Une soirée exceptionnelle.".to_string(),
            banner_url: None,
        }
    }

    #[test]
    fn test_valid_event_passes() {
        assert!(candidate().validate().is_ok());
    }

    #[test]
    fn test_blank_title_names_the_field() {
        let mut event = candidate();
        event.title = "   ".to_string();
        let err = event.validate().unwrap_err();
        assert!(err.to_string().contains("Title is required"));
    }

    #[test]
    fn test_blank_location_rejected() {
        let mut event = candidate();
        event.location = String::new();
        assert!(event.validate().is_err());
    }
}
