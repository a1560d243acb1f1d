use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::event::EventSummary;
use crate::utils::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub bio: String,
    pub image_url: Option<String>,
    pub performance_time: NaiveTime,
    pub event_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lineup entry embedded in the event response.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub performance_time: NaiveTime,
}

#[derive(Debug, Serialize)]
pub struct ArtistWithEvent {
    #[serde(flatten)]
    pub artist: Artist,
    pub event: EventSummary,
}

/// Candidate artist record, created by the seed/admin process.
#[derive(Debug, Clone, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub bio: String,
    pub image_url: Option<String>,
    pub performance_time: NaiveTime,
    pub event_id: i32,
}

impl NewArtist {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if self.bio.trim().is_empty() {
            return Err(AppError::Validation("Bio is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> NewArtist {
        NewArtist {
            name: "Maâlem Hassan Boussou".to_string(),
            bio: "Maître Gnawa de renommée internationale.".to_string(),
            image_url: None,
            performance_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            event_id: 1,
        }
    }

    #[test]
    fn test_valid_artist_passes() {
        assert!(candidate().validate().is_ok());
    }

    #[test]
    fn test_blank_name_names_the_field() {
        let mut artist = candidate();
        artist.name = String::new();
        let err = artist.validate().unwrap_err();
        assert!(err.to_string().contains("Name is required"));
    }

    #[test]
    fn test_blank_bio_rejected() {
        let mut artist = candidate();
        artist.bio = " ".to_string();
        assert!(artist.validate().is_err());
    }
}
