use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{Artist, ArtistWithEvent, EventSummary, NewArtist};
use crate::store::{like_pattern, Page};
use crate::utils::error::AppError;
use crate::utils::pagination::PageParams;

/// Flat row for the artist + parent-event join.
#[derive(FromRow)]
struct ArtistEventRow {
    id: i32,
    name: String,
    bio: String,
    image_url: Option<String>,
    performance_time: NaiveTime,
    event_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    event_title: String,
    event_date: NaiveDate,
    event_location: String,
}

impl From<ArtistEventRow> for ArtistWithEvent {
    fn from(row: ArtistEventRow) -> Self {
        ArtistWithEvent {
            event: EventSummary {
                id: row.event_id,
                title: row.event_title,
                date: row.event_date,
                location: row.event_location,
            },
            artist: Artist {
                id: row.id,
                name: row.name,
                bio: row.bio,
                image_url: row.image_url,
                performance_time: row.performance_time,
                event_id: row.event_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

const JOINED_SELECT: &str = "SELECT a.id, a.name, a.bio, a.image_url, a.performance_time,
            a.event_id, a.created_at, a.updated_at,
            e.title AS event_title, e.date AS event_date, e.location AS event_location
     FROM artists a
     JOIN event_info e ON e.id = a.event_id";

/// Pages through the lineup in performance order, optionally filtered by a
/// case-insensitive substring over name or bio.
pub async fn list(
    pool: &PgPool,
    params: PageParams,
    search: Option<&str>,
) -> Result<Page<ArtistWithEvent>, AppError> {
    let pattern = search.map(like_pattern);

    let total: i64 = match &pattern {
        Some(p) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM artists WHERE name ILIKE $1 OR bio ILIKE $1")
                .bind(p)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM artists")
                .fetch_one(pool)
                .await?
        }
    };

    let rows: Vec<ArtistEventRow> = match &pattern {
        Some(p) => {
            sqlx::query_as(&format!(
                "{JOINED_SELECT}
                 WHERE a.name ILIKE $1 OR a.bio ILIKE $1
                 ORDER BY a.performance_time ASC, a.id ASC
                 LIMIT $2 OFFSET $3"
            ))
            .bind(p)
            .bind(params.limit)
            .bind(params.offset())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(&format!(
                "{JOINED_SELECT}
                 ORDER BY a.performance_time ASC, a.id ASC
                 LIMIT $1 OFFSET $2"
            ))
            .bind(params.limit)
            .bind(params.offset())
            .fetch_all(pool)
            .await?
        }
    };

    Ok(Page {
        items: rows.into_iter().map(Into::into).collect(),
        total,
    })
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<ArtistWithEvent, AppError> {
    let row: Option<ArtistEventRow> = sqlx::query_as(&format!("{JOINED_SELECT} WHERE a.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(Into::into)
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))
}

/// Seed/admin path; the public API reads artists but never writes them.
pub async fn create(pool: &PgPool, new: NewArtist) -> Result<Artist, AppError> {
    new.validate()?;

    let artist = sqlx::query_as::<_, Artist>(
        "INSERT INTO artists (name, bio, image_url, performance_time, event_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, name, bio, image_url, performance_time, event_id, created_at, updated_at",
    )
    .bind(&new.name)
    .bind(&new.bio)
    .bind(&new.image_url)
    .bind(new.performance_time)
    .bind(new.event_id)
    .fetch_one(pool)
    .await?;

    Ok(artist)
}
