use sqlx::PgPool;

use crate::models::{ArtistSummary, Event, EventStats, EventWithArtists, NewEvent};
use crate::utils::error::AppError;

const EVENT_COLUMNS: &str =
    "id, title, date, location, description, banner_url, created_at, updated_at";

async fn find_first(pool: &PgPool) -> Result<Event, AppError> {
    sqlx::query_as::<_, Event>(&format!(
        "SELECT {EVENT_COLUMNS} FROM event_info ORDER BY id LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
}

/// The current event together with its lineup, ordered by performance time.
pub async fn find_current(pool: &PgPool) -> Result<EventWithArtists, AppError> {
    let event = find_first(pool).await?;

    let artists = sqlx::query_as::<_, ArtistSummary>(
        "SELECT id, name, image_url, performance_time
         FROM artists
         WHERE event_id = $1
         ORDER BY performance_time ASC, id ASC",
    )
    .bind(event.id)
    .fetch_all(pool)
    .await?;

    Ok(EventWithArtists { event, artists })
}

/// The current event plus aggregate counts over its artists and bookings.
pub async fn stats(pool: &PgPool) -> Result<EventStats, AppError> {
    let event = find_first(pool).await?;

    let (artist_count, booking_count, tickets_sold) = sqlx::query_as::<_, (i64, i64, i64)>(
        "SELECT
            (SELECT COUNT(*) FROM artists WHERE event_id = $1),
            (SELECT COUNT(*) FROM bookings WHERE event_id = $1),
            (SELECT COALESCE(SUM(tickets_count), 0) FROM bookings WHERE event_id = $1)",
    )
    .bind(event.id)
    .fetch_one(pool)
    .await?;

    Ok(EventStats {
        event,
        artist_count,
        booking_count,
        tickets_sold,
    })
}

/// Seed/admin path; the public API never creates events.
pub async fn create(pool: &PgPool, new: NewEvent) -> Result<Event, AppError> {
    new.validate()?;

    let event = sqlx::query_as::<_, Event>(&format!(
        "INSERT INTO event_info (title, date, location, description, banner_url)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {EVENT_COLUMNS}"
    ))
    .bind(&new.title)
    .bind(new.date)
    .bind(&new.location)
    .bind(&new.description)
    .bind(&new.banner_url)
    .fetch_one(pool)
    .await?;

    Ok(event)
}

/// Removes the event; artists and bookings go with it via ON DELETE CASCADE.
pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM event_info WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Event not found".to_string()));
    }
    Ok(())
}
