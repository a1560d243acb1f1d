use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use sqlx::{FromRow, PgPool};

use crate::models::booking::CONFIRMATION_CODE_LENGTH;
use crate::models::{
    Booking, BookingWithEvent, BookingWithEventBrief, EventBrief, EventSummary, NewBooking,
};
use crate::store::{like_pattern, Page};
use crate::utils::error::AppError;
use crate::utils::pagination::PageParams;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Collisions are rare (36^8 codes) but the unique constraint can still
/// trip under load, so generation is retried a few times before giving up.
const MAX_CODE_ATTEMPTS: u32 = 5;

pub fn generate_confirmation_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CONFIRMATION_CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

const BOOKING_COLUMNS: &str =
    "id, name, email, phone, tickets_count, confirmation_code, event_id, created_at, updated_at";

#[derive(FromRow)]
struct BookingEventRow {
    id: i32,
    name: String,
    email: String,
    phone: String,
    tickets_count: i32,
    confirmation_code: String,
    event_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    event_title: String,
    event_date: NaiveDate,
    event_location: Option<String>,
}

impl BookingEventRow {
    fn booking(self) -> (Booking, i32, String, NaiveDate, Option<String>) {
        let BookingEventRow {
            id,
            name,
            email,
            phone,
            tickets_count,
            confirmation_code,
            event_id,
            created_at,
            updated_at,
            event_title,
            event_date,
            event_location,
        } = self;
        (
            Booking {
                id,
                name,
                email,
                phone,
                tickets_count,
                confirmation_code,
                event_id,
                created_at,
                updated_at,
            },
            event_id,
            event_title,
            event_date,
            event_location,
        )
    }
}

impl From<BookingEventRow> for BookingWithEvent {
    fn from(row: BookingEventRow) -> Self {
        let (booking, event_id, title, date, location) = row.booking();
        BookingWithEvent {
            booking,
            event: EventSummary {
                id: event_id,
                title,
                date,
                location: location.unwrap_or_default(),
            },
        }
    }
}

impl From<BookingEventRow> for BookingWithEventBrief {
    fn from(row: BookingEventRow) -> Self {
        let (booking, event_id, title, date, _) = row.booking();
        BookingWithEventBrief {
            booking,
            event: EventBrief {
                id: event_id,
                title,
                date,
            },
        }
    }
}

/// Validates the candidate, confirms the target event exists, then inserts
/// with a generated confirmation code. A unique-violation on the code leads
/// to regeneration; after `MAX_CODE_ATTEMPTS` the conflict is surfaced.
pub async fn create(pool: &PgPool, new: NewBooking) -> Result<Booking, AppError> {
    new.validate()?;

    let event_exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM event_info WHERE id = $1)")
            .bind(new.event_id)
            .fetch_one(pool)
            .await?;
    if !event_exists {
        return Err(AppError::NotFound("Event not found".to_string()));
    }

    // A caller-supplied code (seed, tests) is used as-is; a collision on it
    // is a real conflict, not bad luck.
    if let Some(code) = new.confirmation_code.clone() {
        return insert(pool, &new, &code).await;
    }

    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = generate_confirmation_code();
        match insert(pool, &new, &code).await {
            Err(AppError::Conflict(_)) => {
                tracing::warn!(attempt, "confirmation code collision, regenerating");
            }
            other => return other,
        }
    }

    Err(AppError::Conflict(
        "Could not allocate a unique confirmation code".to_string(),
    ))
}

async fn insert(pool: &PgPool, new: &NewBooking, code: &str) -> Result<Booking, AppError> {
    let result = sqlx::query_as::<_, Booking>(&format!(
        "INSERT INTO bookings (name, email, phone, tickets_count, confirmation_code, event_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {BOOKING_COLUMNS}"
    ))
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(new.tickets_count)
    .bind(code)
    .bind(new.event_id)
    .fetch_one(pool)
    .await;

    match result {
        Ok(booking) => Ok(booking),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
            "Confirmation code already in use".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

const JOINED_SELECT_FULL: &str = "SELECT b.id, b.name, b.email, b.phone, b.tickets_count,
            b.confirmation_code, b.event_id, b.created_at, b.updated_at,
            e.title AS event_title, e.date AS event_date, e.location AS event_location
     FROM bookings b
     JOIN event_info e ON e.id = b.event_id";

/// Case-sensitive exact lookup by confirmation code.
pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<BookingWithEvent, AppError> {
    let row: Option<BookingEventRow> =
        sqlx::query_as(&format!("{JOINED_SELECT_FULL} WHERE b.confirmation_code = $1"))
            .bind(code)
            .fetch_optional(pool)
            .await?;

    row.map(Into::into).ok_or_else(|| {
        AppError::NotFound("Booking not found with this confirmation code".to_string())
    })
}

/// A user's own bookings, newest first. NotFound when the email has none.
pub async fn list_by_email(
    pool: &PgPool,
    email: &str,
    params: PageParams,
) -> Result<Page<BookingWithEvent>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await?;

    if total == 0 {
        return Err(AppError::NotFound(
            "No bookings found for this email".to_string(),
        ));
    }

    let rows: Vec<BookingEventRow> = sqlx::query_as(&format!(
        "{JOINED_SELECT_FULL}
         WHERE b.email = $1
         ORDER BY b.created_at DESC, b.id DESC
         LIMIT $2 OFFSET $3"
    ))
    .bind(email)
    .bind(params.limit)
    .bind(params.offset())
    .fetch_all(pool)
    .await?;

    Ok(Page {
        items: rows.into_iter().map(Into::into).collect(),
        total,
    })
}

/// Admin-style listing over all bookings, optionally filtered by a
/// case-insensitive substring over name, email or confirmation code.
pub async fn list(
    pool: &PgPool,
    params: PageParams,
    search: Option<&str>,
) -> Result<Page<BookingWithEventBrief>, AppError> {
    let pattern = search.map(like_pattern);

    let total: i64 = match &pattern {
        Some(p) => {
            sqlx::query_scalar(
                "SELECT COUNT(*) FROM bookings
                 WHERE name ILIKE $1 OR email ILIKE $1 OR confirmation_code ILIKE $1",
            )
            .bind(p)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
                .fetch_one(pool)
                .await?
        }
    };

    let rows: Vec<BookingEventRow> = match &pattern {
        Some(p) => {
            sqlx::query_as(&format!(
                "{JOINED_SELECT_FULL}
                 WHERE b.name ILIKE $1 OR b.email ILIKE $1 OR b.confirmation_code ILIKE $1
                 ORDER BY b.created_at DESC, b.id DESC
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
                "{JOINED_SELECT_FULL}
                 ORDER BY b.created_at DESC, b.id DESC
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

/// Cancellation is a hard delete; the record is gone for good.
pub async fn delete_by_code(pool: &PgPool, code: &str) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM bookings WHERE confirmation_code = $1")
        .bind(code)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Booking not found".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::is_valid_confirmation_code;
    use crate::models::NewEvent;
    use crate::store::{events, test_support};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn new_event(tag: &str) -> NewEvent {
        NewEvent {
            title: format!("Soirée test {tag}"),
            date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            location: "Agadir".to_string(),
            description: "Soirée de test.".to_string(),
            banner_url: None,
        }
    }

    fn new_booking(email: &str, event_id: i32) -> NewBooking {
        NewBooking {
            name: "Ahmed".to_string(),
            email: email.to_string(),
            phone: "0612345678".to_string(),
            tickets_count: 2,
            event_id,
            confirmation_code: None,
        }
    }

    #[tokio::test]
    async fn test_created_booking_round_trips_by_code() {
        let Some(pool) = test_support::try_pool().await else {
            return;
        };
        let tag = generate_confirmation_code();
        let event = events::create(&pool, new_event(&tag)).await.unwrap();

        let booking = create(&pool, new_booking("roundtrip@example.com", event.id))
            .await
            .unwrap();
        assert!(is_valid_confirmation_code(&booking.confirmation_code));
        assert_eq!(booking.tickets_count, 2);

        let fetched = find_by_code(&pool, &booking.confirmation_code)
            .await
            .unwrap();
        assert_eq!(fetched.booking, booking);
        assert_eq!(fetched.event.id, event.id);
        assert_eq!(fetched.event.title, event.title);

        // Lookup is case-sensitive: the lowercased code is a different key
        let lowered = booking.confirmation_code.to_lowercase();
        if lowered != booking.confirmation_code {
            assert!(matches!(
                find_by_code(&pool, &lowered).await,
                Err(AppError::NotFound(_))
            ));
        }

        events::delete(&pool, event.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_deleted_booking_lookup_is_not_found() {
        let Some(pool) = test_support::try_pool().await else {
            return;
        };
        let tag = generate_confirmation_code();
        let event = events::create(&pool, new_event(&tag)).await.unwrap();
        let booking = create(&pool, new_booking("cancelme@example.com", event.id))
            .await
            .unwrap();

        delete_by_code(&pool, &booking.confirmation_code)
            .await
            .unwrap();

        assert!(matches!(
            find_by_code(&pool, &booking.confirmation_code).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_by_code(&pool, &booking.confirmation_code).await,
            Err(AppError::NotFound(_))
        ));

        events::delete(&pool, event.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_against_missing_event_is_not_found() {
        let Some(pool) = test_support::try_pool().await else {
            return;
        };
        let result = create(&pool, new_booking("nobody@example.com", i32::MAX)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_generated_codes_have_length_and_alphabet() {
        for _ in 0..200 {
            let code = generate_confirmation_code();
            assert!(is_valid_confirmation_code(&code), "bad code: {code}");
        }
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| generate_confirmation_code()).collect();
        // 36^8 possibilities; 100 draws colliding down to a handful would
        // mean the generator is broken.
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_alphabet_is_uppercase_alphanumeric_only() {
        assert_eq!(CODE_ALPHABET.len(), 36);
        for &b in CODE_ALPHABET {
            let c = b as char;
            assert!(c.is_ascii_uppercase() || c.is_ascii_digit());
        }
    }
}
