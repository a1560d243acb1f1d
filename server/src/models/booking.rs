use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::event::{EventBrief, EventSummary};
use crate::utils::error::AppError;

pub const CONFIRMATION_CODE_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tickets_count: i32,
    pub confirmation_code: String,
    pub event_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookingWithEvent {
    #[serde(flatten)]
    pub booking: Booking,
    pub event: EventSummary,
}

#[derive(Debug, Serialize)]
pub struct BookingWithEventBrief {
    #[serde(flatten)]
    pub booking: Booking,
    pub event: EventBrief,
}

/// Candidate booking. `confirmation_code` is only ever supplied by the seed
/// process or tests; the public create endpoint leaves it `None` and a code
/// is generated before insert.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tickets_count: i32,
    pub event_id: i32,
    pub confirmation_code: Option<String>,
}

impl NewBooking {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("Valid email is required".to_string()));
        }
        if self.phone.trim().is_empty() {
            return Err(AppError::Validation("Phone is required".to_string()));
        }
        if self.tickets_count < 1 {
            return Err(AppError::Validation(
                "At least 1 ticket is required".to_string(),
            ));
        }
        if let Some(code) = &self.confirmation_code {
            if !is_valid_confirmation_code(code) {
                return Err(AppError::Validation(
                    "Confirmation code must be 8 characters from A-Z0-9".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !email.contains(char::is_whitespace)
}

pub fn is_valid_confirmation_code(code: &str) -> bool {
    code.len() == CONFIRMATION_CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
