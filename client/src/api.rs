use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::ResponseCache;
use crate::error::ClientError;
use crate::store::BookingStore;
use crate::types::{
    Artist, Booking, CreateBookingRequest, Envelope, EventDetails, EventStats, Paginated,
    Pagination,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads retry a couple of transport failures before giving up; writes never
/// retry, a booking must not be created twice.
const READ_RETRIES: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(300);

const EVENT_TTL: Duration = Duration::from_secs(5 * 60);
const BOOKING_TTL: Duration = Duration::from_secs(60);
const BOOKINGS_BY_EMAIL_TTL: Duration = Duration::from_secs(30);

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: ResponseCache,
}

impl ApiClient {
    /// `base_url` should include the `/api` prefix, e.g.
    /// `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: ResponseCache::new(),
        })
    }

    pub async fn event(&self) -> Result<EventDetails, ClientError> {
        let value = self.get_cached("/event", EVENT_TTL).await?;
        decode_data(value)
    }

    pub async fn event_stats(&self) -> Result<EventStats, ClientError> {
        let value = self.get_cached("/event/stats", EVENT_TTL).await?;
        decode_data(value)
    }

    pub async fn artists(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
        search: Option<&str>,
    ) -> Result<Paginated<Artist>, ClientError> {
        let path = list_path("/artists", page, limit, search);
        let value = self.get_cached(&path, EVENT_TTL).await?;
        decode_page(value)
    }

    pub async fn artist(&self, id: i32) -> Result<Artist, ClientError> {
        let value = self.get_cached(&format!("/artists/{id}"), EVENT_TTL).await?;
        decode_data(value)
    }

    pub async fn booking_by_code(&self, code: &str) -> Result<Booking, ClientError> {
        let value = self
            .get_cached(&format!("/bookings/{code}"), BOOKING_TTL)
            .await?;
        decode_data(value)
    }

    /// Fetches the server's bookings for `email` and reconciles the local
    /// store against them. The local list is replaced only when the
    /// response is the complete listing (a single page); a partial page
    /// must not wipe local records of the bookings it does not show.
    pub async fn bookings_by_email(
        &self,
        store: &mut BookingStore,
        email: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Paginated<Booking>, ClientError> {
        let base = format!("/bookings/email/{}", urlencoding::encode(email));
        let path = list_path(&base, page, limit, None);
        let value = self.get_cached(&path, BOOKINGS_BY_EMAIL_TTL).await?;
        let result: Paginated<Booking> = decode_page(value)?;
        if covers_full_listing(&result.pagination) {
            store.reconcile(email, result.items.clone())?;
        }
        Ok(result)
    }

    /// Creates a booking, records it locally, and invalidates the cached
    /// booking listings.
    pub async fn create_booking(
        &self,
        store: &mut BookingStore,
        request: CreateBookingRequest,
    ) -> Result<Booking, ClientError> {
        let url = format!("{}/bookings", self.base_url);
        let response = self.http.post(&url).json(&request).send().await?;
        let value = read_envelope(response).await?;

        let booking: Booking = decode_data(value)?;
        store.add(booking.clone())?;
        self.cache.invalidate_prefix("/bookings");
        Ok(booking)
    }

    /// Cancels a booking by confirmation code and drops it from the local
    /// store. Returns the server's confirmation message.
    pub async fn cancel_booking(
        &self,
        store: &mut BookingStore,
        code: &str,
    ) -> Result<String, ClientError> {
        let url = format!("{}/bookings/{}", self.base_url, code);
        let response = self.http.delete(&url).send().await?;
        let value = read_envelope(response).await?;

        store.remove(code)?;
        self.cache.invalidate_prefix("/bookings");

        let envelope: Envelope<Value> = serde_json::from_value(value)?;
        Ok(envelope
            .message
            .unwrap_or_else(|| "Booking cancelled".to_string()))
    }

    async fn get_cached(&self, path: &str, ttl: Duration) -> Result<Value, ClientError> {
        if let Some(hit) = self.cache.get(path) {
            return Ok(hit);
        }

        let value = self.get_with_retry(path).await?;
        self.cache.put(path, ttl, value.clone());
        Ok(value)
    }

    async fn get_with_retry(&self, path: &str) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0;
        loop {
            match self.http.get(&url).send().await {
                Ok(response) => return read_envelope(response).await,
                Err(err) if attempt < READ_RETRIES => {
                    attempt += 1;
                    tracing::warn!(%url, attempt, error = %err, "read failed, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

async fn read_envelope(response: reqwest::Response) -> Result<Value, ClientError> {
    let status = response.status().as_u16();
    let value: Value = response.json().await?;
    check_envelope(status, value)
}

fn check_envelope(status: u16, value: Value) -> Result<Value, ClientError> {
    let success = value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !(200..300).contains(&status) || !success {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        return Err(ClientError::Api { status, message });
    }
    Ok(value)
}

fn decode_data<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    let envelope: Envelope<T> = serde_json::from_value(value)?;
    envelope.data.ok_or(ClientError::Api {
        status: 200,
        message: "response missing data".to_string(),
    })
}

fn decode_page<T: DeserializeOwned>(value: Value) -> Result<Paginated<T>, ClientError> {
    let envelope: Envelope<Vec<T>> = serde_json::from_value(value)?;
    let pagination = envelope.pagination.ok_or(ClientError::Api {
        status: 200,
        message: "response missing pagination".to_string(),
    })?;
    Ok(Paginated {
        items: envelope.data.unwrap_or_default(),
        pagination,
    })
}

/// A response holds the entire server-side list only when it fits in one
/// page; anything else is a window onto it.
fn covers_full_listing(pagination: &Pagination) -> bool {
    pagination.total_pages <= 1
}

fn list_path(base: &str, page: Option<i64>, limit: Option<i64>, search: Option<&str>) -> String {
    let mut query = Vec::new();
    if let Some(page) = page {
        query.push(format!("page={page}"));
    }
    if let Some(limit) = limit {
        query.push(format!("limit={limit}"));
    }
    if let Some(search) = search {
        query.push(format!("search={}", urlencoding::encode(search)));
    }

    if query.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_path_without_params() {
        assert_eq!(list_path("/artists", None, None, None), "/artists");
    }

    #[test]
    fn test_list_path_with_all_params() {
        assert_eq!(
            list_path("/artists", Some(2), Some(5), Some("maalem")),
            "/artists?page=2&limit=5&search=maalem"
        );
    }

    #[test]
    fn test_list_path_encodes_the_search_term() {
        assert_eq!(
            list_path("/bookings", None, None, Some("a b&c")),
            "/bookings?search=a%20b%26c"
        );
    }

    #[test]
    fn test_check_envelope_passes_success() {
        let value = json!({"success": true, "data": {"id": 1}});
        assert!(check_envelope(200, value).is_ok());
    }

    #[test]
    fn test_check_envelope_surfaces_server_message() {
        let value = json!({"success": false, "message": "Booking not found"});
        let err = check_envelope(404, value).unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Booking not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_envelope_rejects_success_false_with_200() {
        let value = json!({"success": false, "message": "odd"});
        assert!(check_envelope(200, value).is_err());
    }

    #[test]
    fn test_reconcile_only_covers_single_page_listings() {
        let single = Pagination {
            current_page: 1,
            total_pages: 1,
            total_items: 3,
            items_per_page: 10,
        };
        assert!(covers_full_listing(&single));

        // Twelve bookings behind a limit of ten: replacing from either page
        // would drop the other's records.
        let partial = Pagination {
            current_page: 1,
            total_pages: 2,
            total_items: 12,
            items_per_page: 10,
        };
        assert!(!covers_full_listing(&partial));
    }

    #[test]
    fn test_decode_page_requires_pagination() {
        let value = json!({"success": true, "data": []});
        assert!(decode_page::<Booking>(value).is_err());
    }
}
