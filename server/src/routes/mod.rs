use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, security_header_layers};
use crate::handlers::{artists, bookings, events, health_check};
use crate::AppState;

pub fn create_routes(state: AppState) -> Router {
    // The literal `email` segment wins over the `:code` capture, so
    // /bookings/email/... is never read as a confirmation code.
    let api = Router::new()
        .route("/event", get(events::get_event))
        .route("/event/stats", get(events::get_event_stats))
        .route("/artists", get(artists::list_artists))
        .route("/artists/:id", get(artists::get_artist))
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/email/:email", get(bookings::list_bookings_by_email))
        .route(
            "/bookings/:code",
            get(bookings::get_booking_by_code).delete(bookings::delete_booking),
        );

    let mut app = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer());

    for layer in security_header_layers() {
        app = app.layer(layer);
    }

    app.with_state(state)
}
