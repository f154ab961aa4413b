// --- File: crates/salonbook_booking/src/routes.rs ---
use crate::error::BookingError;
use crate::handlers::{book_slot_handler, get_slots_handler, reschedule_handler, BookingState};
use axum::{
    routing::{get, post},
    Router,
};
use salonbook_config::AppConfig;
use std::sync::Arc;

/// Creates the booking router backed by the HTTP booking backend from `config`.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, BookingError> {
    let state = BookingState::from_config(&config)?;
    Ok(router(Arc::new(state)))
}

/// Creates the booking router around an existing state.
pub fn router(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/slots", get(get_slots_handler))
        .route("/book", post(book_slot_handler))
        .route("/reschedule", post(reschedule_handler))
        .with_state(state)
}
