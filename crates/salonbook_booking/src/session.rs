// --- File: crates/salonbook_booking/src/session.rs ---
//! Holder for the slot grid a customer is currently looking at.
//!
//! Whenever the selection changes a new computation starts. Results are
//! applied last-write-wins by selection: a computation that finishes after a
//! newer one was started is dropped, whatever the completion order.
use crate::error::BookingError;
use crate::logic::{
    compute_slots, submit_booking, BookingDraft, BookingOutcome, SlotsRequest, SlotsResponse,
};
use crate::models::AuthContext;
use crate::service::BookingBackend;
use chrono::NaiveDateTime;
use salonbook_slots::{SchedulingPolicy, SlotError, StaffSelector};
use tokio::sync::RwLock;
use tracing::debug;

/// Proof that a computation was started; hand it back to [`SlotSession::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTicket {
    generation: u64,
}

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    selection: Option<SlotsRequest>,
    grid: Option<SlotsResponse>,
}

#[derive(Debug, Default)]
pub struct SlotSession {
    state: RwLock<SessionState>,
}

impl SlotSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `selection` as current and drops the grid shown for the
    /// previous one.
    pub async fn begin(&self, selection: SlotsRequest) -> SlotTicket {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.selection = Some(selection);
        state.grid = None;
        SlotTicket {
            generation: state.generation,
        }
    }

    /// Applies `grid` if no newer computation has begun. Returns whether it
    /// was applied.
    pub async fn complete(&self, ticket: SlotTicket, grid: SlotsResponse) -> bool {
        let mut state = self.state.write().await;
        if ticket.generation != state.generation {
            debug!(
                "Discarding stale slot grid (generation {} < {})",
                ticket.generation, state.generation
            );
            return false;
        }
        state.grid = Some(grid);
        true
    }

    /// Clears the grid and drops any computation still in flight. The
    /// selection is kept so the caller can recompute.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.grid = None;
    }

    pub async fn current(&self) -> Option<SlotsResponse> {
        self.state.read().await.grid.clone()
    }

    pub async fn selection(&self) -> Option<SlotsRequest> {
        self.state.read().await.selection.clone()
    }

    /// Begins, computes and completes in one go. `Ok(None)` means a newer
    /// selection superseded this one while it was computing.
    pub async fn refresh<B>(
        &self,
        backend: &B,
        policy: &SchedulingPolicy,
        selection: SlotsRequest,
        now: NaiveDateTime,
    ) -> Result<Option<SlotsResponse>, BookingError>
    where
        B: BookingBackend + ?Sized,
    {
        let ticket = self.begin(selection.clone()).await;
        let grid = compute_slots(backend, policy, &selection, now).await?;
        if self.complete(ticket, grid.clone()).await {
            Ok(Some(grid))
        } else {
            Ok(None)
        }
    }

    /// Submits a booking made from the current grid. When the chosen time
    /// turns out to be taken, either on the fresh re-check or by the
    /// backend, the grid is invalidated before the error is returned.
    pub async fn submit<B, S>(
        &self,
        backend: &B,
        policy: &SchedulingPolicy,
        auth: &AuthContext,
        draft: &BookingDraft,
        selector: &mut S,
        now: NaiveDateTime,
    ) -> Result<BookingOutcome, BookingError>
    where
        B: BookingBackend + ?Sized,
        S: StaffSelector + Send + ?Sized,
    {
        let result = submit_booking(backend, policy, auth, draft, selector, now).await;
        if let Err(err) = &result {
            if grid_is_stale(err) {
                debug!("Booking at {} was refused, invalidating the slot grid", draft.start);
                self.invalidate().await;
            }
        }
        result
    }
}

fn grid_is_stale(err: &BookingError) -> bool {
    matches!(
        err,
        BookingError::SubmissionRejected(_)
            | BookingError::Slot(
                SlotError::NoStaffAvailable { .. }
                    | SlotError::StaffUnavailable { .. }
                    | SlotError::SlotInPast { .. }
            )
    )
}
