//! Remote sync engine: single-flight create/update with a generation
//! guard and transient success notices.
//!
//! Each logical action (edit-save, create-submit) owns a [`SyncAction`]
//! running `Idle → Pending → {Succeeded, Failed} → Idle`. `begin` rejects
//! re-entry while a call is outstanding; a renderer disables the
//! triggering control whenever the action is pending. Responses are
//! applied to the store only by the completion step, and only when their
//! ticket is still current — a response that arrives after the user
//! abandoned the action is dropped, not applied.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use vitrine_core::{
    validate_new, validate_patch, CatalogError, CatalogState, EditPatch, FieldError, NewRecord,
    Record,
};

use crate::api::{ApiClient, ApiError};

/// How long the update success notice stays up.
pub const UPDATE_NOTICE_TTL: Duration = Duration::from_secs(3);

/// How long the create success notice stays up. Its expiry also closes
/// the creation form.
pub const CREATE_NOTICE_TTL: Duration = Duration::from_secs(2);

/// Why a submit did not produce a canonical record.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local precondition failures, one entry per field; checked before
    /// any network dispatch. The draft stays open for correction.
    #[error("invalid draft: {}", failed_fields(.0))]
    Invalid(Vec<FieldError>),

    /// A call for this action is already pending.
    #[error("a request for this action is already pending")]
    InFlight,

    /// The action was invalidated while the call was in flight; the
    /// response was dropped without touching the store.
    #[error("response discarded: action was superseded")]
    Superseded,

    /// The remote call failed; the draft is preserved for retry.
    #[error(transparent)]
    Api(#[from] ApiError),
}

fn failed_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lifecycle of one logical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    /// A call is outstanding; the triggering control is disabled.
    Pending,
    /// The call landed; a success notice is showing.
    Succeeded,
    /// The call failed; the control is re-enabled and the error stays
    /// visible until the next attempt.
    Failed,
}

/// Handed out by [`SyncAction::begin`]; a completion must present it, so
/// stale responses can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTicket {
    generation: u64,
}

/// A transient banner with a fixed lifetime.
#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    posted_at: Instant,
    ttl: Duration,
}

impl Notice {
    fn new(message: impl Into<String>, posted_at: Instant, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            posted_at,
            ttl,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.posted_at) >= self.ttl
    }
}

/// Single-flight state machine for one logical action.
#[derive(Debug, Default)]
pub struct SyncAction {
    phase: SyncPhase,
    generation: u64,
    notice: Option<Notice>,
    error: Option<String>,
}

impl SyncAction {
    /// Enter `Pending`, clearing any stale banners. Rejects re-entry
    /// while a call is outstanding.
    pub fn begin(&mut self) -> Result<SyncTicket, SubmitError> {
        if self.phase == SyncPhase::Pending {
            return Err(SubmitError::InFlight);
        }
        self.phase = SyncPhase::Pending;
        self.generation += 1;
        self.notice = None;
        self.error = None;
        Ok(SyncTicket {
            generation: self.generation,
        })
    }

    /// Abandon whatever is in flight (form closed, target changed). A
    /// response still travelling will be dropped on arrival.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.phase = SyncPhase::Idle;
        self.notice = None;
        self.error = None;
    }

    /// Drop an expired success notice and return to `Idle`.
    pub fn expire_notice(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if notice.is_expired(now) {
                self.notice = None;
                if self.phase == SyncPhase::Succeeded {
                    self.phase = SyncPhase::Idle;
                }
            }
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == SyncPhase::Pending
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn succeed(
        &mut self,
        ticket: SyncTicket,
        message: impl Into<String>,
        ttl: Duration,
        now: Instant,
    ) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.phase = SyncPhase::Succeeded;
        self.notice = Some(Notice::new(message, now, ttl));
        true
    }

    fn fail(&mut self, ticket: SyncTicket, message: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.phase = SyncPhase::Failed;
        self.error = Some(message.into());
        true
    }

    fn accepts(&self, ticket: SyncTicket) -> bool {
        self.phase == SyncPhase::Pending && ticket.generation == self.generation
    }
}

/// Coordinates the API client, the per-action state machines, and the
/// catalog store.
pub struct SyncEngine {
    api: ApiClient,
    update: SyncAction,
    create: SyncAction,
}

impl SyncEngine {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            update: SyncAction::default(),
            create: SyncAction::default(),
        }
    }

    pub fn update_action(&self) -> &SyncAction {
        &self.update
    }

    pub fn create_action(&self) -> &SyncAction {
        &self.create
    }

    /// The user closed the edit form or moved to a different record.
    pub fn abandon_update(&mut self) {
        self.update.invalidate();
    }

    /// The user closed the creation form.
    pub fn abandon_create(&mut self) {
        self.create.invalidate();
    }

    /// Sweep expired success notices.
    pub fn expire_notices(&mut self, now: Instant) {
        self.update.expire_notice(now);
        self.create.expire_notice(now);
    }

    /// Save an edit: validate, PUT, then reconcile the canonical record
    /// into the store. Nothing local changes on failure and the draft is
    /// never consumed.
    pub async fn save_update(
        &mut self,
        catalog: &mut CatalogState,
        patch: &EditPatch,
    ) -> Result<Record, SubmitError> {
        let errors = validate_patch(patch);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }
        let ticket = self.update.begin()?;
        let outcome = self.api.update_record(patch).await;
        self.complete_update(ticket, outcome, catalog)
    }

    /// Submit a creation draft: validate, POST, then prepend the
    /// server-assigned record and rebuild the view.
    pub async fn submit_create(
        &mut self,
        catalog: &mut CatalogState,
        draft: &NewRecord,
    ) -> Result<Record, SubmitError> {
        let errors = validate_new(draft);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }
        let ticket = self.create.begin()?;
        let draft = draft.clone().with_placeholder_image();
        let outcome = self.api.create_record(&draft).await;
        self.complete_create(ticket, outcome, catalog)
    }

    /// Completion handler for an update response; the only place an
    /// update touches the store.
    fn complete_update(
        &mut self,
        ticket: SyncTicket,
        outcome: Result<Record, ApiError>,
        catalog: &mut CatalogState,
    ) -> Result<Record, SubmitError> {
        match outcome {
            Ok(record) => {
                if !self
                    .update
                    .succeed(ticket, "Product updated", UPDATE_NOTICE_TTL, Instant::now())
                {
                    debug!(id = record.id, "dropping superseded update response");
                    return Err(SubmitError::Superseded);
                }
                if let Err(CatalogError::NotFound(id)) = catalog.apply_update(record.clone()) {
                    // Store desync; the canonical record still flows to the caller.
                    warn!(id, "update target missing from local catalog");
                }
                debug!(id = record.id, "record updated");
                Ok(record)
            }
            Err(err) => {
                if !self.update.fail(ticket, err.to_string()) {
                    debug!("dropping superseded update failure");
                    return Err(SubmitError::Superseded);
                }
                Err(SubmitError::Api(err))
            }
        }
    }

    /// Completion handler for a create response; the only place a create
    /// touches the store.
    fn complete_create(
        &mut self,
        ticket: SyncTicket,
        outcome: Result<Record, ApiError>,
        catalog: &mut CatalogState,
    ) -> Result<Record, SubmitError> {
        match outcome {
            Ok(record) => {
                if !self
                    .create
                    .succeed(ticket, "Product created", CREATE_NOTICE_TTL, Instant::now())
                {
                    debug!(id = record.id, "dropping superseded create response");
                    return Err(SubmitError::Superseded);
                }
                catalog.apply_create(record.clone());
                debug!(id = record.id, "record created");
                Ok(record)
            }
            Err(err) => {
                if !self.create.fail(ticket, err.to_string()) {
                    debug!("dropping superseded create failure");
                    return Err(SubmitError::Superseded);
                }
                Err(SubmitError::Api(err))
            }
        }
    }
}
