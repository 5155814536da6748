// Submission flow: Idle -> Submitting -> {Confirmed, Failed} -> Idle.
// The transport behind the flow is abstract so the simulated backend can be
// swapped for a real one without touching the state machine.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::Tour;
use crate::draft::BookingDraft;
use crate::notify::Notifier;
use crate::validation::{validate, ValidationReport};

// Transport-level failures. The state machine treats them all the same way:
// the session lands in Failed with the draft retained for a retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("request timeout after {0}ms")]
    Timeout(u64),

    #[error("booking rejected: {0}")]
    Rejected(String),

    #[error("network error: {0}")]
    Network(String),
}

// Why a submit call was refused or failed
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("draft has validation errors")]
    Invalid(ValidationReport),

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error(transparent)]
    Transport(#[from] SubmissionError),
}

/// Successful booking acknowledgement from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub booking_id: String,
    pub confirmation_code: String,
}

/// Where the session currently is in the submission flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Confirmed(Confirmation),
    Failed(SubmissionError),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

/// Capability to send a validated draft to a backend for confirmation.
///
/// The reference implementation is [`SimulatedTransport`]; a production
/// deployment substitutes a real network client here.
#[async_trait]
pub trait BookingTransport: Send + Sync {
    async fn submit(&self, draft: &BookingDraft) -> Result<Confirmation, SubmissionError>;
}

/// Stand-in backend: waits a fixed artificial delay and confirms.
///
/// `set_delay` and `fail_next_requests` exist so tests can exercise the
/// failure path; by default every submission succeeds after 1.5 seconds,
/// matching the behavior the form shipped with.
#[derive(Debug)]
pub struct SimulatedTransport {
    delay_ms: AtomicU64,
    fail_next: AtomicUsize,
    request_count: AtomicUsize,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTransport {
    pub fn new() -> Self {
        Self {
            delay_ms: AtomicU64::new(1500),
            fail_next: AtomicUsize::new(0),
            request_count: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        let transport = Self::new();
        transport.set_delay(delay);
        transport
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Makes the next `count` submissions fail with a network error.
    pub fn fail_next_requests(&self, count: usize) {
        self.fail_next.store(count, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingTransport for SimulatedTransport {
    async fn submit(&self, _draft: &BookingDraft) -> Result<Confirmation, SubmissionError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let fail_count = self.fail_next.load(Ordering::SeqCst);
        if fail_count > 0 {
            self.fail_next.store(fail_count - 1, Ordering::SeqCst);
            return Err(SubmissionError::Network("service unavailable".to_string()));
        }

        Ok(Confirmation {
            booking_id: format!("booking-{}", rand::random::<u32>()),
            confirmation_code: format!("CONF{}", rand::random::<u16>()),
        })
    }
}

/// One open booking form: a tour, a draft, and the submission state machine.
///
/// The session owns its draft exclusively for its lifetime. Edits replace
/// the draft wholesale; `submit` refuses to run while a submission is in
/// flight and only reaches the transport when validation passes.
pub struct BookingSession<T: BookingTransport> {
    tour: Tour,
    transport: T,
    notifier: Arc<dyn Notifier>,
    draft: BookingDraft,
    state: SubmissionState,
}

impl<T: BookingTransport> BookingSession<T> {
    pub fn open(tour: Tour, transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            tour,
            transport,
            notifier,
            draft: BookingDraft::new(),
            state: SubmissionState::Idle,
        }
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replaces the draft with an edited copy.
    pub fn edit(&mut self, draft: BookingDraft) {
        self.draft = draft;
    }

    /// Validates the current draft without submitting it.
    pub fn validate(&self) -> ValidationReport {
        validate(&self.draft)
    }

    /// Runs the full submission flow for the current draft.
    ///
    /// Refused while a submission is in flight. A draft with validation
    /// errors never reaches the transport. On confirmation the draft is
    /// discarded; on transport failure it is retained so the user can
    /// resubmit after `acknowledge`.
    pub async fn submit(&mut self) -> Result<Confirmation, SubmitError> {
        if self.state.is_in_flight() {
            return Err(SubmitError::AlreadySubmitting);
        }

        let report = self.validate();
        if !report.is_submittable() {
            tracing::debug!(errors = report.len(), "draft blocked by validation");
            return Err(SubmitError::Invalid(report));
        }

        self.state = SubmissionState::Submitting;
        tracing::debug!(tour = %self.tour.name, "submitting booking");

        match self.transport.submit(&self.draft).await {
            Ok(confirmation) => {
                tracing::info!(
                    booking_id = %confirmation.booking_id,
                    code = %confirmation.confirmation_code,
                    "booking confirmed"
                );
                self.notifier.notify(&self.confirmation_message());
                self.state = SubmissionState::Confirmed(confirmation.clone());
                self.draft = BookingDraft::new();
                Ok(confirmation)
            }
            Err(err) => {
                tracing::warn!(error = %err, "booking submission failed");
                self.notifier.notify("Booking failed. Please try again.");
                self.state = SubmissionState::Failed(err.clone());
                Err(SubmitError::Transport(err))
            }
        }
    }

    /// Exits a terminal state back to Idle. A no-op in Idle or Submitting.
    pub fn acknowledge(&mut self) {
        match self.state {
            SubmissionState::Confirmed(_) | SubmissionState::Failed(_) => {
                self.state = SubmissionState::Idle;
            }
            _ => {}
        }
    }

    fn confirmation_message(&self) -> String {
        let dates = match (self.draft.check_in, self.draft.check_out) {
            (Some(check_in), Some(check_out)) => format!("{} - {}", check_in, check_out),
            _ => String::new(),
        };
        format!(
            "Booking confirmed for {}!\nDates: {}\nConfirmation sent to {}",
            self.tour.name, dates, self.draft.email
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{StaticTourCatalog, TourCatalog};
    use crate::notify::MemoryNotifier;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled_draft() -> BookingDraft {
        BookingDraft::new()
            .with_check_in(date(2025, 6, 1))
            .with_check_out(date(2025, 6, 5))
            .with_guests(2)
            .with_first_name("Ana")
            .with_last_name("Lee")
            .with_email("a@b.com")
            .with_phone("0712345678")
            .with_agree_to_terms(true)
    }

    fn open_session(notifier: Arc<MemoryNotifier>) -> BookingSession<SimulatedTransport> {
        let tour = StaticTourCatalog::default().find(1).unwrap().clone();
        BookingSession::open(
            tour,
            SimulatedTransport::with_delay(Duration::ZERO),
            notifier,
        )
    }

    #[tokio::test]
    async fn test_valid_draft_submits_and_confirms() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut session = open_session(notifier.clone());
        session.edit(filled_draft());

        let confirmation = session.submit().await.unwrap();

        assert!(confirmation.booking_id.starts_with("booking-"));
        assert!(confirmation.confirmation_code.starts_with("CONF"));
        assert!(matches!(session.state(), SubmissionState::Confirmed(_)));

        // Confirmation discards the draft
        assert_eq!(session.draft(), &BookingDraft::new());

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            "Booking confirmed for Maasai Mara Safari!\n\
             Dates: 2025-06-01 - 2025-06-05\n\
             Confirmation sent to a@b.com"
        );

        session.acknowledge();
        assert_eq!(session.state(), &SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_the_transport() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut session = open_session(notifier.clone());
        session.edit(filled_draft().with_check_out(date(2025, 5, 30)));

        let err = session.submit().await.unwrap_err();
        match err {
            SubmitError::Invalid(report) => {
                assert_eq!(
                    report.error(crate::validation::FormField::CheckOutDate),
                    Some("Must be after check-in")
                );
            }
            other => panic!("expected validation failure, got {other:?}"),
        }

        assert_eq!(session.state(), &SubmissionState::Idle);
        assert_eq!(session.transport().request_count(), 0);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_retains_the_draft_for_resubmission() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut session = open_session(notifier.clone());
        session.edit(filled_draft());
        session.transport().fail_next_requests(1);

        let err = session.submit().await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Transport(SubmissionError::Network(_))
        ));
        assert!(matches!(session.state(), SubmissionState::Failed(_)));

        // Draft is intact and the user was told to retry
        assert_eq!(session.draft(), &filled_draft());
        assert_eq!(notifier.messages(), vec!["Booking failed. Please try again."]);

        session.acknowledge();
        assert_eq!(session.state(), &SubmissionState::Idle);

        // The failure was transient; the same draft now goes through
        let confirmation = session.submit().await.unwrap();
        assert!(confirmation.booking_id.starts_with("booking-"));
        assert_eq!(session.transport().request_count(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_refused_while_in_flight() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut session = open_session(notifier);
        session.edit(filled_draft());
        session.state = SubmissionState::Submitting;

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::AlreadySubmitting));
        assert_eq!(session.transport().request_count(), 0);
    }

    #[test]
    fn test_session_validate_mirrors_the_pure_function() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut session = open_session(notifier);
        session.edit(filled_draft().with_email("not-an-email"));

        let report = session.validate();
        assert_eq!(report, validate(session.draft()));
        assert!(!report.is_submittable());

        // Submitting from a sync context behaves the same
        let err = tokio_test::block_on(session.submit()).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_acknowledge_is_a_no_op_outside_terminal_states() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut session = open_session(notifier);

        session.acknowledge();
        assert_eq!(session.state(), &SubmissionState::Idle);

        session.state = SubmissionState::Submitting;
        session.acknowledge();
        assert!(session.state().is_in_flight());
    }
}
