use chrono::Utc;
use serde::Serialize;

use crate::models::{BookingInput, BookingRequest, BookingWindow, Field, LeadContext, ValidationErrors};
use crate::services::submission::{DelegateResponse, SubmissionDelegate};
use crate::services::validation;

pub const SUBMIT_FALLBACK_ERROR: &str = "Failed to book slot. Please try again.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CloseReason {
    Booked,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Submitting,
    Closed(CloseReason),
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::Submitting => "submitting",
            ControllerState::Closed(_) => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success,
    Failure { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the delegate was not called.
    Invalid(ValidationErrors),
    Submitted(SubmissionResult),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BookingError {
    #[error("a booking submission is already in flight")]
    InFlight,

    #[error("no booking submission is in flight")]
    NotSubmitting,

    #[error("booking is closed")]
    Closed,
}

type OnClose = Box<dyn FnOnce(CloseReason) + Send>;

pub struct BookingController {
    input: BookingInput,
    errors: ValidationErrors,
    submit_error: Option<String>,
    state: ControllerState,
    window: BookingWindow,
    on_close: Option<OnClose>,
}

impl BookingController {
    /// Opens a booking, pre-filling whatever the lead context already knows.
    pub fn open(lead: &LeadContext, window: BookingWindow) -> Self {
        let input = BookingInput {
            name: lead
                .lead_name
                .as_deref()
                .map(validation::sanitize_name)
                .unwrap_or_default(),
            mobile_no: lead
                .lead_phone
                .as_deref()
                .map(validation::sanitize_mobile)
                .unwrap_or_default(),
            date: None,
            time_slot: None,
            terms_accepted: lead.terms_accepted,
        };

        Self {
            input,
            errors: ValidationErrors::new(),
            submit_error: None,
            state: ControllerState::Idle,
            window,
            on_close: None,
        }
    }

    /// Registers the callback fired when the booking closes. It runs at most once.
    pub fn with_on_close(mut self, on_close: impl FnOnce(CloseReason) + Send + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn input(&self) -> &BookingInput {
        &self.input
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn window(&self) -> &BookingWindow {
        &self.window
    }

    /// Moves the date bounds, e.g. when the dialog stays open past midnight. The next
    /// `validate` checks the stored date against the new window.
    pub fn refresh_window(&mut self, window: BookingWindow) {
        self.window = window;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, ControllerState::Closed(_))
    }

    pub fn is_submitting(&self) -> bool {
        self.state == ControllerState::Submitting
    }

    pub fn update_field(&mut self, field: Field, raw: &str) -> Result<&BookingInput, BookingError> {
        if !self.is_open() {
            return Err(BookingError::Closed);
        }

        validation::apply_field(&mut self.input, field, raw);
        match validation::inline_error(&self.input, field) {
            Some(message) => self.errors.set(field, message),
            None => self.errors.clear(field),
        }

        Ok(&self.input)
    }

    pub fn toggle_terms(&mut self) -> Result<bool, BookingError> {
        let next = if self.input.terms_accepted { "false" } else { "true" };
        self.update_field(Field::Terms, next)?;
        Ok(self.input.terms_accepted)
    }

    pub fn validate(&self) -> ValidationErrors {
        validation::validate(&self.input, &self.window)
    }

    /// Validates the record and, if it passes, moves to `Submitting` and hands back the
    /// request for the delegate. `None` means validation failed and `errors()` says why.
    pub fn begin_submit(&mut self) -> Result<Option<BookingRequest>, BookingError> {
        match self.state {
            ControllerState::Submitting => return Err(BookingError::InFlight),
            ControllerState::Closed(_) => return Err(BookingError::Closed),
            ControllerState::Idle => {}
        }

        self.submit_error = None;
        self.errors = self.validate();
        if !self.errors.is_empty() {
            tracing::debug!(
                fields = ?self.errors.fields().map(|f| f.as_str()).collect::<Vec<_>>(),
                "booking failed validation"
            );
            return Ok(None);
        }

        self.state = ControllerState::Submitting;
        Ok(Some(BookingRequest {
            input: self.input.clone(),
            booking_timestamp: Utc::now(),
        }))
    }

    /// Applies the delegate's answer to a submission started by [`Self::begin_submit`].
    pub fn finish_submit(
        &mut self,
        response: anyhow::Result<DelegateResponse>,
    ) -> Result<SubmissionResult, BookingError> {
        if self.state != ControllerState::Submitting {
            return Err(BookingError::NotSubmitting);
        }

        let reason = match response {
            Ok(resp) if resp.success => {
                tracing::info!(slot = ?self.input.time_slot, date = ?self.input.date, "booking accepted");
                self.input = BookingInput::default();
                self.errors = ValidationErrors::new();
                self.submit_error = None;
                self.close(CloseReason::Booked);
                return Ok(SubmissionResult::Success);
            }
            Ok(resp) => {
                tracing::warn!(error = ?resp.error, "booking rejected by delegate");
                resp.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| SUBMIT_FALLBACK_ERROR.to_string())
            }
            Err(e) => {
                tracing::error!(error = %e, "booking submission failed");
                SUBMIT_FALLBACK_ERROR.to_string()
            }
        };

        self.state = ControllerState::Idle;
        self.submit_error = Some(reason.clone());
        Ok(SubmissionResult::Failure { reason })
    }

    pub async fn submit(
        &mut self,
        delegate: &dyn SubmissionDelegate,
    ) -> Result<SubmitOutcome, BookingError> {
        let Some(request) = self.begin_submit()? else {
            return Ok(SubmitOutcome::Invalid(self.errors.clone()));
        };

        let response = delegate.submit(&request).await;
        self.finish_submit(response).map(SubmitOutcome::Submitted)
    }

    /// Explicit dismissal by the user. Closing twice is a no-op.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        match self.state {
            ControllerState::Submitting => Err(BookingError::InFlight),
            ControllerState::Closed(_) => Ok(()),
            ControllerState::Idle => {
                self.close(CloseReason::Cancelled);
                Ok(())
            }
        }
    }

    fn close(&mut self, reason: CloseReason) {
        self.state = ControllerState::Closed(reason);
        if let Some(on_close) = self.on_close.take() {
            on_close(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::models::TimeSlot;

    struct MockDelegate {
        calls: AtomicUsize,
        replies: Mutex<Vec<anyhow::Result<DelegateResponse>>>,
    }

    impl MockDelegate {
        fn replying(replies: Vec<anyhow::Result<DelegateResponse>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                replies: Mutex::new(replies),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SubmissionDelegate for MockDelegate {
        async fn submit(&self, _request: &BookingRequest) -> anyhow::Result<DelegateResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn window() -> BookingWindow {
        BookingWindow::starting(today(), 30)
    }

    fn counting_controller(lead: &LeadContext) -> (BookingController, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&closes);
        let controller = BookingController::open(lead, window()).with_on_close(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (controller, closes)
    }

    fn fill_valid(controller: &mut BookingController) {
        let date = (today() + Duration::days(2)).format("%Y-%m-%d").to_string();
        controller.update_field(Field::Name, "Jane Doe").unwrap();
        controller.update_field(Field::MobileNo, "9876543210").unwrap();
        controller.update_field(Field::Date, &date).unwrap();
        controller
            .update_field(Field::TimeSlot, "10:00 AM - 12:00 PM")
            .unwrap();
        controller.update_field(Field::Terms, "true").unwrap();
    }

    #[test]
    fn test_open_prefills_from_lead() {
        let lead = LeadContext {
            lead_name: Some("Ravi K.".to_string()),
            lead_phone: Some("+91 98765 43210".to_string()),
            terms_accepted: true,
        };
        let controller = BookingController::open(&lead, window());
        assert_eq!(controller.input().name, "Ravi K");
        assert_eq!(controller.input().mobile_no, "9198765432");
        assert!(controller.input().terms_accepted);
        assert_eq!(controller.state(), ControllerState::Idle);
        assert!(controller.errors().is_empty());
    }

    #[test]
    fn test_update_field_sanitizes_and_sets_inline_errors() {
        let mut controller = BookingController::open(&LeadContext::default(), window());

        let input = controller.update_field(Field::Name, "J4ne!").unwrap();
        assert_eq!(input.name, "Jne");
        assert_eq!(controller.errors().get(Field::Name), None);

        controller.update_field(Field::Name, "42").unwrap();
        assert_eq!(controller.errors().get(Field::Name), Some("Name is required"));

        controller.update_field(Field::MobileNo, "98-76").unwrap();
        assert_eq!(controller.input().mobile_no, "9876");
        assert_eq!(controller.errors().get(Field::MobileNo), Some("Enter 10 digits"));

        controller.update_field(Field::MobileNo, "98765432109999").unwrap();
        assert_eq!(controller.input().mobile_no, "9876543210");
        assert_eq!(controller.errors().get(Field::MobileNo), None);
    }

    #[test]
    fn test_update_clears_picker_errors() {
        let mut controller = BookingController::open(&LeadContext::default(), window());
        assert_eq!(controller.begin_submit().unwrap(), None);
        assert_eq!(controller.errors().get(Field::Date), Some("Select a date"));
        assert_eq!(controller.errors().get(Field::Terms), Some("Accept terms"));

        controller.update_field(Field::Date, "2026-10-20").unwrap();
        assert!(controller.toggle_terms().unwrap());
        assert_eq!(controller.errors().get(Field::Date), None);
        assert_eq!(controller.errors().get(Field::Terms), None);
        assert_eq!(controller.errors().get(Field::Name), Some("Name is required"));
    }

    #[tokio::test]
    async fn test_invalid_submit_never_calls_delegate() {
        let delegate = MockDelegate::replying(vec![]);
        let (mut controller, closes) = counting_controller(&LeadContext::default());
        controller.update_field(Field::MobileNo, "123").unwrap();

        let outcome = controller.submit(&delegate).await.unwrap();
        match outcome {
            SubmitOutcome::Invalid(errors) => assert_eq!(errors.len(), 5),
            other => panic!("expected invalid, got {other:?}"),
        }
        assert_eq!(delegate.calls(), 0);
        assert_eq!(closes.load(Ordering::SeqCst), 0);
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn test_successful_submit_closes_once() {
        let delegate = MockDelegate::replying(vec![Ok(DelegateResponse::ok())]);
        let (mut controller, closes) = counting_controller(&LeadContext::default());
        fill_valid(&mut controller);
        assert!(controller.validate().is_empty());

        let outcome = controller.submit(&delegate).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Submitted(SubmissionResult::Success));
        assert_eq!(delegate.calls(), 1);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), ControllerState::Closed(CloseReason::Booked));
        assert!(controller.errors().is_empty());
        assert_eq!(controller.input(), &BookingInput::default());

        assert_eq!(controller.submit(&delegate).await, Err(BookingError::Closed));
        assert_eq!(controller.cancel(), Ok(()));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(delegate.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_record_and_allows_retry() {
        let delegate = MockDelegate::replying(vec![
            Ok(DelegateResponse::failed(Some("Slot already taken".to_string()))),
            Ok(DelegateResponse::failed(None)),
            Err(anyhow::anyhow!("connection reset")),
            Ok(DelegateResponse::ok()),
        ]);
        let (mut controller, closes) = counting_controller(&LeadContext::default());
        fill_valid(&mut controller);
        let typed = controller.input().clone();

        let outcome = controller.submit(&delegate).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Submitted(SubmissionResult::Failure {
                reason: "Slot already taken".to_string()
            })
        );
        assert_eq!(controller.submit_error(), Some("Slot already taken"));
        assert_eq!(controller.input(), &typed);
        assert!(controller.is_open());
        assert_eq!(closes.load(Ordering::SeqCst), 0);

        controller.submit(&delegate).await.unwrap();
        assert_eq!(controller.submit_error(), Some(SUBMIT_FALLBACK_ERROR));

        controller
            .update_field(Field::TimeSlot, "04:00 PM - 06:00 PM")
            .unwrap();
        controller.submit(&delegate).await.unwrap();
        assert_eq!(controller.submit_error(), Some(SUBMIT_FALLBACK_ERROR));
        assert_eq!(controller.state(), ControllerState::Idle);

        let outcome = controller.submit(&delegate).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Submitted(SubmissionResult::Success));
        assert_eq!(controller.submit_error(), None);
        assert_eq!(delegate.calls(), 4);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_second_submit_blocked_while_in_flight() {
        let mut controller = BookingController::open(&LeadContext::default(), window());
        fill_valid(&mut controller);

        let request = controller.begin_submit().unwrap().expect("valid record");
        assert_eq!(request.input.time_slot, Some(TimeSlot::Morning));
        assert!(controller.is_submitting());
        assert_eq!(controller.begin_submit(), Err(BookingError::InFlight));
        assert_eq!(controller.cancel(), Err(BookingError::InFlight));

        let result = controller.finish_submit(Ok(DelegateResponse::failed(None))).unwrap();
        assert_eq!(
            result,
            SubmissionResult::Failure {
                reason: SUBMIT_FALLBACK_ERROR.to_string()
            }
        );
        assert_eq!(
            controller.finish_submit(Ok(DelegateResponse::ok())),
            Err(BookingError::NotSubmitting)
        );
    }

    #[test]
    fn test_refreshed_window_rejects_stale_date() {
        let mut controller = BookingController::open(&LeadContext::default(), window());
        fill_valid(&mut controller);
        controller.update_field(Field::Date, "2026-10-16").unwrap();
        assert!(controller.validate().is_empty());

        let tomorrow = today() + Duration::days(1);
        controller.refresh_window(BookingWindow::starting(tomorrow, 30));
        assert_eq!(controller.window().min, tomorrow);

        assert_eq!(controller.begin_submit().unwrap(), None);
        assert_eq!(
            controller.errors().get(Field::Date),
            Some(validation::DATE_OUT_OF_RANGE)
        );
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_cancel_signals_close() {
        let reasons = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&reasons);
        let mut controller = BookingController::open(&LeadContext::default(), window())
            .with_on_close(move |reason| seen.lock().unwrap().push(reason));

        controller.cancel().unwrap();
        controller.cancel().unwrap();
        assert_eq!(*reasons.lock().unwrap(), vec![CloseReason::Cancelled]);
        assert!(!controller.is_open());
        assert_eq!(
            controller.update_field(Field::Name, "Jane").unwrap_err(),
            BookingError::Closed
        );
    }
}
