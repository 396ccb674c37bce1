use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{BookingInput, BookingWindow, Field, LeadContext, TimeSlot, ValidationErrors};
use crate::services::booking::{
    BookingController, BookingError, CloseReason, ControllerState, SubmissionResult,
};
use crate::state::AppState;

#[derive(Serialize)]
pub struct BookingView {
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    close_reason: Option<CloseReason>,
    input: BookingInput,
    errors: ValidationErrors,
    submit_error: Option<String>,
    submitting: bool,
    window: BookingWindow,
}

impl BookingView {
    fn of(controller: &BookingController) -> Self {
        let state = controller.state();
        Self {
            state: state.as_str(),
            close_reason: match state {
                ControllerState::Closed(reason) => Some(reason),
                _ => None,
            },
            input: controller.input().clone(),
            errors: controller.errors().clone(),
            submit_error: controller.submit_error().map(|s| s.to_string()),
            submitting: controller.is_submitting(),
            window: *controller.window(),
        }
    }
}

fn no_open_booking() -> AppError {
    AppError::NotFound("no booking is open".to_string())
}

fn current_window(state: &AppState) -> BookingWindow {
    BookingWindow::starting(Local::now().date_naive(), state.config.booking_window_days)
}

// GET /api/booking/options
#[derive(Serialize)]
pub struct BookingOptions {
    slots: Vec<&'static str>,
    window: BookingWindow,
}

pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<BookingOptions> {
    Json(BookingOptions {
        slots: TimeSlot::ALL.iter().map(|s| s.label()).collect(),
        window: current_window(&state),
    })
}

// POST /api/booking/open
pub async fn open_booking(
    State(state): State<Arc<AppState>>,
    Json(lead): Json<LeadContext>,
) -> Result<Json<BookingView>, AppError> {
    let mut booking = state.booking.lock().unwrap();
    if let Some(previous) = booking.as_mut() {
        if previous.is_submitting() {
            return Err(BookingError::InFlight.into());
        }
        tracing::info!("replacing open booking dialog");
        previous.cancel()?;
    }

    let controller = BookingController::open(&lead, current_window(&state)).with_on_close(|reason| {
        tracing::info!(reason = ?reason, "booking dialog closed");
    });
    tracing::info!(prefilled = lead.lead_phone.is_some(), "booking dialog opened");

    let view = BookingView::of(&controller);
    *booking = Some(controller);
    Ok(Json(view))
}

// GET /api/booking
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BookingView>, AppError> {
    let booking = state.booking.lock().unwrap();
    let controller = booking.as_ref().ok_or_else(no_open_booking)?;
    Ok(Json(BookingView::of(controller)))
}

// POST /api/booking/field
#[derive(Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

pub async fn update_field(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FieldUpdate>,
) -> Result<Json<BookingView>, AppError> {
    let field = Field::parse(&payload.field)
        .ok_or_else(|| AppError::BadRequest(format!("unknown field: {}", payload.field)))?;

    let mut booking = state.booking.lock().unwrap();
    let controller = booking.as_mut().ok_or_else(no_open_booking)?;
    controller.update_field(field, &payload.value)?;
    Ok(Json(BookingView::of(controller)))
}

// POST /api/booking/submit
#[derive(Serialize)]
pub struct SubmitResponse {
    success: bool,
    closed: bool,
    view: BookingView,
}

pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let (request, view) = {
        let mut booking = state.booking.lock().unwrap();
        let controller = booking.as_mut().ok_or_else(no_open_booking)?;
        controller.refresh_window(current_window(&state));
        let request = controller.begin_submit()?;
        (request, BookingView::of(controller))
    };

    let Some(request) = request else {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SubmitResponse {
                success: false,
                closed: false,
                view,
            }),
        ));
    };

    let response = state.delegate.submit(&request).await;

    let mut booking = state.booking.lock().unwrap();
    let controller = booking.as_mut().ok_or_else(no_open_booking)?;
    let result = controller.finish_submit(response)?;
    let view = BookingView::of(controller);
    let closed = !controller.is_open();
    if closed {
        *booking = None;
    }

    Ok((
        StatusCode::OK,
        Json(SubmitResponse {
            success: result == SubmissionResult::Success,
            closed,
            view,
        }),
    ))
}

// POST /api/booking/cancel
pub async fn cancel_booking(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    let mut booking = state.booking.lock().unwrap();
    let controller = booking.as_mut().ok_or_else(no_open_booking)?;
    controller.cancel()?;
    *booking = None;
    Ok(StatusCode::NO_CONTENT)
}
