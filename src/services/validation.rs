use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{BookingInput, BookingWindow, Field, TimeSlot, ValidationErrors};

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_LETTERS_ONLY: &str = "Letters only";
pub const MOBILE_REQUIRED: &str = "Mobile is required";
pub const MOBILE_INVALID: &str = "Invalid 10-digit number";
pub const MOBILE_TOO_SHORT: &str = "Enter 10 digits";
pub const MOBILE_BAD_PREFIX: &str = "Must start 6-9";
pub const DATE_REQUIRED: &str = "Select a date";
pub const DATE_OUT_OF_RANGE: &str = "Date out of range";
pub const SLOT_REQUIRED: &str = "Select a slot";
pub const TERMS_REQUIRED: &str = "Accept terms";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").unwrap());

const MOBILE_LEN: usize = 10;

pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

pub fn sanitize_mobile(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MOBILE_LEN)
        .collect()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

/// Sanitizes `raw` for `field` and stores it on `input`.
pub fn apply_field(input: &mut BookingInput, field: Field, raw: &str) {
    match field {
        Field::Name => input.name = sanitize_name(raw),
        Field::MobileNo => input.mobile_no = sanitize_mobile(raw),
        Field::Date => input.date = parse_date(raw),
        Field::TimeSlot => input.time_slot = TimeSlot::from_label(raw.trim()),
        Field::Terms => input.terms_accepted = parse_flag(raw),
    }
}

/// The message shown under a field while it is being edited. Date, slot and terms
/// never get one here; [`validate`] covers them on submit.
pub fn inline_error(input: &BookingInput, field: Field) -> Option<&'static str> {
    match field {
        Field::Name => input.name.trim().is_empty().then_some(NAME_REQUIRED),
        Field::MobileNo => {
            let mobile = input.mobile_no.as_str();
            if mobile.trim().is_empty() {
                Some(MOBILE_REQUIRED)
            } else if mobile.len() < MOBILE_LEN {
                Some(MOBILE_TOO_SHORT)
            } else if !mobile.starts_with(['6', '7', '8', '9']) {
                Some(MOBILE_BAD_PREFIX)
            } else {
                None
            }
        }
        Field::Date | Field::TimeSlot | Field::Terms => None,
    }
}

pub fn validate(input: &BookingInput, window: &BookingWindow) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let name = input.name.trim();
    if name.is_empty() {
        errors.set(Field::Name, NAME_REQUIRED);
    } else if !NAME_RE.is_match(name) {
        errors.set(Field::Name, NAME_LETTERS_ONLY);
    }

    if input.mobile_no.trim().is_empty() {
        errors.set(Field::MobileNo, MOBILE_REQUIRED);
    } else if !MOBILE_RE.is_match(&input.mobile_no) {
        errors.set(Field::MobileNo, MOBILE_INVALID);
    }

    match &input.date {
        None => errors.set(Field::Date, DATE_REQUIRED),
        Some(date) if !window.contains(date) => errors.set(Field::Date, DATE_OUT_OF_RANGE),
        Some(_) => {}
    }

    if input.time_slot.is_none() {
        errors.set(Field::TimeSlot, SLOT_REQUIRED);
    }

    if !input.terms_accepted {
        errors.set(Field::Terms, TERMS_REQUIRED);
    }

    errors
}
