use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeSlot {
    #[serde(rename = "10:00 AM - 12:00 PM")]
    Morning,
    #[serde(rename = "12:00 PM - 02:00 PM")]
    Midday,
    #[serde(rename = "02:00 PM - 04:00 PM")]
    Afternoon,
    #[serde(rename = "04:00 PM - 06:00 PM")]
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "10:00 AM - 12:00 PM",
            TimeSlot::Midday => "12:00 PM - 02:00 PM",
            TimeSlot::Afternoon => "02:00 PM - 04:00 PM",
            TimeSlot::Evening => "04:00 PM - 06:00 PM",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.label() == s)
    }
}

/// The form record for one booking interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingInput {
    pub name: String,
    pub mobile_no: String,
    pub date: Option<NaiveDate>,
    #[serde(rename = "timeSlot")]
    pub time_slot: Option<TimeSlot>,
    #[serde(rename = "termsAccepted")]
    pub terms_accepted: bool,
}

/// Dates the picker offers, inclusive on both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BookingWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl BookingWindow {
    pub fn starting(today: NaiveDate, days: u32) -> Self {
        Self {
            min: today,
            max: today + Duration::days(days as i64),
        }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.min && *date <= self.max
    }
}

/// What the submission delegate receives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    #[serde(flatten)]
    pub input: BookingInput,
    pub booking_timestamp: DateTime<Utc>,
}
