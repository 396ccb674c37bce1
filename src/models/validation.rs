use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "mobile_no")]
    MobileNo,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "timeSlot")]
    TimeSlot,
    #[serde(rename = "terms")]
    Terms,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::MobileNo => "mobile_no",
            Field::Date => "date",
            Field::TimeSlot => "timeSlot",
            Field::Terms => "terms",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Field::Name),
            "mobile_no" => Some(Field::MobileNo),
            "date" => Some(Field::Date),
            "timeSlot" => Some(Field::TimeSlot),
            "terms" | "termsAccepted" => Some(Field::Terms),
            _ => None,
        }
    }
}

/// Field-level messages; a field with no entry has no error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}
