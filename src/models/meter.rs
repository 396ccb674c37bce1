use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProtectionLevel {
    Low,
    Medium,
    High,
}

impl ProtectionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionLevel::Low => "Low",
            ProtectionLevel::Medium => "Medium",
            ProtectionLevel::High => "High",
        }
    }

    pub fn from_percentage(percentage: f64) -> Self {
        if percentage <= 35.0 {
            ProtectionLevel::Low
        } else if percentage <= 70.0 {
            ProtectionLevel::Medium
        } else {
            ProtectionLevel::High
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProtectionMeter {
    pub score: i64,
    pub percentage: f64,
    pub level: ProtectionLevel,
}

impl ProtectionMeter {
    pub fn reading(score: f64, max_score: f64) -> Self {
        let percentage = if score.is_finite() && max_score.is_finite() && max_score > 0.0 {
            (score / max_score * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            score: if score.is_finite() { score.round() as i64 } else { 0 },
            percentage,
            level: ProtectionLevel::from_percentage(percentage),
        }
    }
}
