use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Alert,
    Star,
    Medal,
    Trophy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub title: String,
    pub message: String,
    pub tier: AchievementTier,
    pub celebrate: bool,
    pub greeting_name: String,
    pub share_text: String,
}
