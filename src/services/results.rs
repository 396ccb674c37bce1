use crate::models::{AchievementTier, LeadContext, QuizResult};

const CELEBRATE_PERCENTAGE: f64 = 60.0;

pub fn result_title(score: u32) -> &'static str {
    match score {
        0 => "Learning Begins",
        1..=2 => "Keep Going",
        3 => "Good Attempt",
        4 => "Well Done",
        _ => "Outstanding",
    }
}

pub fn motivational_message(score: u32) -> &'static str {
    match score {
        0 => "No worries — Let’s try again!",
        1..=2 => "Not quite there yet — You can do better!",
        3 => "Good effort — You can do better!",
        4 => "You’ve learned important financial and insurance concepts.",
        _ => "Excellent! You are a GST expert!",
    }
}

pub fn achievement_tier(score: u32) -> AchievementTier {
    match score {
        0 => AchievementTier::Alert,
        1..=2 => AchievementTier::Star,
        3..=4 => AchievementTier::Medal,
        _ => AchievementTier::Trophy,
    }
}

pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    score as f64 / total as f64 * 100.0
}

pub fn share_text(score: u32, total: u32, quiz_title: &str, share_url: Option<&str>) -> String {
    let message =
        format!("I scored {score}/{total} on the {quiz_title}! 🏆 Check your GST knowledge here:");
    match share_url {
        Some(url) if !url.is_empty() => format!("{message} {url}"),
        _ => message,
    }
}

pub fn summarize(
    score: u32,
    total: u32,
    lead: &LeadContext,
    quiz_title: &str,
    share_url: Option<&str>,
) -> QuizResult {
    let percentage = percentage(score, total);

    QuizResult {
        score,
        total,
        percentage,
        title: result_title(score).to_string(),
        message: motivational_message(score).to_string(),
        tier: achievement_tier(score),
        celebrate: percentage >= CELEBRATE_PERCENTAGE,
        greeting_name: lead.greeting_name().to_string(),
        share_text: share_text(score, total, quiz_title, share_url),
    }
}
