use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub lead_endpoint_url: String,
    pub lead_endpoint_token: Option<String>,
    pub lead_timeout_secs: u64,
    pub booking_window_days: u32,
    pub quiz_title: String,
    pub share_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            lead_endpoint_url: env::var("LEAD_ENDPOINT_URL").unwrap_or_default(),
            lead_endpoint_token: env::var("LEAD_ENDPOINT_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            lead_timeout_secs: env::var("LEAD_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            booking_window_days: env::var("BOOKING_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            quiz_title: env::var("QUIZ_TITLE").unwrap_or_else(|_| "GST Quiz".to_string()),
            share_url: env::var("SHARE_URL").ok().filter(|u| !u.is_empty()),
        }
    }
}
