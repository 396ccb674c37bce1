use std::sync::Mutex;

use crate::config::AppConfig;
use crate::services::booking::BookingController;
use crate::services::submission::SubmissionDelegate;

pub struct AppState {
    pub config: AppConfig,
    pub delegate: Box<dyn SubmissionDelegate>,
    /// The widget's one booking dialog, if open. Never held across an await.
    pub booking: Mutex<Option<BookingController>>,
}

impl AppState {
    pub fn new(config: AppConfig, delegate: Box<dyn SubmissionDelegate>) -> Self {
        Self {
            config,
            delegate,
            booking: Mutex::new(None),
        }
    }
}
