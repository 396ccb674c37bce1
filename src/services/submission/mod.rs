pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::BookingRequest;

/// Reply from whatever persists the booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DelegateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DelegateResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: Option<String>) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

#[async_trait]
pub trait SubmissionDelegate: Send + Sync {
    async fn submit(&self, request: &BookingRequest) -> anyhow::Result<DelegateResponse>;
}
