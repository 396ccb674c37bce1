use serde::{Deserialize, Serialize};

/// Whatever the widget already knows about the lead when the booking dialog opens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadContext {
    pub lead_name: Option<String>,
    pub lead_phone: Option<String>,
    #[serde(default)]
    pub terms_accepted: bool,
}

impl LeadContext {
    pub fn greeting_name(&self) -> &str {
        self.lead_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Friend")
    }
}
