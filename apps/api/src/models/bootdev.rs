use serde::{Deserialize, Serialize};

/// Boot.dev profile snapshot as delivered by the scraping layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootDevProfile {
    pub username: String,
    #[serde(default)]
    pub courses_completed: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}
