use serde::{Deserialize, Serialize};

/// LeetCode profile snapshot as delivered by the scraping layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeProfile {
    pub username: String,
    #[serde(default)]
    pub ranking: u32,
    #[serde(default)]
    pub total_solved: u32,
    #[serde(default)]
    pub easy_solved: u32,
    #[serde(default)]
    pub medium_solved: u32,
    #[serde(default)]
    pub hard_solved: u32,
    #[serde(default)]
    pub acceptance_rate: f32,
}
