use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One prioritized action in the weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPriority {
    pub title: String,
    pub description: String,
    pub impact: String,
}

/// Rule-based weekly action plan assembled from product insights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyActionPlan {
    pub priorities: Vec<ActionPriority>,
    pub risks: Vec<String>,
    pub quick_wins: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
