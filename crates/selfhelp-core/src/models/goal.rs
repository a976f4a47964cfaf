use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Status assigned to newly created goals
pub const GOAL_STATUS_IN_PROGRESS: &str = "in_progress";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub motivation_reason: Option<String>,
    #[serde(default)]
    pub today_progress: Option<u32>,
    #[serde(default)]
    pub total_progress: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub goal_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub today_progress: u32,
    #[serde(default)]
    pub total_progress: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub priority: Priority,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation_reason: Option<String>,
}

impl NewGoal {
    /// A goal starting `today`, marked in progress
    pub fn starting(
        title: impl Into<String>,
        today: NaiveDate,
        target_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            start_date: today,
            target_date,
            priority,
            status: GOAL_STATUS_IN_PROGRESS.to_string(),
            motivation_reason: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalProgress {
    pub goal_id: i64,
    pub today_progress: u32,
    pub total_progress: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_goal_wire_format() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let goal = NewGoal::starting("Run 10k", today, target, Priority::High);
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["startDate"], "2024-03-01");
        assert_eq!(json["targetDate"], "2024-06-01");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["status"], "in_progress");
    }

    #[test]
    fn test_parse_progress_history() {
        let json = r#"[{"date":"2024-03-02","todayProgress":5,"totalProgress":40},{"totalProgress":35}]"#;
        let history: Vec<GoalProgress> = serde_json::from_str(json).unwrap();
        assert_eq!(history[0].total_progress, 40);
        assert_eq!(history[1].today_progress, 0);
    }
}
