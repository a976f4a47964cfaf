use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    Completed,
    Skipped,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub target_value: Option<String>,
    #[serde(default)]
    pub best_streak: Option<u32>,
    #[serde(default)]
    pub today_log: Option<HabitLog>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Habit {
    pub fn is_done_today(&self) -> bool {
        matches!(
            self.today_log.as_ref().map(|l| &l.status),
            Some(HabitStatus::Completed)
        )
    }

    pub fn current_streak(&self) -> u32 {
        self.today_log
            .as_ref()
            .and_then(|l| l.current_streak)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub habit_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    pub status: HabitStatus,
    #[serde(default)]
    pub current_streak: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabitLog {
    pub habit_id: i64,
    pub status: HabitStatus,
    pub current_streak: u32,
}

impl NewHabitLog {
    /// Today's check-in for `habit`: completing extends the best streak, skipping resets it
    pub fn for_habit(habit: &Habit, status: HabitStatus) -> Self {
        let current_streak = match status {
            HabitStatus::Completed => habit.best_streak.unwrap_or(0) + 1,
            _ => 0,
        };
        Self {
            habit_id: habit.id,
            status,
            current_streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(best_streak: Option<u32>) -> Habit {
        Habit {
            id: 3,
            title: "Walk".to_string(),
            target_value: Some("30 min".to_string()),
            best_streak,
            today_log: None,
            created_at: None,
        }
    }

    #[test]
    fn test_log_streak() {
        let done = NewHabitLog::for_habit(&habit(Some(4)), HabitStatus::Completed);
        assert_eq!(done.current_streak, 5);
        let fresh = NewHabitLog::for_habit(&habit(None), HabitStatus::Completed);
        assert_eq!(fresh.current_streak, 1);
        let skipped = NewHabitLog::for_habit(&habit(Some(4)), HabitStatus::Skipped);
        assert_eq!(skipped.current_streak, 0);
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["status"], "skipped");

        let json = serde_json::to_value(&done).unwrap();
        assert_eq!(json["habitId"], 3);
        assert_eq!(json["status"], "completed");
    }

    #[test]
    fn test_parse_habit_with_today_log() {
        let json = r#"{"id":1,"title":"Read","bestStreak":6,"todayLog":{"status":"completed","currentStreak":6}}"#;
        let habit: Habit = serde_json::from_str(json).unwrap();
        assert!(habit.is_done_today());
        assert_eq!(habit.current_streak(), 6);
    }

    #[test]
    fn test_parse_log_status() {
        let log: HabitLog = serde_json::from_str(r#"{"status":"skipped"}"#).unwrap();
        assert_eq!(log.status, HabitStatus::Skipped);
        let log: HabitLog = serde_json::from_str(r#"{"status":"paused"}"#).unwrap();
        assert_eq!(log.status, HabitStatus::Other("paused".to_string()));
    }
}
