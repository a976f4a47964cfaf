use crate::api::{endpoints, ApiClient, ApiError};
use crate::models::{Dashboard, Goal, GoalProgress, GoalUpdate, NewGoal, NewGoalProgress};

use super::{require, DaysQuery};

/// A goal with its recent progress entries, newest first
#[derive(Debug, Clone)]
pub struct GoalOverview {
    pub goal: Goal,
    pub history: Vec<GoalProgress>,
}

impl GoalOverview {
    /// Most recent total progress, 0 when nothing was logged
    pub fn latest_progress(&self) -> u32 {
        self.history.first().map(|p| p.total_progress).unwrap_or(0)
    }
}

impl ApiClient {
    pub async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, ApiError> {
        require("title", &goal.title)?;
        self.post(endpoints::GOALS, goal).await
    }

    pub async fn my_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get(endpoints::MY_GOALS).await
    }

    pub async fn goal(&self, id: i64) -> Result<Goal, ApiError> {
        self.get(&endpoints::goal(id)).await
    }

    pub async fn update_goal(&self, id: i64, update: &GoalUpdate) -> Result<Goal, ApiError> {
        self.put(&endpoints::goal(id), update).await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::goal(id)).await
    }

    /// Record today's progress
    pub async fn log_goal_progress(
        &self,
        progress: &NewGoalProgress,
    ) -> Result<GoalProgress, ApiError> {
        self.post(endpoints::GOAL_PROGRESS, progress).await
    }

    pub async fn goal_progress_history(
        &self,
        goal_id: i64,
        days: u32,
    ) -> Result<Vec<GoalProgress>, ApiError> {
        self.get_with_query(&endpoints::goal_progress_history(goal_id), &DaysQuery { days })
            .await
    }

    pub async fn goal_dashboard(&self) -> Result<Dashboard, ApiError> {
        self.get(endpoints::GOAL_DASHBOARD).await
    }

    pub async fn goal_overview(&self, id: i64) -> Result<GoalOverview, ApiError> {
        let (goal, history) = futures::try_join!(
            self.goal(id),
            self.goal_progress_history(id, super::DEFAULT_HISTORY_DAYS)
        )?;
        Ok(GoalOverview { goal, history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_progress() {
        let goal: Goal = serde_json::from_str(r#"{"id":1,"title":"Run"}"#).unwrap();
        let empty = GoalOverview {
            goal: goal.clone(),
            history: Vec::new(),
        };
        assert_eq!(empty.latest_progress(), 0);

        let history: Vec<GoalProgress> =
            serde_json::from_str(r#"[{"totalProgress":60},{"totalProgress":50}]"#).unwrap();
        let overview = GoalOverview { goal, history };
        assert_eq!(overview.latest_progress(), 60);
    }
}
