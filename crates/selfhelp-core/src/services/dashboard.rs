use crate::api::{ApiClient, ApiError};
use crate::models::Dashboard;

/// Habit and goal summaries for the progress screen
#[derive(Debug, Clone)]
pub struct ProgressDashboard {
    pub habits: Dashboard,
    pub goals: Dashboard,
}

impl ApiClient {
    /// Both dashboards, fetched concurrently
    pub async fn progress_dashboard(&self) -> Result<ProgressDashboard, ApiError> {
        let (habits, goals) = futures::try_join!(self.habit_dashboard(), self.goal_dashboard())?;
        Ok(ProgressDashboard { habits, goals })
    }
}
