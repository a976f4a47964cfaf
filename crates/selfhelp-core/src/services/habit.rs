use crate::api::{endpoints, ApiClient, ApiError};
use crate::models::{Dashboard, Habit, HabitLog, HabitUpdate, NewHabit, NewHabitLog};

use super::{require, DaysQuery};

/// A habit with its recent check-ins, as shown on the detail view
#[derive(Debug, Clone)]
pub struct HabitOverview {
    pub habit: Habit,
    pub logs: Vec<HabitLog>,
}

impl ApiClient {
    pub async fn create_habit(&self, habit: &NewHabit) -> Result<Habit, ApiError> {
        require("title", &habit.title)?;
        self.post(endpoints::HABITS, habit).await
    }

    pub async fn my_habits(&self) -> Result<Vec<Habit>, ApiError> {
        self.get(endpoints::MY_HABITS).await
    }

    pub async fn habit(&self, id: i64) -> Result<Habit, ApiError> {
        self.get(&endpoints::habit(id)).await
    }

    pub async fn update_habit(&self, id: i64, update: &HabitUpdate) -> Result<Habit, ApiError> {
        self.put(&endpoints::habit(id), update).await
    }

    pub async fn delete_habit(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::habit(id)).await
    }

    /// Record today's check-in
    pub async fn log_habit(&self, log: &NewHabitLog) -> Result<HabitLog, ApiError> {
        self.post(endpoints::HABIT_LOG, log).await
    }

    pub async fn habit_logs(&self, habit_id: i64, days: u32) -> Result<Vec<HabitLog>, ApiError> {
        self.get_with_query(&endpoints::habit_logs(habit_id), &DaysQuery { days })
            .await
    }

    pub async fn habit_dashboard(&self) -> Result<Dashboard, ApiError> {
        self.get(endpoints::HABIT_DASHBOARD).await
    }

    /// Habit and its last week of logs, fetched together
    pub async fn habit_overview(&self, id: i64) -> Result<HabitOverview, ApiError> {
        let (habit, logs) = futures::try_join!(
            self.habit(id),
            self.habit_logs(id, super::DEFAULT_HISTORY_DAYS)
        )?;
        Ok(HabitOverview { habit, logs })
    }
}
