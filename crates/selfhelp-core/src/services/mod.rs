//! Feature services: diary, habits, goals and the message board.
//!
//! Each module adds methods to `ApiClient`. Payloads go to and from the
//! backend unchanged; the only local checks are that required fields are
//! not blank.

pub mod dashboard;
pub mod diary;
pub mod goal;
pub mod habit;
pub mod message;

pub use dashboard::ProgressDashboard;
pub use goal::GoalOverview;
pub use habit::HabitOverview;

use serde::Serialize;

use crate::api::ApiError;

/// Default page size for paged lists
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default look-back window for habit logs and goal progress
pub const DEFAULT_HISTORY_DAYS: u32 = 7;

#[derive(Serialize)]
pub(crate) struct PageQuery {
    pub page: u32,
    pub size: u32,
}

#[derive(Serialize)]
pub(crate) struct DaysQuery {
    pub days: u32,
}

/// Reject a blank required field before anything is sent
pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::InvalidRequest(format!("{} is required", field)))
    } else {
        Ok(())
    }
}
