//! Backend paths, relative to the configured base URL.

// Auth
pub const AUTH_GOOGLE: &str = "/auth/google";
pub const AUTH_ME: &str = "/auth/me";

// Diaries
pub const DIARIES: &str = "/api/diaries";
pub const MY_DIARIES: &str = "/api/diaries/me";
pub const PUBLIC_DIARIES: &str = "/api/diaries/public";

// Messages
pub const MESSAGES: &str = "/api";
pub const ADMIN_MESSAGES: &str = "/api/admin";

// Habits
pub const HABITS: &str = "/api/habits";
pub const MY_HABITS: &str = "/api/habits/me";
pub const HABIT_LOG: &str = "/api/habits/log";
pub const HABIT_DASHBOARD: &str = "/api/habits/dashboard";

// Goals
pub const GOALS: &str = "/api/goals";
pub const MY_GOALS: &str = "/api/goals/me";
pub const GOAL_PROGRESS: &str = "/api/goals/progress";
pub const GOAL_DASHBOARD: &str = "/api/goals/dashboard";

pub fn diary(id: i64) -> String {
    format!("{}/{}", DIARIES, id)
}

pub fn habit(id: i64) -> String {
    format!("{}/{}", HABITS, id)
}

pub fn habit_logs(id: i64) -> String {
    format!("{}/{}/logs", HABITS, id)
}

pub fn goal(id: i64) -> String {
    format!("{}/{}", GOALS, id)
}

pub fn goal_progress_history(id: i64) -> String {
    format!("{}/{}/progress", GOALS, id)
}

pub fn message(id: i64) -> String {
    format!("{}/{}", MESSAGES, id)
}

pub fn message_comments(id: i64) -> String {
    format!("{}/{}/comments", MESSAGES, id)
}

pub fn admin_message(id: i64) -> String {
    format!("{}/{}", ADMIN_MESSAGES, id)
}

pub fn admin_comment(message_id: i64, comment_id: i64) -> String {
    format!("{}/{}/comments/{}", ADMIN_MESSAGES, message_id, comment_id)
}
