//! Data models for the wellbeing tracker.
//!
//! - `UserProfile`, `UserInfoHint`: the signed-in user and identity hints
//! - `Diary`, `Mood`, `Visibility`: mood journal entries
//! - `Habit`, `HabitLog`: habits and daily check-ins
//! - `Goal`, `GoalProgress`: goals and progress history
//! - `Message`, `Comment`: broadcast board
//! - `Page`: paged list responses

pub mod diary;
pub mod goal;
pub mod habit;
pub mod message;
pub mod page;
pub mod user;

pub use diary::{Diary, DiaryUpdate, Mood, NewDiary, Visibility};
pub use goal::{Goal, GoalProgress, GoalUpdate, NewGoal, NewGoalProgress, Priority};
pub use habit::{Habit, HabitLog, HabitStatus, HabitUpdate, NewHabit, NewHabitLog};
pub use message::{Comment, Message, MessageUpdate, NewComment, NewMessage};
pub use page::Page;
pub use user::{UserId, UserInfoHint, UserProfile, DEFAULT_ROLE};

/// Dashboard payloads are rendered by the front end as-is.
pub type Dashboard = serde_json::Value;
