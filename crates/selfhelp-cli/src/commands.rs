use anyhow::{bail, Result};
use chrono::Local;
use selfhelp_core::models::{Diary, Page, UserInfoHint};
use selfhelp_core::utils::{calculate_progress, days_left, format_date, truncate_text};
use selfhelp_core::{ApiClient, LoginOutcome, SessionManager, SessionState};

use crate::Commands;

/// Width of content previews in list output
const PREVIEW_WIDTH: usize = 80;

pub async fn run(command: Commands, api: &ApiClient, session: &SessionManager) -> Result<()> {
    match command {
        Commands::Status => {
            status(session);
            Ok(())
        }
        Commands::Login {
            id_token,
            email,
            name,
            image_url,
        } => {
            let hint = email.map(|email| UserInfoHint {
                email,
                name,
                image_url,
            });
            login(session, &id_token, hint).await
        }
        Commands::Logout => {
            session.logout().await;
            println!("Signed out.");
            Ok(())
        }
        command => {
            require_login(session)?;
            run_protected(command, api).await
        }
    }
}

fn status(session: &SessionManager) {
    match session.current() {
        SessionState::Authenticated(user) => {
            println!("Signed in as {} <{}>", user.name, user.email);
            println!("Role: {}", user.role);
        }
        _ => println!("Not signed in."),
    }
}

async fn login(session: &SessionManager, id_token: &str, hint: Option<UserInfoHint>) -> Result<()> {
    match session.complete_login(id_token, hint).await {
        LoginOutcome::Success => {
            status(session);
            Ok(())
        }
        LoginOutcome::Failure { message } => bail!("Login failed: {}", message),
    }
}

fn require_login(session: &SessionManager) -> Result<()> {
    if !session.is_authenticated() {
        bail!("Not signed in. Run `selfhelp login` first.");
    }
    Ok(())
}

async fn run_protected(command: Commands, api: &ApiClient) -> Result<()> {
    match command {
        Commands::Diaries { public, page, size } => {
            let diaries = if public {
                api.public_diaries(page, size).await?
            } else {
                api.my_diaries(page, size).await?
            };
            print_diaries(&diaries);
        }
        Commands::Habits { id: None } => {
            for habit in api.my_habits().await? {
                let mark = if habit.is_done_today() { "x" } else { " " };
                println!(
                    "[{}] #{} {} (streak {}, best {})",
                    mark,
                    habit.id,
                    habit.title,
                    habit.current_streak(),
                    habit.best_streak.unwrap_or(0)
                );
            }
        }
        Commands::Habits { id: Some(id) } => {
            let overview = api.habit_overview(id).await?;
            println!("{}", overview.habit.title);
            for log in &overview.logs {
                println!(
                    "  {} {:?}",
                    log.date.as_deref().map(format_date).unwrap_or_default(),
                    log.status
                );
            }
        }
        Commands::Goals { id: None } => {
            let today = Local::now().date_naive();
            for goal in api.my_goals().await? {
                let remaining = goal
                    .target_date
                    .map(|d| format!("{} days left", days_left(d, today)))
                    .unwrap_or_else(|| "no target date".to_string());
                println!(
                    "#{} {} [{:?}] {}% - {}",
                    goal.id,
                    goal.title,
                    goal.priority.unwrap_or_default(),
                    calculate_progress(goal.total_progress.unwrap_or(0), 100),
                    remaining
                );
            }
        }
        Commands::Goals { id: Some(id) } => {
            let overview = api.goal_overview(id).await?;
            println!("{} - {}%", overview.goal.title, overview.latest_progress());
            for entry in &overview.history {
                println!(
                    "  {} +{}% (total {}%)",
                    entry.date.as_deref().map(format_date).unwrap_or_default(),
                    entry.today_progress,
                    entry.total_progress
                );
            }
        }
        Commands::Messages { id: Some(id), .. } => {
            let message = api.message(id).await?;
            println!("{}\n\n{}\n", message.title, message.content);
            for comment in &message.comments {
                println!(
                    "  {}: {}",
                    comment.author_email.as_deref().unwrap_or("anonymous"),
                    comment.content
                );
            }
        }
        Commands::Messages { id: None, page, size } => {
            let messages = api.messages(page, size).await?;
            for message in &messages.content {
                println!(
                    "#{} {} ({} comments)\n  {}",
                    message.id,
                    message.title,
                    message.comment_count,
                    truncate_text(&message.content, PREVIEW_WIDTH)
                );
            }
        }
        Commands::Dashboard => {
            let dashboard = api.progress_dashboard().await?;
            println!("Habits:\n{}", serde_json::to_string_pretty(&dashboard.habits)?);
            println!("Goals:\n{}", serde_json::to_string_pretty(&dashboard.goals)?);
        }
        Commands::Status | Commands::Login { .. } | Commands::Logout => {}
    }
    Ok(())
}

fn print_diaries(page: &Page<Diary>) {
    if page.is_empty() {
        println!("No entries yet.");
        return;
    }
    for diary in &page.content {
        println!(
            "{} {} - {}",
            diary.mood.emoji(),
            diary.title,
            diary
                .entry_date
                .as_deref()
                .or(diary.created_at.as_deref())
                .map(format_date)
                .unwrap_or_default()
        );
        println!("  {}", truncate_text(&diary.good_things, PREVIEW_WIDTH));
    }
    if let Some(next) = page.next_page() {
        println!("More entries: --page {}", next);
    }
}
