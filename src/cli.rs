//! Command-line view layer
//!
//! Thin rendering and input handling over the quests service. Each
//! subcommand maps onto one service operation; all state logic lives
//! below this layer. Quests are addressed by their position in the
//! `list` output or by full id.

use crate::app::AppState;
use crate::config::PROGRESS_BAR_WIDTH;
use crate::error::Result;
use crate::quest::{today_key, Quest};
use crate::services::QuestsService;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "questlog")]
#[command(version)]
#[command(about = "Track daily progress toward numeric goals", long_about = None)]
pub struct Cli {
    /// Override the application data directory
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all quests with their progress
    List,
    /// Create a new quest and select it
    Create {
        /// Quest title
        title: String,
        /// Target total to reach
        total: f64,
        /// Unit of the tracked quantity (e.g. "reps", "km")
        unit: Option<String>,
    },
    /// Select the quest that today's records go to
    Select {
        /// Quest position from `list`, or a quest id
        quest: String,
    },
    /// Delete a quest
    Delete {
        /// Quest position from `list`, or a quest id
        quest: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Add today's amount to the selected quest
    Record {
        /// Amount achieved today
        amount: f64,
    },
    /// Show the selected quest and its records
    Show,
}

/// Dispatch a parsed command against the application state.
pub async fn run(command: Option<Command>, state: &mut AppState) -> Result<()> {
    match command.unwrap_or(Command::List) {
        Command::List => render_list(&state.quests),
        Command::Create { title, total, unit } => {
            let quest = state
                .quests
                .create_quest(&title, total, unit.as_deref().unwrap_or(""))
                .await?;
            println!(
                "Created quest \"{}\" with a target of {} {} (now selected)",
                quest.title,
                fmt_amount(quest.total_amount),
                quest.unit
            );
        }
        Command::Select { quest } => {
            let Some(id) = resolve_quest(&state.quests, &quest) else {
                eprintln!("No quest matches \"{quest}\" - see `questlog list`");
                return Ok(());
            };
            state.quests.select_quest(&id).await?;
            if let Some(selected) = state.quests.selected_quest() {
                println!("Selected \"{}\"", selected.title);
            }
        }
        Command::Delete { quest, yes } => {
            let Some(id) = resolve_quest(&state.quests, &quest) else {
                eprintln!("No quest matches \"{quest}\" - see `questlog list`");
                return Ok(());
            };
            let title = state
                .quests
                .store()
                .quest(&id)
                .map(|q| q.title.clone())
                .unwrap_or_default();
            if !yes && !confirm_delete(&title)? {
                println!("Aborted");
                return Ok(());
            }
            state.quests.delete_quest(&id).await?;
            println!("Deleted \"{title}\"");
            if let Some(selected) = state.quests.selected_quest() {
                println!("Now selected: \"{}\"", selected.title);
            }
        }
        Command::Record { amount } => {
            let quest = state.quests.record_today(amount).await?;
            let progress = quest.progress();
            println!(
                "Recorded {} {} on {} - \"{}\" is at {}/{} {} ({}%)",
                fmt_amount(amount),
                quest.unit,
                today_key(),
                quest.title,
                fmt_amount(progress.sum),
                fmt_amount(quest.total_amount),
                quest.unit,
                progress.percent
            );
            if progress.complete {
                println!("Quest complete! 🎉");
            }
        }
        Command::Show => render_selected(&state.quests),
    }
    Ok(())
}

/// Resolve a user-supplied quest reference: a 1-based position in the
/// `list` ordering, or a full quest id.
fn resolve_quest(service: &QuestsService, target: &str) -> Option<String> {
    let overview = service.overview();
    if let Ok(position) = target.parse::<usize>() {
        return overview
            .get(position.checked_sub(1)?)
            .map(|q| q.id.clone());
    }
    overview
        .iter()
        .find(|q| q.id == target)
        .map(|q| q.id.clone())
}

fn render_list(service: &QuestsService) {
    let overview = service.overview();
    if overview.is_empty() {
        println!("No quests yet - create one with `questlog create <title> <total> [unit]`");
        return;
    }

    for (i, quest) in overview.iter().enumerate() {
        let marker = if quest.selected { "*" } else { " " };
        let mut line = format!(
            "{marker} {}. {} - {}/{} {} ({}%)",
            i + 1,
            quest.title,
            fmt_amount(quest.progress.sum),
            fmt_amount(quest.total_amount),
            quest.unit,
            quest.progress.percent
        );
        if quest.progress.complete {
            line.push_str("  [complete]");
        }
        println!("{line}");
    }
}

fn render_selected(service: &QuestsService) {
    let Some(quest) = service.selected_quest() else {
        println!("No quest selected - pick one with `questlog select <quest>`");
        return;
    };

    let progress = quest.progress();
    println!(
        "{} - {}/{} {}",
        quest.title,
        fmt_amount(progress.sum),
        fmt_amount(quest.total_amount),
        quest.unit
    );
    println!("{} {}%", progress_bar(progress.percent), progress.percent);
    if progress.complete {
        println!("Quest complete! 🎉");
    }
    println!("Today: {}", today_key());
    println!();

    render_records(quest);
}

fn render_records(quest: &Quest) {
    let records = quest.records_by_date();
    if records.is_empty() {
        println!("No records yet");
        return;
    }
    for record in records {
        println!(
            "  {}: {} {}",
            record.date,
            fmt_amount(record.amount),
            quest.unit
        );
    }
}

fn progress_bar(percent: u32) -> String {
    let filled = (percent as usize * PROGRESS_BAR_WIDTH) / 100;
    let mut bar = String::with_capacity(PROGRESS_BAR_WIDTH + 2);
    bar.push('[');
    for i in 0..PROGRESS_BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '.' });
    }
    bar.push(']');
    bar
}

/// Amounts are f64 but read best without a trailing ".0"
fn fmt_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn confirm_delete(title: &str) -> Result<bool> {
    print!("Delete quest \"{title}\"? This cannot be undone. [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
