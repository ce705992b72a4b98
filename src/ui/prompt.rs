//! Interactive prompts: the sidebar, row picker, create form and update modal.
//!
//! Prompts only collect raw input and hand it to the view state; all
//! validation and derived values live in [`crate::views`].

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use crate::model::HistoryAction;
use crate::router::Route;
use crate::ui::icons::{CLIPBOARD, EGG, HEN, HISTORY, PLUS, WARN};
use crate::views::{AddBatchForm, BatchRow, CountField, UpdateBatchForm};

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn ask(prompt: &str, default: &str) -> Result<String> {
    Input::<String>::with_theme(&theme())
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()
        .context("Failed to read user input")
}

fn show_field_error(message: &str) {
    eprintln!("  {}{}", WARN, style(message).red());
}

/// Sidebar menu. `None` means quit.
pub fn sidebar(current: Route) -> Result<Option<Route>> {
    let mut items: Vec<String> = Route::SIDEBAR
        .iter()
        .map(|r| {
            let icon = match r {
                Route::AddBatch => PLUS,
                Route::History => HISTORY,
                _ => CLIPBOARD,
            };
            format!("{}{}", icon, r.title())
        })
        .collect();
    items.push("Quit".to_string());

    let default = Route::SIDEBAR
        .iter()
        .position(|r| *r == current.resolve())
        .unwrap_or(0);

    let selection = Select::with_theme(&theme())
        .with_prompt(format!("{}Poultry Management", HEN))
        .items(items.as_slice())
        .default(default)
        .interact()
        .context("Failed to read menu selection")?;

    Ok(Route::SIDEBAR.get(selection).copied())
}

/// What the user picked on the batch list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Edit(i64),
    AddBatch,
    Back,
}

pub fn pick_batch(rows: &[BatchRow<'_>]) -> Result<ListAction> {
    let mut items: Vec<String> = rows
        .iter()
        .map(|r| {
            format!(
                "{} (shed {}, {}) - {} eggs",
                r.batch.batch_no,
                r.batch.shed_no,
                r.batch.age.label(),
                r.total_eggs
            )
        })
        .collect();
    items.push("Add New Batch".to_string());
    items.push("Back".to_string());

    let selection = Select::with_theme(&theme())
        .with_prompt("Select a batch to update")
        .items(items.as_slice())
        .default(0)
        .interact()
        .context("Failed to read batch selection")?;

    Ok(match selection {
        i if i < rows.len() => ListAction::Edit(rows[i].batch.id),
        i if i == rows.len() => ListAction::AddBatch,
        _ => ListAction::Back,
    })
}

/// What the user picked on the history screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryChoice {
    /// Show only this action, or everything for `None`.
    Filter(Option<HistoryAction>),
    Back,
}

pub fn pick_history_filter(current: Option<&HistoryAction>) -> Result<HistoryChoice> {
    let options = [
        ("All Actions", HistoryChoice::Filter(None)),
        ("Create", HistoryChoice::Filter(Some(HistoryAction::Create))),
        ("Update", HistoryChoice::Filter(Some(HistoryAction::Update))),
        ("Delete", HistoryChoice::Filter(Some(HistoryAction::Delete))),
        ("Back", HistoryChoice::Back),
    ];
    let labels: Vec<&str> = options.iter().map(|(l, _)| *l).collect();
    let default = options
        .iter()
        .position(|(_, c)| *c == HistoryChoice::Filter(current.cloned()))
        .unwrap_or(0);

    let selection = Select::with_theme(&theme())
        .with_prompt("Filter by action")
        .items(labels.as_slice())
        .default(default)
        .interact()
        .context("Failed to read filter selection")?;

    Ok(options[selection].1.clone())
}

/// Fill the create form field by field. Returns `false` if the user cancels.
pub fn fill_add_batch(form: &mut AddBatchForm) -> Result<bool> {
    println!("{}", style("Add New Batch").bold());

    let raw = ask("Shed No.", form.shed_no())?;
    form.set_shed_no(&raw);
    let raw = ask("Opening Count", form.opening_count())?;
    form.set_opening_count(&raw);

    loop {
        let raw = ask("Week", form.week())?;
        form.set_week(&raw);
        if form.age_errors().week.is_empty() {
            break;
        }
        show_field_error(&form.age_errors().week);
    }
    loop {
        let raw = ask("Day", form.day())?;
        form.set_day(&raw);
        if form.age_errors().day.is_empty() {
            break;
        }
        show_field_error(&form.age_errors().day);
    }

    Confirm::with_theme(&theme())
        .with_prompt(format!("Add batch at age {}?", form.age().label()))
        .default(true)
        .interact()
        .context("Failed to read confirmation")
}

/// Walk the update modal's fields, echoing the live total after each one.
/// Returns `false` if the user cancels.
pub fn fill_update(form: &mut UpdateBatchForm) -> Result<bool> {
    println!("{}", style(form.title()).bold());

    for field in CountField::ALL {
        loop {
            let raw = ask(field.label(), &form.get(field).to_string())?;
            form.set_field(field, &raw);
            match form.field_error(field) {
                Some(message) => show_field_error(message),
                None => break,
            }
        }
        if field.is_egg() {
            println!(
                "  {}Total Eggs: {}",
                EGG,
                style(form.total_eggs()).cyan().bold()
            );
        }
    }

    Confirm::with_theme(&theme())
        .with_prompt("Update?")
        .default(true)
        .interact()
        .context("Failed to read confirmation")
}
