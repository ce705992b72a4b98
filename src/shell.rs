//! Interactive navigation shell.
//!
//! Mirrors the sidebar-plus-router layout: each route is a screen that
//! fetches fresh data, renders it and waits for the next selection. Request
//! failures are shown inline and never end the session.

use anyhow::Result;
use console::style;

use crate::api::BatchApi;
use crate::router::Route;
use crate::ui::icons::{CHECK, CROSS};
use crate::ui::prompt::{self, HistoryChoice, ListAction};
use crate::ui::table::{render_batch_table, render_history_table};
use crate::ui::with_spinner;
use crate::views::add_batch::SubmitError;
use crate::views::{AddBatchForm, BatchListView, HistoryView};

pub fn print_error(message: &str) {
    eprintln!("{}{}", CROSS, style(message).red());
}

pub fn print_success(message: &str) {
    println!("{}{}", CHECK, style(message).green());
}

pub struct Shell<'a> {
    api: &'a dyn BatchApi,
}

impl<'a> Shell<'a> {
    pub fn new(api: &'a dyn BatchApi) -> Self {
        Self { api }
    }

    /// Run until the user quits, starting at `start`.
    pub async fn run(&self, start: Route) -> Result<()> {
        let mut route = Some(start.resolve());
        while let Some(current) = route {
            tracing::debug!(route = %current, "navigating");
            let next = match current {
                Route::Root | Route::Batches => self.batches_screen().await?,
                Route::AddBatch => self.add_batch_screen().await?,
                Route::History => self.history_screen().await?,
            };
            route = match next {
                Some(next) => Some(next.resolve()),
                None => prompt::sidebar(current)?,
            };
        }
        Ok(())
    }

    /// Batch table. Picking a row opens the update modal.
    async fn batches_screen(&self) -> Result<Option<Route>> {
        let mut view = BatchListView::new();
        with_spinner("Loading batches...", view.load(self.api)).await;

        loop {
            println!();
            println!("{}", style(Route::Batches.title()).bold());
            if let Some(err) = view.error() {
                print_error(err);
            }
            print!("{}", render_batch_table(&view.rows()));

            let id = match prompt::pick_batch(&view.rows())? {
                ListAction::Edit(id) => id,
                ListAction::AddBatch => return Ok(Some(Route::AddBatch)),
                ListAction::Back => return Ok(None),
            };
            if !view.select(id) {
                continue;
            }

            // The modal stays open until it saves or the user cancels.
            loop {
                let Some(form) = view.editing_mut() else {
                    break;
                };
                if !prompt::fill_update(form)? {
                    view.close_update();
                    break;
                }
                if with_spinner("Saving...", view.submit_update(self.api)).await {
                    print_success("Batch updated");
                    break;
                }
                if let Some(err) = view.editing().and_then(|f| f.error()) {
                    print_error(err);
                }
            }
        }
    }

    async fn add_batch_screen(&self) -> Result<Option<Route>> {
        let mut form = AddBatchForm::new();
        loop {
            if !prompt::fill_add_batch(&mut form)? {
                // Cancel goes back to the list.
                return Ok(Some(Route::Root));
            }
            match with_spinner("Saving...", form.submit(self.api)).await {
                Ok(route) => {
                    print_success("Batch created");
                    return Ok(Some(route));
                }
                Err(SubmitError::Invalid(e)) => {
                    for field in &e.fields {
                        print_error(&field.message);
                    }
                }
                Err(SubmitError::Request(msg)) => print_error(&msg),
            }
        }
    }

    async fn history_screen(&self) -> Result<Option<Route>> {
        let mut view = HistoryView::new();
        with_spinner("Loading...", view.load(self.api)).await;
        if let Some(err) = view.error() {
            print_error(err);
            return Ok(None);
        }

        loop {
            println!();
            println!("{}", style(Route::History.title()).bold());
            print!("{}", render_history_table(&view.visible()));
            match prompt::pick_history_filter(view.filter())? {
                HistoryChoice::Filter(filter) => view.set_filter(filter),
                HistoryChoice::Back => return Ok(None),
            }
        }
    }
}
