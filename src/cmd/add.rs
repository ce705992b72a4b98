//! Batch creation command: `henhouse add`.

use anyhow::{Result, bail};

use henhouse::config::Config;
use henhouse::router::Route;
use henhouse::shell::{print_error, print_success};
use henhouse::ui::prompt;
use henhouse::ui::table::render_batch_table;
use henhouse::ui::with_spinner;
use henhouse::views::add_batch::SubmitError;
use henhouse::views::{AddBatchForm, BatchListView};

/// Raw field values from the command line.
#[derive(Debug, Default)]
pub struct AddInput {
    pub shed_no: Option<String>,
    pub opening_count: Option<String>,
    pub week: Option<String>,
    pub day: Option<String>,
}

impl AddInput {
    fn is_complete(&self) -> bool {
        self.shed_no.is_some()
            && self.opening_count.is_some()
            && self.week.is_some()
            && self.day.is_some()
    }

    fn apply(&self, form: &mut AddBatchForm) {
        if let Some(v) = &self.shed_no {
            form.set_shed_no(v);
        }
        if let Some(v) = &self.opening_count {
            form.set_opening_count(v);
        }
        if let Some(v) = &self.week {
            form.set_week(v);
        }
        if let Some(v) = &self.day {
            form.set_day(v);
        }
    }
}

pub async fn cmd_add(config: &Config, input: AddInput, yes: bool) -> Result<()> {
    let mut form = AddBatchForm::new();
    input.apply(&mut form);

    if !input.is_complete() && super::interactive(yes) && !prompt::fill_add_batch(&mut form)? {
        println!("Cancelled.");
        return Ok(());
    }

    // Validation runs before any request is built.
    if let Err(e) = form.validate() {
        for field in &e.fields {
            print_error(&field.message);
        }
        bail!("Batch was not created");
    }

    let api = super::client(config)?;
    let next = match with_spinner("Saving...", form.submit(&api)).await {
        Ok(route) => route,
        Err(SubmitError::Invalid(_)) => bail!("Batch was not created"),
        Err(SubmitError::Request(msg)) => bail!("{}", msg),
    };
    print_success(&format!("Batch created at age {}", form.age().label()));

    // Navigating to `/` lands on the batch list.
    if next.resolve() == Route::Batches {
        let mut view = BatchListView::new();
        with_spinner("Loading batches...", view.load(&api)).await;
        match view.error() {
            Some(err) => print_error(err),
            None => print!("{}", render_batch_table(&view.rows())),
        }
    }
    Ok(())
}
