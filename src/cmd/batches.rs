//! Batch table, detail and update commands.

use anyhow::{Result, bail};
use console::style;

use henhouse::api::BatchApi;
use henhouse::config::Config;
use henhouse::shell::{print_error, print_success};
use henhouse::ui::prompt;
use henhouse::ui::table::{render_batch_detail, render_batch_table};
use henhouse::ui::with_spinner;
use henhouse::views::{BatchListView, CountField, UpdateBatchForm};

pub async fn cmd_batches(config: &Config) -> Result<()> {
    let api = super::client(config)?;
    let mut view = BatchListView::new();
    with_spinner("Loading batches...", view.load(&api)).await;
    if let Some(err) = view.error() {
        bail!("{}", err);
    }

    println!();
    println!("{}", style("Batch Management").bold());
    print!("{}", render_batch_table(&view.rows()));
    Ok(())
}

pub async fn cmd_show(config: &Config, id: i64) -> Result<()> {
    let api = super::client(config)?;
    let batch = match with_spinner("Loading batch...", api.get_batch(id)).await {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!(batch_id = id, error = %e, "failed to fetch batch");
            bail!("Failed to fetch batch {}", id);
        }
    };

    println!();
    println!("{}", style(format!("Batch {}", batch.batch_no)).bold());
    print!("{}", render_batch_detail(&batch));
    Ok(())
}

/// Raw count overrides from the command line.
#[derive(Debug, Default)]
pub struct UpdateInput {
    pub mortality: Option<String>,
    pub culls: Option<String>,
    pub table: Option<String>,
    pub jumbo: Option<String>,
    pub cr: Option<String>,
}

impl UpdateInput {
    fn values(&self) -> [(CountField, Option<&str>); 5] {
        [
            (CountField::Mortality, self.mortality.as_deref()),
            (CountField::Culls, self.culls.as_deref()),
            (CountField::Table, self.table.as_deref()),
            (CountField::Jumbo, self.jumbo.as_deref()),
            (CountField::Cr, self.cr.as_deref()),
        ]
    }

    /// Write the overrides into the form. Returns one message per rejected field.
    pub fn apply(&self, form: &mut UpdateBatchForm) -> Vec<String> {
        for (field, raw) in self.values() {
            if let Some(raw) = raw {
                form.set_field(field, raw);
            }
        }
        CountField::ALL
            .iter()
            .filter_map(|f| form.field_error(*f).map(|m| format!("{}: {}", f, m)))
            .collect()
    }
}

pub async fn cmd_update(config: &Config, id: i64, input: UpdateInput, yes: bool) -> Result<()> {
    let api = super::client(config)?;
    let mut view = BatchListView::new();
    with_spinner("Loading batches...", view.load(&api)).await;
    if let Some(err) = view.error() {
        bail!("{}", err);
    }
    if !view.select(id) {
        bail!("Batch {} not found", id);
    }

    let Some(form) = view.editing_mut() else {
        bail!("Batch {} not found", id);
    };
    let invalid = input.apply(form);
    if !invalid.is_empty() {
        for message in &invalid {
            print_error(message);
        }
        bail!("Batch {} was not updated", id);
    }

    // Flag values are already in the form, so they become the prompt defaults.
    if super::interactive(yes) && !prompt::fill_update(form)? {
        println!("Cancelled.");
        return Ok(());
    }
    println!("Total Eggs: {}", style(form.total_eggs()).cyan().bold());

    if !with_spinner("Saving...", view.submit_update(&api)).await {
        let message = view
            .editing()
            .and_then(|f| f.error())
            .unwrap_or("Failed to update batch")
            .to_string();
        bail!("{}", message);
    }

    print_success("Batch updated");
    if let Some(err) = view.error() {
        print_error(err);
    } else {
        print!("{}", render_batch_table(&view.rows()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use henhouse::model::Batch;

    fn batch() -> Batch {
        serde_json::from_value(serde_json::json!({
            "id": 3, "shed_no": 1, "batch_no": "B-3", "age": "4.2",
            "opening_count": 100, "mortality": 1, "culls": 2, "closing_count": 97,
            "table": 40, "jumbo": 5, "cr": 1, "date": "2024-05-01"
        }))
        .unwrap()
    }

    #[test]
    fn test_flags_prefill_the_update_prompts() {
        let mut form = UpdateBatchForm::new(&batch());
        let input = UpdateInput {
            table: Some("10".into()),
            cr: Some("3".into()),
            ..Default::default()
        };
        assert!(input.apply(&mut form).is_empty());
        assert_eq!(form.get(CountField::Table), 10);
        assert_eq!(form.get(CountField::Cr), 3);
        // Untouched fields keep the batch's values.
        assert_eq!(form.get(CountField::Jumbo), 5);
        assert_eq!(form.get(CountField::Mortality), 1);
        assert_eq!(form.total_eggs(), 18);
    }

    #[test]
    fn test_rejected_flags_are_reported_per_field() {
        let mut form = UpdateBatchForm::new(&batch());
        let input = UpdateInput {
            culls: Some("-2".into()),
            ..Default::default()
        };
        let invalid = input.apply(&mut form);
        assert_eq!(invalid.len(), 1);
        assert!(invalid[0].contains("greater than or equal to 0"));
    }
}
