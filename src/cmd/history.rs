//! Audit log command: `henhouse history`.

use anyhow::{Result, bail};
use console::style;

use henhouse::config::Config;
use henhouse::model::HistoryAction;
use henhouse::ui::table::render_history_table;
use henhouse::ui::with_spinner;
use henhouse::views::HistoryView;

pub async fn cmd_history(config: &Config, action: Option<HistoryAction>) -> Result<()> {
    let api = super::client(config)?;
    let mut view = HistoryView::new();
    with_spinner("Loading...", view.load(&api)).await;
    if let Some(err) = view.error() {
        bail!("{}", err);
    }
    view.set_filter(action);

    println!();
    match view.filter() {
        Some(action) => println!("{} ({})", style("Batch History").bold(), action),
        None => println!("{}", style("Batch History").bold()),
    }
    print!("{}", render_history_table(&view.visible()));
    Ok(())
}
