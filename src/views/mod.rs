//! View state for each screen of the batch tracker.
//!
//! Views own only transient form and error state. Each one follows the same
//! fetch → render → submit cycle against a [`BatchApi`](crate::api::BatchApi)
//! and reduces failures to a single message shown inline.

pub mod add_batch;
pub mod batch_list;
pub mod history;
pub mod update_batch;

pub use add_batch::AddBatchForm;
pub use batch_list::{BatchListView, BatchRow};
pub use history::{Details, HistoryView, format_timestamp, format_value};
pub use update_batch::{CountField, UpdateBatchForm};

#[cfg(test)]
pub(crate) mod testing;
