//! Batch table: fetches every batch and hosts the update modal.

use crate::api::BatchApi;
use crate::model::Batch;
use crate::views::update_batch::UpdateBatchForm;

pub const FETCH_FAILED: &str = "Failed to fetch batches";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow<'a> {
    pub batch: &'a Batch,
    pub total_eggs: u64,
}

#[derive(Debug, Default)]
pub struct BatchListView {
    batches: Vec<Batch>,
    error: Option<String>,
    editing: Option<UpdateBatchForm>,
}

impl BatchListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full collection. A failure keeps whatever was loaded before.
    pub async fn load(&mut self, api: &dyn BatchApi) {
        match api.list_batches().await {
            Ok(batches) => {
                tracing::debug!(count = batches.len(), "batches loaded");
                self.batches = batches;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch batches");
                self.error = Some(FETCH_FAILED.to_string());
            }
        }
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn rows(&self) -> Vec<BatchRow<'_>> {
        self.batches
            .iter()
            .map(|batch| BatchRow {
                batch,
                total_eggs: batch.total_eggs(),
            })
            .collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open the update modal for batch `id`. Returns `false` if no row has it.
    pub fn select(&mut self, id: i64) -> bool {
        match self.batches.iter().find(|b| b.id == id) {
            Some(batch) => {
                self.editing = Some(UpdateBatchForm::new(batch));
                true
            }
            None => false,
        }
    }

    pub fn editing(&self) -> Option<&UpdateBatchForm> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut UpdateBatchForm> {
        self.editing.as_mut()
    }

    pub fn close_update(&mut self) {
        self.editing = None;
    }

    /// Submit the open modal. On success the modal closes and the list is
    /// re-fetched once; on failure the modal stays open with its error.
    pub async fn submit_update(&mut self, api: &dyn BatchApi) -> bool {
        let Some(form) = self.editing.as_mut() else {
            return false;
        };
        if !form.submit(api).await {
            return false;
        }
        self.editing = None;
        self.load(api).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{FakeApi, batch};
    use crate::views::update_batch::CountField;

    #[tokio::test]
    async fn test_load_builds_rows_with_totals() {
        let api = FakeApi::with_batches(vec![batch(1, "B-1", 10, 2, 1), batch(2, "B-2", 0, 0, 0)]);
        let mut view = BatchListView::new();
        view.load(&api).await;

        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_eggs, 13);
        assert_eq!(rows[1].total_eggs, 0);
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_rows() {
        let api = FakeApi::with_batches(vec![batch(1, "B-1", 1, 1, 1)]);
        let mut view = BatchListView::new();
        view.load(&api).await;

        api.set_fail_reads(true);
        view.load(&api).await;
        assert_eq!(view.error(), Some("Failed to fetch batches"));
        assert_eq!(view.batches().len(), 1);

        api.set_fail_reads(false);
        view.load(&api).await;
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn test_select_unknown_id_opens_nothing() {
        let api = FakeApi::with_batches(vec![batch(1, "B-1", 1, 1, 1)]);
        let mut view = BatchListView::new();
        view.load(&api).await;
        assert!(!view.select(42));
        assert!(view.editing().is_none());
        assert!(view.select(1));
        assert_eq!(view.editing().unwrap().batch_id(), 1);
    }

    #[tokio::test]
    async fn test_successful_update_refetches_exactly_once_and_closes() {
        let api = FakeApi::with_batches(vec![batch(5, "B-5", 1, 1, 1)]);
        let mut view = BatchListView::new();
        view.load(&api).await;
        assert_eq!(api.list_calls(), 1);

        view.select(5);
        view.editing_mut().unwrap().set_field(CountField::Table, "10");
        assert!(view.submit_update(&api).await);

        assert_eq!(api.list_calls(), 2);
        assert!(view.editing().is_none());
        assert_eq!(view.rows()[0].total_eggs, 12);
    }

    #[tokio::test]
    async fn test_failed_update_stays_open_and_keeps_rows() {
        let api = FakeApi::with_batches(vec![batch(5, "B-5", 1, 1, 1)]);
        let mut view = BatchListView::new();
        view.load(&api).await;
        let before = view.batches().to_vec();

        api.set_fail_writes(true);
        view.select(5);
        view.editing_mut().unwrap().set_field(CountField::Table, "10");
        assert!(!view.submit_update(&api).await);

        assert_eq!(api.list_calls(), 1);
        assert_eq!(view.batches(), before.as_slice());
        let form = view.editing().expect("modal stays open");
        assert_eq!(form.error(), Some("Failed to update batch"));
    }

    #[tokio::test]
    async fn test_close_update_discards_edits() {
        let api = FakeApi::with_batches(vec![batch(5, "B-5", 1, 1, 1)]);
        let mut view = BatchListView::new();
        view.load(&api).await;
        view.select(5);
        view.close_update();
        assert!(!view.submit_update(&api).await);
        assert!(api.updates.lock().unwrap().is_empty());
    }
}
