//! In-memory `BatchApi` used by the view tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::BatchApi;
use crate::errors::ApiError;
use crate::model::{Batch, BatchUpdate, HistoryRecord, NewBatch};

#[derive(Default)]
pub struct FakeApi {
    pub batches: Mutex<Vec<Batch>>,
    pub history: Mutex<Vec<HistoryRecord>>,
    pub created: Mutex<Vec<NewBatch>>,
    pub updates: Mutex<Vec<(i64, BatchUpdate)>>,
    pub list_calls: Mutex<u32>,
    pub fail_reads: Mutex<bool>,
    pub fail_writes: Mutex<bool>,
}

impl FakeApi {
    pub fn with_batches(batches: Vec<Batch>) -> Self {
        Self {
            batches: Mutex::new(batches),
            ..Self::default()
        }
    }

    pub fn with_history(history: Vec<HistoryRecord>) -> Self {
        Self {
            history: Mutex::new(history),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn list_calls(&self) -> u32 {
        *self.list_calls.lock().unwrap()
    }

    fn failure(path: &str) -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            url: format!("http://fake{}", path),
        }
    }
}

#[async_trait]
impl BatchApi for FakeApi {
    async fn list_batches(&self) -> Result<Vec<Batch>, ApiError> {
        *self.list_calls.lock().unwrap() += 1;
        if *self.fail_reads.lock().unwrap() {
            return Err(Self::failure("/batches/"));
        }
        Ok(self.batches.lock().unwrap().clone())
    }

    async fn get_batch(&self, id: i64) -> Result<Batch, ApiError> {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: format!("http://fake/batches/{}", id),
            })
    }

    async fn create_batch(&self, batch: &NewBatch) -> Result<(), ApiError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(Self::failure("/batches/"));
        }
        self.created.lock().unwrap().push(batch.clone());
        Ok(())
    }

    async fn update_batch(&self, id: i64, update: &BatchUpdate) -> Result<(), ApiError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(Self::failure("/batches/:id"));
        }
        self.updates.lock().unwrap().push((id, *update));
        let mut batches = self.batches.lock().unwrap();
        if let Some(batch) = batches.iter_mut().find(|b| b.id == id) {
            batch.mortality = update.mortality;
            batch.culls = update.culls;
            batch.table = update.table;
            batch.jumbo = update.jumbo;
            batch.cr = update.cr;
        }
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<HistoryRecord>, ApiError> {
        if *self.fail_reads.lock().unwrap() {
            return Err(Self::failure("/batch-history"));
        }
        Ok(self.history.lock().unwrap().clone())
    }
}

pub fn batch(id: i64, batch_no: &str, table: u32, jumbo: u32, cr: u32) -> Batch {
    Batch {
        id,
        shed_no: 1,
        batch_no: batch_no.to_string(),
        age: "10.2".parse().unwrap(),
        opening_count: 1000,
        mortality: 2,
        culls: 1,
        closing_count: 997,
        table,
        jumbo,
        cr,
        date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    }
}
