use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::enrich::BookResult;

/// How long a completed job stays queryable by default
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
}

/// Availability class of a batch row: `A` when no seller carries the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
}

impl Grade {
    pub fn from_store_count(store_count: u32) -> Self {
        if store_count == 0 { Grade::A } else { Grade::B }
    }
}

/// One processed keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRow {
    #[serde(flatten)]
    pub book: BookResult,
    pub grade: Grade,
}

impl From<BookResult> for JobRow {
    fn from(book: BookResult) -> Self {
        let grade = Grade::from_store_count(book.store_count);
        Self { book, grade }
    }
}

/// Snapshot of a batch keyword job
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub status: JobStatus,
    pub progress: u8,
    pub results: Vec<JobRow>,
    #[serde(skip)]
    finished_at: Option<Instant>,
}

impl Job {
    fn queued() -> Self {
        Self {
            status: JobStatus::Queued,
            progress: 0,
            results: Vec::new(),
            finished_at: None,
        }
    }

    fn expired(&self, retention: Duration) -> bool {
        self.finished_at
            .is_some_and(|finished| finished.elapsed() >= retention)
    }
}

/// In-memory job table. Completed jobs are dropped once older than the
/// retention window; the sweep runs whenever a new job is created.
#[derive(Debug, Clone)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
    retention: Duration,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retention(retention: Duration) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            retention,
        }
    }

    /// Register a new queued job and return its id
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut jobs = self.jobs.write().await;

        let before = jobs.len();
        jobs.retain(|_, job| !job.expired(self.retention));
        if jobs.len() < before {
            debug!(purged = before - jobs.len(), "Dropped expired jobs");
        }

        jobs.insert(id, Job::queued());
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    pub async fn mark_running(&self, id: &Uuid) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Running;
            job.progress = 0;
            job.results.clear();
        }
    }

    /// Append one finished row. `done` of `total` keywords are now processed.
    pub async fn push_result(&self, id: &Uuid, row: JobRow, done: usize, total: usize) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.results.push(row);
            job.progress = progress_percent(done, total);
        }
    }

    pub async fn complete(&self, id: &Uuid) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Completed;
            job.progress = 100;
            job.finished_at = Some(Instant::now());
        }
    }
}

fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done.min(total) * 100) / total) as u8
}
