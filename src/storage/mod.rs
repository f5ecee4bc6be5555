pub mod jobs;

pub use jobs::{Grade, Job, JobRow, JobStatus, JobStore};
