//! Per-job and per-batch result records.
//!
//! Every job in a batch ends up as a [`JobReport`]; failures carry their
//! error kind and message instead of aborting the run.

use crate::error::{CoreError, CoreResult, ErrorKind};
use crate::presets::Preset;
use crate::reporting::CompressionStats;

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Why a job failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&CoreError> for JobFailure {
    fn from(err: &CoreError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Outcome of a single job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Succeeded(CompressionStats),
    Failed(JobFailure),
}

/// Record of one input-to-output transcode.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub preset: Preset,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    #[serde(flatten)]
    pub status: JobStatus,
}

fn serialize_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl JobReport {
    pub fn is_success(&self) -> bool {
        matches!(self.status, JobStatus::Succeeded(_))
    }

    /// The input file name, for display.
    pub fn filename(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

/// Ordered collection of job reports for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub jobs: Vec<JobReport>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, job: JobReport) {
        self.jobs.push(job);
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &JobReport> {
        self.jobs.iter().filter(|job| job.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &JobReport> {
        self.jobs.iter().filter(|job| !job.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    /// True when no job failed (an empty batch counts as success).
    pub fn all_succeeded(&self) -> bool {
        self.failure_count() == 0
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
