//! Pipelines over the essay corpus.
//!
//! Each pipeline works against any [`RecordStore`] and takes its paths from
//! a [`PipelineConfig`]:
//!
//! - [`ingest`]: read the dataset folder and populate the table
//! - [`augment`]: backfill raw text, then write summaries and keywords
//! - [`maintain`]: resolve duplicates, prune blank columns, report
//! - [`backup`] / [`remove`] / [`collect`]: file-level housekeeping
//!
//! Interactive prompts go through [`Confirm`], and file-level outcomes are
//! appended to an [`OpLog`].
//!
//! [`RecordStore`]: essay_core::store::RecordStore

pub mod augment;
pub mod backup;
pub mod collect;
pub mod config;
pub mod confirm;
pub mod error;
pub mod ingest;
pub mod maintain;
pub mod oplog;
pub mod remove;
pub mod report;

pub use augment::{AugmentReport, Augmenter};
pub use backup::{BackupOutcome, RestoreOutcome};
pub use collect::CollectReport;
pub use config::PipelineConfig;
pub use confirm::{AssumeYes, Confirm, StdinConfirm};
pub use error::{Error, Result};
pub use ingest::IngestReport;
pub use oplog::OpLog;
pub use remove::RemoveOutcome;
pub use report::HealthReport;

// ─── Shared test helpers ─────────────────────────────────────────────────────
