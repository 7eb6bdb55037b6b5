//! Scout pipeline orchestration.
//!
//! Composes the campaign source, discovery adapter, seen cache, and
//! publisher into the per-campaign stage machine, enforcing the
//! single-in-flight-run invariant and producing a run summary.

mod filters;
mod orchestrator;
mod ports;
mod run_lock;
mod summary;

pub use filters::{filter_by_influence, filter_recent};
pub use orchestrator::{PipelineConfig, RunOutcome, ScoutPipeline};
pub use ports::{CampaignSource, CandidateSink, Discovery, SeenStore};
pub use run_lock::{RunGuard, RunLock};
pub use summary::RunSummary;
