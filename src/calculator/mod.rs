//! Storage estimation model for a RAG deployment.
//!
//! Two modes share one set of derived quantities:
//!
//! - [`footprint`] - exact byte footprint of a single configuration, plus its
//!   replicated total.
//! - [`planner`] - compares a minimal (PQ, no hydration) plan against a
//!   low-latency (float16, full cache) plan for a target budget.
//!
//! Both start from [`chunks::chunk_count`], which owns the only failure mode
//! (a chunk size that would divide by zero).

pub mod chunks;
pub mod error;
pub mod footprint;
pub mod planner;

pub use chunks::chunk_count;
pub use error::{CalcError, CalcResult};
pub use footprint::{estimate_footprint, CalculatorInputs, Precision, StorageResults};
pub use planner::{
    plan_optimization, OptimizationInputs, OptimizationPlan, OptimizationResults,
    PrecisionSizes, SharedParams, StatusType,
};

/// BM25 index size as a fraction of repository bytes.
pub const BM25_RATIO: f64 = 0.20;

/// Card summary size as a fraction of repository bytes.
pub const CARDS_RATIO: f64 = 0.10;

/// Reranker cache size as a fraction of embedding bytes.
pub const RERANKER_RATIO: f64 = 0.5;

/// Replicated total: shared costs once, critical components `factor` times.
pub(crate) fn replicate(total: f64, critical: f64, replication_factor: u32) -> f64 {
    total + f64::from(replication_factor.saturating_sub(1)) * critical
}

pub(crate) fn check_replication(replication_factor: u32) -> CalcResult<()> {
    if replication_factor == 0 {
        return Err(CalcError::InvalidConfiguration(
            "replication factor must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Reject totals that left the f64 range; they would serialise as `null`.
pub(crate) fn check_finite(label: &str, bytes: f64) -> CalcResult<()> {
    if !bytes.is_finite() {
        return Err(CalcError::InvalidConfiguration(format!(
            "{label} is out of range; check percentages and overhead"
        )));
    }
    Ok(())
}
