use serde::{Deserialize, Serialize};

use super::error::CalcResult;
use super::footprint::CalculatorInputs;
use super::{check_finite, check_replication, chunk_count, replicate, RERANKER_RATIO};
use crate::format::format_bytes;
use crate::units::{GIB, KIB, MIB};

pub const MINIMAL_PLAN_NAME: &str = "Minimal (No Hydration)";
pub const LOW_LATENCY_PLAN_NAME: &str = "Low Latency (Full Cache)";

pub const MINIMAL_PLAN_DESCRIPTION: [&str; 6] = [
    "Product quantization (8x smaller than float32)",
    "Qdrant vector index",
    "BM25 index",
    "Card summaries",
    "Redis cache",
    "Reranker cache (no hydration, chunks fetched on demand)",
];

pub const LOW_LATENCY_PLAN_DESCRIPTION: [&str; 7] = [
    "float16 embeddings (2x smaller than float32)",
    "Qdrant vector index",
    "Full hydration cache",
    "BM25 index",
    "Card summaries",
    "Reranker cache",
    "Redis cache",
];

/// Inputs for the optimization comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationInputs {
    pub repo_size: f64,
    pub repo_unit: f64,
    /// Storage budget the plans are checked against
    pub target_size: f64,
    pub target_unit: f64,
    pub chunk_size: f64,
    pub chunk_unit: f64,
    pub embedding_dim: u32,
    /// BM25 index size as a share of the repository (0-100)
    pub bm25_percent: f64,
    /// Card summary size as a share of the repository (0-100)
    pub cards_percent: f64,
}

impl Default for OptimizationInputs {
    fn default() -> Self {
        Self {
            repo_size: 5.0,
            repo_unit: GIB,
            target_size: 5.0,
            target_unit: GIB,
            chunk_size: 4.0,
            chunk_unit: KIB,
            embedding_dim: 512,
            bm25_percent: 20.0,
            cards_percent: 10.0,
        }
    }
}

impl OptimizationInputs {
    pub fn repo_bytes(&self) -> f64 {
        self.repo_size * self.repo_unit
    }

    pub fn target_bytes(&self) -> f64 {
        self.target_size * self.target_unit
    }

    pub fn chunk_bytes(&self) -> f64 {
        self.chunk_size * self.chunk_unit
    }
}

/// Parameters the planner borrows from a footprint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedParams {
    pub qdrant_overhead: f64,
    pub hydration_percent: f64,
    pub redis_mib: f64,
    pub replication_factor: u32,
}

impl Default for SharedParams {
    fn default() -> Self {
        Self {
            qdrant_overhead: 1.5,
            hydration_percent: 100.0,
            redis_mib: 390.0,
            replication_factor: 3,
        }
    }
}

impl From<&CalculatorInputs> for SharedParams {
    fn from(inputs: &CalculatorInputs) -> Self {
        Self {
            qdrant_overhead: inputs.qdrant_overhead,
            hydration_percent: inputs.hydration_percent,
            redis_mib: inputs.redis_mib,
            replication_factor: inputs.replication_factor,
        }
    }
}

/// Full embedding-set size at each precision, in bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionSizes {
    pub float32: f64,
    pub float16: f64,
    pub int8: f64,
    pub pq8: f64,
}

impl PrecisionSizes {
    fn from_float32(float32: f64) -> Self {
        Self {
            float32,
            float16: float32 / 2.0,
            int8: float32 / 4.0,
            pq8: float32 / 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationPlan {
    pub name: String,
    /// Fixed line-item labels, in display order
    pub description: Vec<String>,
    pub total: f64,
    pub replicated: f64,
    /// Whether `total` is within the target budget
    pub fits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    Success,
    Warning,
    /// Kept for wire compatibility; the planner never produces it.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResults {
    pub chunks: u64,
    /// Repository size in bytes
    pub base_storage: f64,
    pub precisions: PrecisionSizes,
    pub aggressive_plan: OptimizationPlan,
    pub conservative_plan: OptimizationPlan,
    pub status_message: String,
    pub status_type: StatusType,
}

/// Compare the minimal and low-latency plans against the target budget.
///
/// `shared` carries the footprint calculator's overhead, hydration, Redis and
/// replication settings; `None` falls back to [`SharedParams::default`].
pub fn plan_optimization(
    inputs: &OptimizationInputs,
    shared: Option<&SharedParams>,
) -> CalcResult<OptimizationResults> {
    let fallback = SharedParams::default();
    let shared = shared.unwrap_or(&fallback);
    check_replication(shared.replication_factor)?;

    let repo_bytes = inputs.repo_bytes();
    let target_bytes = inputs.target_bytes();
    let chunks = chunk_count(repo_bytes, inputs.chunk_bytes())?;

    let precisions =
        PrecisionSizes::from_float32(chunks as f64 * f64::from(inputs.embedding_dim) * 4.0);

    let bm25_index = inputs.bm25_percent / 100.0 * repo_bytes;
    let cards_summary = inputs.cards_percent / 100.0 * repo_bytes;
    let redis = shared.redis_mib * MIB;

    // Minimal: PQ embeddings, nothing hydrated.
    let aggressive = {
        let embeddings = precisions.pq8;
        let qdrant = embeddings * shared.qdrant_overhead;
        let reranker = RERANKER_RATIO * embeddings;
        let total = embeddings + qdrant + bm25_index + cards_summary + redis + reranker;
        let critical = embeddings + qdrant + cards_summary + reranker;
        build_plan(
            MINIMAL_PLAN_NAME,
            &MINIMAL_PLAN_DESCRIPTION,
            total,
            replicate(total, critical, shared.replication_factor),
            target_bytes,
        )
    };

    // Low latency: float16 embeddings with the hydration cache.
    let conservative = {
        let embeddings = precisions.float16;
        let qdrant = embeddings * shared.qdrant_overhead;
        let reranker = RERANKER_RATIO * embeddings;
        let hydration = shared.hydration_percent / 100.0 * repo_bytes;
        let total = embeddings + qdrant + hydration + bm25_index + cards_summary + reranker + redis;
        let critical = embeddings + qdrant + hydration + cards_summary + reranker;
        build_plan(
            LOW_LATENCY_PLAN_NAME,
            &LOW_LATENCY_PLAN_DESCRIPTION,
            total,
            replicate(total, critical, shared.replication_factor),
            target_bytes,
        )
    };

    for plan in [&aggressive, &conservative] {
        check_finite(&format!("{} total", plan.name), plan.total)?;
        check_finite(&format!("{} replicated total", plan.name), plan.replicated)?;
    }

    let (status_type, status_message) = classify(&aggressive, &conservative, target_bytes);

    tracing::debug!(
        chunks,
        aggressive_fits = aggressive.fits,
        conservative_fits = conservative.fits,
        "Planned storage optimization"
    );

    Ok(OptimizationResults {
        chunks,
        base_storage: repo_bytes,
        precisions,
        aggressive_plan: aggressive,
        conservative_plan: conservative,
        status_message,
        status_type,
    })
}

fn build_plan(
    name: &str,
    description: &[&str],
    total: f64,
    replicated: f64,
    target_bytes: f64,
) -> OptimizationPlan {
    OptimizationPlan {
        name: name.to_string(),
        description: description.iter().map(|s| s.to_string()).collect(),
        total,
        replicated,
        fits: total <= target_bytes,
    }
}

// Neither-fits stays a warning, matching what the console has always shown.
fn classify(
    aggressive: &OptimizationPlan,
    conservative: &OptimizationPlan,
    target_bytes: f64,
) -> (StatusType, String) {
    if aggressive.fits && conservative.fits {
        (
            StatusType::Success,
            format!(
                "Both configurations fit within your {} limit",
                format_bytes(target_bytes)
            ),
        )
    } else if aggressive.fits {
        (
            StatusType::Warning,
            format!(
                "Only Minimal config fits. Low Latency config needs {} more storage.",
                format_bytes(conservative.total - target_bytes)
            ),
        )
    } else {
        (
            StatusType::Warning,
            format!(
                "Both exceed limit. Minimal needs {} more. Consider larger chunks or stronger compression.",
                format_bytes(aggressive.total - target_bytes)
            ),
        )
    }
}
