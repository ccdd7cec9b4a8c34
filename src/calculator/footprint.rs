use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::error::CalcResult;
use super::{
    check_finite, check_replication, chunk_count, replicate, BM25_RATIO, CARDS_RATIO,
    RERANKER_RATIO,
};
use crate::format::{format_bytes, format_number};
use crate::units::{GIB, KIB, MIB};

/// Bytes stored per embedding scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Precision {
    Int8,
    Float16,
    Float32,
}

impl Precision {
    pub fn bytes(&self) -> u8 {
        match self {
            Precision::Int8 => 1,
            Precision::Float16 => 2,
            Precision::Float32 => 4,
        }
    }
}

impl TryFrom<u8> for Precision {
    type Error = String;

    fn try_from(bytes: u8) -> Result<Self, Self::Error> {
        match bytes {
            1 => Ok(Precision::Int8),
            2 => Ok(Precision::Float16),
            4 => Ok(Precision::Float32),
            other => Err(format!("precision must be 1, 2 or 4 bytes (got {other})")),
        }
    }
}

impl From<Precision> for u8 {
    fn from(p: Precision) -> Self {
        p.bytes()
    }
}

/// Inputs for the full-footprint calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub repo_size: f64,
    /// Byte multiplier for `repo_size` (e.g. 1073741824 for GiB)
    pub repo_unit: f64,
    pub chunk_size: f64,
    /// Byte multiplier for `chunk_size`
    pub chunk_unit: f64,
    pub embedding_dim: u32,
    pub precision: Precision,
    /// Vector index overhead applied to raw embedding bytes
    pub qdrant_overhead: f64,
    /// Share of raw repository bytes kept warm (0-100, not clamped)
    pub hydration_percent: f64,
    /// Fixed Redis allowance in MiB
    pub redis_mib: f64,
    /// Copies of the critical (non-shared) components
    pub replication_factor: u32,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            repo_size: 5.0,
            repo_unit: GIB,
            chunk_size: 4.0,
            chunk_unit: KIB,
            embedding_dim: 512,
            precision: Precision::Float32,
            qdrant_overhead: 1.5,
            hydration_percent: 100.0,
            redis_mib: 400.0,
            replication_factor: 3,
        }
    }
}

impl CalculatorInputs {
    pub fn repo_bytes(&self) -> f64 {
        self.repo_size * self.repo_unit
    }

    pub fn chunk_bytes(&self) -> f64 {
        self.chunk_size * self.chunk_unit
    }
}

/// Derived storage footprint, all sizes in bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageResults {
    pub chunks: u64,
    pub raw_embeddings: f64,
    pub qdrant_size: f64,
    pub bm25_index: f64,
    pub cards_summary: f64,
    pub hydration: f64,
    pub reranker: f64,
    pub redis: f64,
    pub single_instance: f64,
    pub replicated: f64,
}

impl StorageResults {
    /// Component rows in display order, followed by the two totals.
    pub fn breakdown(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Raw embeddings", self.raw_embeddings),
            ("Qdrant index", self.qdrant_size),
            ("BM25 index", self.bm25_index),
            ("Card summaries", self.cards_summary),
            ("Hydration cache", self.hydration),
            ("Reranker cache", self.reranker),
            ("Redis", self.redis),
            ("Single instance", self.single_instance),
            ("Replicated", self.replicated),
        ]
    }
}

impl Display for StorageResults {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "=== Storage Footprint ===")?;
        writeln!(f, "Chunks: {}", format_number(self.chunks as f64))?;
        for (label, bytes) in self.breakdown() {
            writeln!(f, "{:<17} {}", format!("{label}:"), format_bytes(bytes))?;
        }
        Ok(())
    }
}

/// Compute the exact storage footprint for one configuration.
///
/// BM25 and Redis are shared across replicas; every other component is
/// counted once per replica in `replicated`.
pub fn estimate_footprint(inputs: &CalculatorInputs) -> CalcResult<StorageResults> {
    check_replication(inputs.replication_factor)?;

    let repo_bytes = inputs.repo_bytes();
    let chunks = chunk_count(repo_bytes, inputs.chunk_bytes())?;

    let raw_embeddings =
        chunks as f64 * f64::from(inputs.embedding_dim) * f64::from(inputs.precision.bytes());
    let qdrant_size = raw_embeddings * inputs.qdrant_overhead;
    let bm25_index = BM25_RATIO * repo_bytes;
    let cards_summary = CARDS_RATIO * repo_bytes;
    let hydration = inputs.hydration_percent / 100.0 * repo_bytes;
    let reranker = RERANKER_RATIO * raw_embeddings;
    let redis = inputs.redis_mib * MIB;

    let single_instance =
        raw_embeddings + qdrant_size + bm25_index + cards_summary + hydration + reranker + redis;
    let critical = raw_embeddings + qdrant_size + hydration + cards_summary + reranker;
    let replicated = replicate(single_instance, critical, inputs.replication_factor);
    check_finite("single instance total", single_instance)?;
    check_finite("replicated total", replicated)?;

    tracing::debug!(
        chunks,
        single_instance,
        replicated,
        "Estimated storage footprint"
    );

    Ok(StorageResults {
        chunks,
        raw_embeddings,
        qdrant_size,
        bm25_index,
        cards_summary,
        hydration,
        reranker,
        redis,
        single_instance,
        replicated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CalcError;

    #[test]
    fn test_default_inputs_match_console() {
        let inputs = CalculatorInputs::default();
        assert_eq!(inputs.repo_bytes(), 5.0 * GIB);
        assert_eq!(inputs.chunk_bytes(), 4096.0);
        assert_eq!(inputs.precision, Precision::Float32);
        assert_eq!(inputs.replication_factor, 3);
    }

    #[test]
    fn test_worked_scenario() {
        let inputs = CalculatorInputs::default();
        let repo = inputs.repo_bytes();
        let r = estimate_footprint(&inputs).unwrap();

        assert_eq!(r.chunks, 1_310_720);
        assert_eq!(r.raw_embeddings, 2_684_354_560.0);
        assert_eq!(r.qdrant_size, r.raw_embeddings * 1.5);
        assert_eq!(r.bm25_index, 0.20 * repo);
        assert_eq!(r.cards_summary, 0.10 * repo);
        assert_eq!(r.hydration, repo);
        assert_eq!(r.reranker, 0.5 * r.raw_embeddings);
        assert_eq!(r.redis, 400.0 * MIB);
        assert!(r.replicated > r.single_instance);
    }

    #[test]
    fn test_bm25_and_redis_are_not_replicated() {
        let inputs = CalculatorInputs::default();
        let r = estimate_footprint(&inputs).unwrap();
        let critical = r.single_instance - r.bm25_index - r.redis;
        assert!((r.replicated - (r.single_instance + 2.0 * critical)).abs() < 1.0);
    }

    #[test]
    fn test_single_replica_equals_single_instance() {
        let inputs = CalculatorInputs {
            replication_factor: 1,
            ..CalculatorInputs::default()
        };
        let r = estimate_footprint(&inputs).unwrap();
        assert_eq!(r.replicated, r.single_instance);
    }

    #[test]
    fn test_precision_scales_embeddings() {
        let f32_run = estimate_footprint(&CalculatorInputs::default()).unwrap();
        let int8_run = estimate_footprint(&CalculatorInputs {
            precision: Precision::Int8,
            ..CalculatorInputs::default()
        })
        .unwrap();
        assert_eq!(int8_run.raw_embeddings * 4.0, f32_run.raw_embeddings);
    }

    #[test]
    fn test_hydration_percent_not_clamped() {
        let inputs = CalculatorInputs {
            hydration_percent: 150.0,
            ..CalculatorInputs::default()
        };
        let r = estimate_footprint(&inputs).unwrap();
        assert_eq!(r.hydration, 1.5 * inputs.repo_bytes());
    }

    #[test]
    fn test_zero_chunk_unit_rejected() {
        let inputs = CalculatorInputs {
            chunk_unit: 0.0,
            ..CalculatorInputs::default()
        };
        assert!(matches!(
            estimate_footprint(&inputs),
            Err(CalcError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_non_finite_total_rejected() {
        let inputs = CalculatorInputs {
            hydration_percent: 1e305,
            ..CalculatorInputs::default()
        };
        let err = estimate_footprint(&inputs).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let overhead = CalculatorInputs {
            qdrant_overhead: f64::MAX,
            ..CalculatorInputs::default()
        };
        assert!(estimate_footprint(&overhead).is_err());
    }

    #[test]
    fn test_zero_replication_rejected() {
        let inputs = CalculatorInputs {
            replication_factor: 0,
            ..CalculatorInputs::default()
        };
        assert!(estimate_footprint(&inputs).is_err());
    }

    #[test]
    fn test_precision_serde_as_byte_width() {
        let json = serde_json::to_value(Precision::Float16).unwrap();
        assert_eq!(json, 2);
        let back: Precision = serde_json::from_value(serde_json::json!(1)).unwrap();
        assert_eq!(back, Precision::Int8);
        assert!(serde_json::from_value::<Precision>(serde_json::json!(3)).is_err());
    }

    #[test]
    fn test_display_lists_every_component() {
        let r = estimate_footprint(&CalculatorInputs::default()).unwrap();
        let text = r.to_string();
        assert!(text.contains("Chunks: 1,310,720"));
        assert!(text.contains("Raw embeddings:   2.5 GiB"));
        assert!(text.contains("Redis:"));
        assert!(text.contains("Replicated:"));
    }
}
