//! # rag-storage-calc
//!
//! Storage footprint estimator and optimisation planner for a
//! retrieval-augmented-generation deployment, with a small HTTP service in
//! front of it.
//!
//! ## Model
//!
//! ```text
//!   repo size, chunk size ──► chunk count
//!                                 │
//!        ┌────────────────────────┴────────────────────────┐
//!        ▼                                                 ▼
//!  Footprint Estimator                           Optimization Planner
//!  embeddings × precision                        float32 / float16 / int8 / pq8
//!  + qdrant overhead                             Minimal (pq8, no hydration)
//!  + BM25 (20%) + cards (10%)                    Low Latency (float16, full cache)
//!  + hydration + reranker (50%)                  fits target? ──► status
//!  + redis                                                 ▲
//!  single instance / replicated ── shared params ──────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`units`] - Binary byte units and multipliers
//! - [`format`] - `format_bytes`, `format_number`, `parse_bytes`
//! - [`calculator`] - Chunk counter, footprint estimator, optimization planner
//! - [`config`] - Environment-based configuration for the service
//! - [`state`] - Shared state: config and the last footprint inputs
//! - [`api`] - Axum handlers for the calculators

pub mod api;
pub mod calculator;
pub mod config;
pub mod format;
pub mod state;
pub mod units;
