use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::calculator::{
    estimate_footprint, plan_optimization, CalcError, CalculatorInputs, OptimizationInputs,
    OptimizationResults, SharedParams, StorageResults,
};
use crate::format::format_bytes;
use crate::state::{AppState, SharedParamsSource};

#[derive(Debug, Clone, Serialize)]
pub struct DefaultsResponse {
    pub footprint: CalculatorInputs,
    pub optimization: OptimizationInputs,
    pub shared: SharedParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct SharedParamsResponse {
    pub source: SharedParamsSource,
    pub params: SharedParams,
}

/// One rendered row of the footprint table.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FootprintResponse {
    pub results: StorageResults,
    pub formatted: Vec<FormattedRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub inputs: OptimizationInputs,
    /// Overrides whatever the server would otherwise share
    #[serde(default)]
    pub shared: Option<SharedParams>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub shared_source: SharedParamsSource,
    #[serde(flatten)]
    pub results: OptimizationResults,
}

/// GET /api/storage/defaults - Initial inputs for both calculators
pub async fn get_defaults(State(state): State<AppState>) -> Json<DefaultsResponse> {
    let defaults = state.config.defaults.clone();
    Json(DefaultsResponse {
        footprint: defaults.footprint,
        optimization: defaults.optimization,
        shared: SharedParams::default(),
    })
}

/// GET /api/storage/shared-params - Parameters the planner would use right now
pub async fn get_shared_params(State(state): State<AppState>) -> Json<SharedParamsResponse> {
    let (source, params) = state.shared_params();
    Json(SharedParamsResponse { source, params })
}

/// POST /api/storage/footprint - Full footprint estimate; remembers the inputs
/// so later plans can share them
pub async fn estimate(
    State(state): State<AppState>,
    Json(inputs): Json<CalculatorInputs>,
) -> Result<Json<FootprintResponse>, (StatusCode, String)> {
    let results = estimate_footprint(&inputs).map_err(reject)?;
    state.remember_footprint(&inputs);

    tracing::info!(
        "Footprint: {} chunks, {} single instance, {} replicated",
        results.chunks,
        format_bytes(results.single_instance),
        format_bytes(results.replicated)
    );

    let formatted = results
        .breakdown()
        .into_iter()
        .map(|(label, bytes)| FormattedRow {
            label,
            value: format_bytes(bytes),
        })
        .collect();

    Ok(Json(FootprintResponse { results, formatted }))
}

/// POST /api/storage/plan - Compare the minimal and low-latency plans.
///
/// Shared parameters resolve as: request body, then the last footprint
/// estimate (when sharing is enabled), then the fixed defaults.
pub async fn plan(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let (shared_source, shared) = match req.shared {
        Some(params) => (SharedParamsSource::Request, params),
        None => state.shared_params(),
    };

    let results = plan_optimization(&req.inputs, Some(&shared)).map_err(reject)?;

    tracing::info!(
        "Plan ({:?} params): {}",
        shared_source,
        results.status_message
    );

    Ok(Json(PlanResponse {
        shared_source,
        results,
    }))
}

fn reject(e: CalcError) -> (StatusCode, String) {
    tracing::warn!("Rejected calculator inputs: {e}");
    (StatusCode::BAD_REQUEST, e.to_string())
}
