use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::calculator::{CalculatorInputs, SharedParams};
use crate::config::Config;

/// Where the planner's shared parameters came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SharedParamsSource {
    Request,
    Footprint,
    Defaults,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Inputs of the last successful footprint estimate
    pub last_footprint: Arc<RwLock<Option<CalculatorInputs>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            last_footprint: Arc::new(RwLock::new(None)),
        }
    }

    pub fn remember_footprint(&self, inputs: &CalculatorInputs) {
        *self.last_footprint.write() = Some(inputs.clone());
    }

    /// Parameters the planner should use when a request does not carry its own.
    pub fn shared_params(&self) -> (SharedParamsSource, SharedParams) {
        if self.config.share_footprint_params {
            if let Some(inputs) = self.last_footprint.read().as_ref() {
                return (SharedParamsSource::Footprint, SharedParams::from(inputs));
            }
        }
        (SharedParamsSource::Defaults, SharedParams::default())
    }
}
