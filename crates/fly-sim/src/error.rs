use fly_core::{AgentId, ConfigError};
use fly_drone::DroneError;
use thiserror::Error;

/// Errors that abort building a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("scenario configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type SimResult<T> = Result<T, SimError>;

/// A structural problem met while processing one tick.
///
/// Collected into [`TickResult::errors`][crate::TickResult::errors] rather
/// than returned, so one inconsistent drone never stops the others.  Capacity
/// refusals are not errors and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickError {
    #[error(transparent)]
    Drone(#[from] DroneError),

    #[error("drone {0} appears more than once in the tick input")]
    DuplicateAgent(AgentId),
}
