//! Error type for the simulation engine

use thiserror::Error;

use super::types::AgentId;

#[derive(Debug, Error)]
pub enum SimError {
    /// The simulation cannot start safely with this setup
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to spawn thread for {agent}")]
    Spawn {
        agent: AgentId,
        #[source]
        source: std::io::Error,
    },

    #[error("agents are already running")]
    AlreadyRunning,
}

pub type SimResult<T> = Result<T, SimError>;
