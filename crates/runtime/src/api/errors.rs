//! Unified error types surfaced by the runtime API.
//!
//! Guard rejections are not errors here; they come back as
//! [`DispatchOutcome::Rejected`](super::DispatchOutcome::Rejected). What
//! remains are coordination failures and bad input.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ConfigError, ExecuteError, InstanceId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("instance ids exhausted")]
    InstancesExhausted,

    #[error("unknown instance {0}")]
    UnknownInstance(InstanceId),

    #[error("invalid archetype configuration")]
    InvalidArchetype(#[from] ConfigError),

    #[error(transparent)]
    Execute(ExecuteError),

    #[error("replication frame codec failed")]
    Codec(#[from] bincode::Error),
}
