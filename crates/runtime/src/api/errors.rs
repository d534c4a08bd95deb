//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules crate, the item catalog, and worker
//! coordination so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use match_core::{
    ErrorSeverity, GameError, ItemId, MatchError, RoundError, SamplingError,
};

use crate::catalog::CatalogError;
use crate::session::SessionStatus;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("not enough unused items to build a round")]
    Sampling(#[from] SamplingError),

    #[error("catalog lookup for item {id} failed")]
    Catalog {
        id: ItemId,
        #[source]
        source: CatalogError,
    },

    #[error("round setup rejected")]
    Round(#[from] RoundError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("no round is active")]
    NoActiveRound,

    #[error("cannot start a round while the session is {status:?}")]
    RoundAlreadyStarted { status: SessionStatus },

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("background task join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an item catalog to be configured before building")]
    MissingCatalog,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Sampling(error) => error.severity(),
            Self::Catalog { source, .. } => source.severity(),
            Self::Round(error) => error.severity(),
            Self::Match(error) => error.severity(),
            Self::NoActiveRound | Self::RoundAlreadyStarted { .. } => ErrorSeverity::Validation,
            Self::MissingCatalog => ErrorSeverity::Fatal,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Sampling(error) => error.error_code(),
            Self::Catalog { source, .. } => source.error_code(),
            Self::Round(error) => error.error_code(),
            Self::Match(error) => error.error_code(),
            Self::NoActiveRound => "NO_ACTIVE_ROUND",
            Self::RoundAlreadyStarted { .. } => "ROUND_ALREADY_STARTED",
            Self::CommandChannelClosed => "COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "WORKER_JOIN",
            Self::MissingCatalog => "MISSING_CATALOG",
        }
    }
}
