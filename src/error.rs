use thiserror::Error;

use crate::model::{HistoryKind, PlayerId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("player {0} is listed as both available and selected")]
    Overlap(PlayerId),

    #[error("player {0} is listed more than once")]
    Duplicate(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    /// A required form field was left blank. Carries the message shown to the user.
    #[error("{0}")]
    Required(&'static str),

    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("not a number: {0:?}")]
    InvalidNumber(String),

    #[error("unknown position: {0:?}")]
    InvalidPosition(String),

    #[error("player {0} not found")]
    UnknownPlayer(PlayerId),

    #[error("team {0} not found")]
    UnknownTeam(TeamId),

    #[error("{kind} entry {id} not found")]
    UnknownHistoryItem { kind: HistoryKind, id: u32 },

    #[error("no {0} id left to assign")]
    IdsExhausted(&'static str),

    #[error("incorrect password")]
    WrongPassword,

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub type AdminResult<T> = Result<T, AdminError>;
