use thiserror::Error;

use crate::net::FaceId;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("the net has no cells")]
    EmptyNet,

    #[error("the net is too large: {0}x{1} cells")]
    NetTooLarge(usize, usize),

    #[error("{cells} non-void cells cannot form exactly six equal square faces")]
    FaceCount { cells: usize },

    #[error("the {n}x{n} block at {x}, {y} is only partially filled")]
    RaggedFace { x: usize, y: usize, n: usize },

    #[error("invalid topology: {0}")]
    Topology(String),

    #[error("cannot fold face {face}: {reason}")]
    Fold { face: FaceId, reason: String },

    #[error("face {0} has no open cell to start from")]
    NoOpenCell(FaceId),
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(e: nom::Err<nom::error::Error<&str>>) -> Self {
        // keep only the offending line, the remaining input can be the whole file
        let e = e.map(|e| {
            let line = e.input.lines().next().unwrap_or_default();

            nom::error::Error::new(line.to_string(), e.code)
        });

        Self::Parse(e.to_string())
    }
}
