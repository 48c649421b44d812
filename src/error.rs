use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or advancing a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-positive radius or mass, bad screen size, malformed initial conditions.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two body centers coincide, so no contact normal exists.
    #[error("degenerate geometry: bodies {a} and {b} share the same center")]
    DegenerateGeometry { a: usize, b: usize },

    /// NaN or infinity appeared in a body's position or velocity.
    #[error("non-finite state in body {index} after frame {frame}")]
    NonFiniteState { index: usize, frame: usize },

    /// Random seeding ran out of attempts to find a free spot.
    #[error("could not place body {placed} of {requested} after {attempts} attempts")]
    Placement {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    /// Malformed scenario file.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
