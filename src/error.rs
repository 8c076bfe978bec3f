/// Errors surfaced at the simulation API boundary.
///
/// The numeric core has no failure paths of its own: once a `FluidState` has
/// been constructed, `step()` always succeeds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i64, y: i64, size: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type SimResult<T> = Result<T, SimError>;
