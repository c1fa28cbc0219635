use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Coverage bound must not be negative (got {0})")]
    NegativeBound(i64),
    #[error("Coverage bound {requested} does not fit in memory addressing")]
    CapacityOverflow { requested: i64 },
    #[error("Could not allocate a prime table of {requested} entries")]
    Allocation { requested: usize },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Cannot render events: {0}")]
    Render(String),
}
