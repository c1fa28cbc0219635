pub mod config;
pub mod error;
pub mod events;
pub mod oracle;
pub mod shared;
pub mod sieve;

pub use config::{GrowthStrategy, OnePolicy, OracleConfig};
pub use error::OracleError;
pub use events::OracleEvent;
pub use oracle::{PrimeOracle, DEFAULT_BOUND, DEFAULT_EVENT_CAPACITY};
pub use shared::SharedOracle;
pub use sieve::trial_division;
