use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::OracleConfig;
use crate::error::OracleError;
use crate::events::OracleEvent;
use crate::oracle::PrimeOracle;

/// Each query holds the lock for its whole grow-then-read sequence. Clones
/// share the same oracle.
#[derive(Debug, Clone, Default)]
pub struct SharedOracle {
    inner: Arc<Mutex<PrimeOracle>>,
}

impl SharedOracle {
    pub fn new(oracle: PrimeOracle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(oracle)),
        }
    }

    pub fn with_config(config: OracleConfig) -> Result<Self, OracleError> {
        Ok(Self::new(PrimeOracle::with_config(config)?))
    }

    pub fn is_prime(&self, n: i64) -> bool {
        self.lock().is_prime(n)
    }

    pub fn try_is_prime(&self, n: i64) -> Result<bool, OracleError> {
        self.lock().try_is_prime(n)
    }

    pub fn max_checked(&self) -> i64 {
        self.lock().max_checked()
    }

    pub fn ensure_covered(&self, bound: i64) -> Result<(), OracleError> {
        self.lock().ensure_covered(bound)
    }

    pub fn take_events(&self) -> Vec<OracleEvent> {
        self.lock().take_events()
    }

    // Growth only panics before the table is touched, so a poisoned lock
    // still guards a consistent oracle.
    fn lock(&self) -> MutexGuard<'_, PrimeOracle> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
