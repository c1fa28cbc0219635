use std::collections::VecDeque;
use std::fmt;

use crate::config::{GrowthStrategy, OnePolicy, OracleConfig};
use crate::error::OracleError;
use crate::events::{render_json, OracleEvent};
use crate::sieve::{base_primes, extend_segment, full_sieve, isqrt, zeroed};

pub const DEFAULT_BOUND: i64 = 1000;
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Answers primality queries from a cached table covering `1..=max_checked()`.
/// A query above that range grows coverage to `2n + 1` before answering.
pub struct PrimeOracle {
    table: Vec<bool>,
    one: OnePolicy,
    strategy: GrowthStrategy,
    growths: usize,
    events: VecDeque<OracleEvent>,
    event_capacity: usize,
}

impl PrimeOracle {
    /// # Panics
    /// If the initial table cannot be allocated.
    pub fn new() -> Self {
        match Self::with_config(OracleConfig::default()) {
            Ok(oracle) => oracle,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn with_bound(bound: i64) -> Result<Self, OracleError> {
        Self::with_config(OracleConfig::with_bound(bound))
    }

    pub fn with_config(config: OracleConfig) -> Result<Self, OracleError> {
        if config.initial_bound < 0 {
            return Err(OracleError::NegativeBound(config.initial_bound));
        }
        let len = table_len(config.initial_bound)?;
        let table = sieved(len, config.one)?;
        let mut oracle = Self {
            table,
            one: config.one,
            strategy: config.strategy,
            growths: 0,
            events: VecDeque::with_capacity(config.event_capacity.min(DEFAULT_EVENT_CAPACITY)),
            event_capacity: config.event_capacity,
        };
        oracle.record(OracleEvent::Sieved {
            bound: config.initial_bound,
            strategy: config.strategy,
        });
        Ok(oracle)
    }

    /// # Panics
    /// If growth cannot allocate the larger table. Use [`try_is_prime`] to get
    /// the failure back as an error instead.
    ///
    /// [`try_is_prime`]: PrimeOracle::try_is_prime
    pub fn is_prime(&mut self, n: i64) -> bool {
        match self.try_is_prime(n) {
            Ok(answer) => answer,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_is_prime(&mut self, n: i64) -> Result<bool, OracleError> {
        if n <= 0 {
            return Ok(false);
        }
        if n > self.max_checked() {
            // 2n + 1 saturates to n near i64::MAX
            let target = n.checked_mul(2).and_then(|d| d.checked_add(1)).unwrap_or(n);
            self.grow_to(target, Some(n))?;
        }
        Ok(self.table[(n - 1) as usize])
    }

    pub fn max_checked(&self) -> i64 {
        self.table.len() as i64
    }

    /// Grows coverage to exactly `bound`, without the `2n + 1` headroom.
    pub fn ensure_covered(&mut self, bound: i64) -> Result<(), OracleError> {
        self.grow_to(bound, None)
    }

    pub fn growth_count(&self) -> usize {
        self.growths
    }

    pub fn one_policy(&self) -> OnePolicy {
        self.one
    }

    pub fn strategy(&self) -> GrowthStrategy {
        self.strategy
    }

    pub fn events(&self) -> &VecDeque<OracleEvent> {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<OracleEvent> {
        self.events.drain(..).collect()
    }

    pub fn events_json(&self) -> Result<String, OracleError> {
        render_json(&self.events)
    }

    fn grow_to(&mut self, target: i64, query: Option<i64>) -> Result<(), OracleError> {
        let from = self.max_checked();
        if target <= from {
            return Ok(());
        }
        match self.rebuild(target) {
            Ok(()) => {
                self.growths += 1;
                self.record(OracleEvent::Grown {
                    from,
                    to: self.max_checked(),
                    query,
                    strategy: self.strategy,
                });
                Ok(())
            }
            Err(err) => {
                self.record_failure(target, &err);
                Err(err)
            }
        }
    }

    // Nothing in `self.table` changes until every allocation has succeeded.
    fn rebuild(&mut self, target: i64) -> Result<(), OracleError> {
        let new_len = table_len(target)?;
        match self.strategy {
            GrowthStrategy::Recompute => {
                self.table = sieved(new_len, self.one)?;
            }
            GrowthStrategy::Segmented => {
                self.table
                    .try_reserve_exact(new_len - self.table.len())
                    .map_err(|_| OracleError::Allocation { requested: new_len })?;
                let base = base_primes(isqrt(new_len), &self.table)?;
                extend_segment(&mut self.table, new_len, &base, self.one);
            }
        }
        Ok(())
    }

    // Retrying the same failing target bumps the last entry instead of adding one.
    fn record_failure(&mut self, target: i64, err: &OracleError) {
        if let Some(OracleEvent::GrowthFailed { requested, attempts, .. }) = self.events.back_mut() {
            if *requested == target {
                *attempts += 1;
                return;
            }
        }
        self.record(OracleEvent::GrowthFailed {
            requested: target,
            reason: err.to_string(),
            attempts: 1,
        });
    }

    fn record(&mut self, event: OracleEvent) {
        if self.event_capacity == 0 {
            return;
        }
        while self.events.len() >= self.event_capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

impl Default for PrimeOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PrimeOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimeOracle")
            .field("max_checked", &self.max_checked())
            .field("one", &self.one)
            .field("strategy", &self.strategy)
            .field("growths", &self.growths)
            .finish()
    }
}

fn table_len(bound: i64) -> Result<usize, OracleError> {
    usize::try_from(bound).map_err(|_| OracleError::CapacityOverflow { requested: bound })
}

fn sieved(len: usize, one: OnePolicy) -> Result<Vec<bool>, OracleError> {
    let mut table = zeroed(len)?;
    let mut composite = zeroed(len)?;
    full_sieve(&mut table, &mut composite, one);
    Ok(table)
}
