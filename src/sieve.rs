//! Sieve kernels. Tables are 1-based by value: slot `i` holds the answer for `i + 1`.

use crate::config::OnePolicy;
use crate::error::OracleError;

pub(crate) fn zeroed(len: usize) -> Result<Vec<bool>, OracleError> {
    let mut flags = Vec::new();
    flags
        .try_reserve_exact(len)
        .map_err(|_| OracleError::Allocation { requested: len })?;
    flags.resize(len, false);
    Ok(flags)
}

/// Every index marks its multiples in `composite`, prime or not. Multiples of a
/// composite are already covered by its factors, so the extra passes only cost
/// time. `composite` must be cleared and at least as long as `table`.
pub fn full_sieve(table: &mut [bool], composite: &mut [bool], one: OnePolicy) {
    let len = table.len();
    if len == 0 {
        return;
    }
    table[0] = one.is_prime();
    for i in 1..len {
        table[i] = !composite[i];
        let step = i + 1;
        for j in 2..=len / step {
            composite[step * j - 1] = true;
        }
    }
}

pub(crate) fn base_primes(limit: usize, table: &[bool]) -> Result<Vec<usize>, OracleError> {
    if limit <= table.len() {
        return Ok((2..=limit).filter(|&k| table[k - 1]).collect());
    }
    let mut is_composite = zeroed(limit + 1)?;
    let mut primes = Vec::new();
    for p in 2..=limit {
        if is_composite[p] {
            continue;
        }
        primes.push(p);
        let mut k = p * p;
        while k <= limit {
            is_composite[k] = true;
            k += p;
        }
    }
    Ok(primes)
}

/// `base` must hold every prime up to `isqrt(new_len)` and the caller must
/// have reserved the extra capacity.
pub(crate) fn extend_segment(table: &mut Vec<bool>, new_len: usize, base: &[usize], one: OnePolicy) {
    let old_len = table.len();
    if new_len <= old_len {
        return;
    }
    table.resize(new_len, true);
    if old_len == 0 {
        table[0] = one.is_prime();
    }
    let lo = old_len + 1;
    for &p in base {
        let first = (p * p).max(lo.div_ceil(p) * p);
        let mut k = first;
        while k <= new_len {
            table[k - 1] = false;
            k += p;
        }
    }
}

pub(crate) fn isqrt(n: usize) -> usize {
    let mut r = (n as f64).sqrt() as usize;
    while r > 0 && r.saturating_mul(r) > n {
        r -= 1;
    }
    while (r + 1).saturating_mul(r + 1) <= n {
        r += 1;
    }
    r
}

pub fn trial_division(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i: i64 = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sieve_of(len: usize, one: OnePolicy) -> Vec<bool> {
        let mut table = vec![false; len];
        let mut scratch = vec![false; len];
        full_sieve(&mut table, &mut scratch, one);
        table
    }

    #[test]
    fn full_sieve_first_ten() {
        let table = sieve_of(10, OnePolicy::Composite);
        let primes: Vec<usize> = (1..=10).filter(|&k| table[k - 1]).collect();
        assert_eq!(primes, vec![2, 3, 5, 7]);
    }

    #[test]
    fn full_sieve_legacy_one() {
        assert!(sieve_of(1, OnePolicy::Prime)[0]);
        assert!(!sieve_of(1, OnePolicy::Composite)[0]);
    }

    #[test]
    fn empty_table_is_untouched() {
        assert!(sieve_of(0, OnePolicy::Prime).is_empty());
    }

    #[test]
    fn segment_matches_full_sieve() {
        let one = OnePolicy::Composite;
        for (from, to) in [(0, 50), (1, 2), (10, 11), (10, 400), (97, 98), (30, 1000)] {
            let mut table = sieve_of(from, one);
            let base = base_primes(isqrt(to), &table).unwrap();
            table.reserve(to - from);
            extend_segment(&mut table, to, &base, one);
            assert_eq!(table, sieve_of(to, one), "extend {} -> {}", from, to);
        }
    }

    #[test]
    fn base_primes_beyond_table() {
        let table = sieve_of(5, OnePolicy::Composite);
        assert_eq!(base_primes(20, &table).unwrap(), vec![2, 3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(base_primes(5, &table).unwrap(), vec![2, 3, 5]);
        assert!(base_primes(1, &table).unwrap().is_empty());
    }

    #[test]
    fn isqrt_exact_and_between() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(195), 13);
    }

    #[test]
    fn trial_division_small() {
        let primes: Vec<i64> = (-5..30).filter(|&n| trial_division(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(trial_division(7919));
        assert!(!trial_division(7917));
    }
}
