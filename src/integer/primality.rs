// ============================================================================
// Primality Testing
// Trial screening plus deterministic or randomized Miller-Rabin
// ============================================================================

use super::big_integer::BigInteger;
use rand::Rng;

/// Witness count used by [`BigInteger::is_probable_prime_default`].
pub const DEFAULT_PROBABLE_PRIME_ROUNDS: u32 = 5;

/// Witnesses that make Miller-Rabin deterministic below 2^64.
const SMALL_WITNESSES: [i64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Resolve easy cases by trial division; `None` means undecided.
fn is_basic_prime(n: &BigInteger) -> Option<bool> {
    let n = n.abs();
    if n.is_unit() {
        return Some(false);
    }
    if let Some(small) = n.to_i64() {
        if small == 2 || small == 3 || small == 5 {
            return Some(true);
        }
    }
    if n.is_even() || n.div_mod_u64(3).1 == 0 || n.div_mod_u64(5).1 == 0 {
        return Some(false);
    }
    if n.to_i64().is_some_and(|v| v < 49) {
        return Some(true);
    }
    None
}

/// Miller-Rabin over the given witnesses. `n` must be odd and at least 49.
fn miller_rabin(n: &BigInteger, witnesses: impl IntoIterator<Item = BigInteger>) -> bool {
    let n_prev = n.prev();
    let mut d = n_prev.clone();
    let mut r = 0u64;
    while d.is_even() {
        d = d.div_mod_u64(2).0;
        r += 1;
    }

    'witness: for a in witnesses {
        if n < &a {
            continue;
        }
        let Ok(mut x) = a.mod_pow(&d, n) else {
            return false;
        };
        if x.is_unit() || x == n_prev {
            continue;
        }
        for _ in 1..r {
            x = match x.square().checked_rem(n) {
                Ok(v) => v,
                Err(_) => return false,
            };
            if x.is_unit() {
                return false;
            }
            if x == n_prev {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

impl BigInteger {
    /// Deterministic-style primality test.
    ///
    /// Values up to 64 bits use a fixed witness set that makes the answer
    /// exact. Wider values test the first `ceil(ln 2 * bits)` integers from
    /// 2 as witnesses, or `ceil(2 * (ln 2 * bits)^2)` when `strict` is set
    /// (exact under the generalized Riemann hypothesis).
    pub fn is_prime(&self, strict: bool) -> bool {
        if let Some(decided) = is_basic_prime(self) {
            return decided;
        }
        let n = self.abs();
        let bits = n.bit_length();
        if bits <= 64 {
            return miller_rabin(&n, SMALL_WITNESSES.iter().map(|&w| BigInteger::small(w)));
        }

        let log_n = std::f64::consts::LN_2 * bits as f64;
        let rounds = if strict { 2.0 * log_n * log_n } else { log_n }.ceil() as i64;
        tracing::debug!(bits, rounds, strict, "running Miller-Rabin");
        miller_rabin(&n, (0..rounds).map(|i| BigInteger::from(i + 2)))
    }

    /// Randomized Miller-Rabin with [`DEFAULT_PROBABLE_PRIME_ROUNDS`]
    /// witnesses from the thread-local generator.
    pub fn is_probable_prime_default(&self) -> bool {
        self.is_probable_prime(DEFAULT_PROBABLE_PRIME_ROUNDS, &mut rand::thread_rng())
    }

    /// Randomized Miller-Rabin with `iterations` witnesses drawn uniformly
    /// from `[2, n-2]`. A composite passes with probability at most 4^-k.
    pub fn is_probable_prime<R: Rng + ?Sized>(&self, iterations: u32, rng: &mut R) -> bool {
        if let Some(decided) = is_basic_prime(self) {
            return decided;
        }
        let n = self.abs();
        let low = BigInteger::from(2);
        let high = n.minus(&low);
        let witnesses: Vec<BigInteger> = (0..iterations)
            .map(|_| BigInteger::rand_between(&low, &high, rng))
            .collect();
        miller_rabin(&n, witnesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn big(s: &str) -> BigInteger {
        s.parse().unwrap()
    }

    #[test]
    fn test_small_values() {
        let primes: Vec<i64> = (0..200).filter(|&v| BigInteger::from(v).is_prime(false)).collect();
        assert_eq!(
            primes,
            vec![
                2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73,
                79, 83, 89, 97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163,
                167, 173, 179, 181, 191, 193, 197, 199
            ]
        );
    }

    #[test]
    fn test_negative_and_units() {
        assert!(BigInteger::from(-7).is_prime(false));
        assert!(!BigInteger::from(-1).is_prime(false));
        assert!(!BigInteger::from(1).is_prime(false));
        assert!(!BigInteger::zero().is_prime(false));
    }

    #[test]
    fn test_strong_pseudoprimes() {
        // Carmichael number and a strong pseudoprime to bases 2, 3, 5, 7
        assert!(!BigInteger::from(561).is_prime(false));
        assert!(!BigInteger::from(3_215_031_751i64).is_prime(false));
    }

    #[test]
    fn test_large_primes() {
        let mersenne_127 = big("170141183460469231731687303715884105727");
        assert!(mersenne_127.is_prime(false));
        assert!(!mersenne_127.times(&big("1000000007")).is_prime(false));
        assert!(big("18446744073709551557").is_prime(false)); // largest prime below 2^64
    }

    #[test]
    fn test_probable_prime() {
        let mut rng = StdRng::seed_from_u64(7);
        let mersenne_89 = big("618970019642690137449562111");
        assert!(mersenne_89.is_probable_prime(10, &mut rng));
        assert!(!mersenne_89.next().next().is_probable_prime(10, &mut rng));
        assert!(BigInteger::from(97).is_probable_prime(5, &mut rng));
    }

    #[test]
    fn test_probable_prime_default_rounds() {
        assert_eq!(DEFAULT_PROBABLE_PRIME_ROUNDS, 5);
        let mersenne_89 = big("618970019642690137449562111");
        assert!(mersenne_89.is_probable_prime_default());
        let composite = big("2305843009213693951").times(&big("2147483647"));
        assert!(!composite.is_probable_prime_default());
        assert!(!BigInteger::from(1).is_probable_prime_default());
    }
}
