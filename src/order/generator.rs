use rand::rngs::ThreadRng;
use rand::Rng;

use super::clock::{Clock, SystemClock};
use super::number::{OrderNumber, SUFFIX_MAX, SUFFIX_MIN};

/// Generates order numbers from a clock and a random source.
///
/// The date segment comes from the clock, the suffix is drawn uniformly
/// from [`SUFFIX_MIN`, `SUFFIX_MAX`]. Generated numbers are not checked for
/// uniqueness.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use storefront_policy::order::{FixedClock, OrderNumberGenerator};
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// let mut generator = OrderNumberGenerator::with_parts(FixedClock(day), rand::thread_rng());
///
/// let number = generator.generate();
/// assert!(number.as_str().starts_with("ORD-20250615-"));
/// ```
#[derive(Debug)]
pub struct OrderNumberGenerator<C = SystemClock, R = ThreadRng> {
    clock: C,
    rng: R,
}

impl OrderNumberGenerator {
    /// Generator on the system clock and the thread-local RNG.
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            rng: rand::thread_rng(),
        }
    }
}

impl Default for OrderNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, R: Rng> OrderNumberGenerator<C, R> {
    /// Generator over an explicit clock and RNG.
    pub fn with_parts(clock: C, rng: R) -> Self {
        Self { clock, rng }
    }

    /// Produces a fresh order number.
    pub fn generate(&mut self) -> OrderNumber {
        let date = self.clock.today_utc();
        let suffix = self.rng.gen_range(SUFFIX_MIN..=SUFFIX_MAX);
        OrderNumber::compose(date, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::FixedClock;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn june_15() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    #[test]
    fn generated_number_uses_clock_date() {
        let mut generator = OrderNumberGenerator::with_parts(june_15(), StdRng::seed_from_u64(7));
        let number = generator.generate();

        assert_eq!(number.date(), june_15().0);
        assert!(number.as_str().starts_with("ORD-20250615-"));
    }

    #[test]
    fn generated_number_parses_back() {
        let mut generator = OrderNumberGenerator::with_parts(june_15(), StdRng::seed_from_u64(1));
        for _ in 0..100 {
            let number = generator.generate();
            assert_eq!(OrderNumber::parse(number.as_str()).unwrap(), number);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = OrderNumberGenerator::with_parts(june_15(), StdRng::seed_from_u64(42));
        let mut b = OrderNumberGenerator::with_parts(june_15(), StdRng::seed_from_u64(42));
        assert_eq!(a.generate(), b.generate());
    }

    #[test]
    fn default_generator_uses_today() {
        let mut generator = OrderNumberGenerator::default();
        let before = SystemClock.today_utc();
        let number = generator.generate();
        let after = SystemClock.today_utc();

        assert!(number.date() == before || number.date() == after);
    }
}
