//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use core::time::Duration;

use rand::{Rng, RngCore};

use crate::types::FireflyConfig;

/// Zieht eine zufällige Dunkelphase aus `[min_dark_time, max_dark_time]`
///
/// Gleichverteilt in Mikrosekunden-Auflösung, beide Grenzen inklusive.
///
/// # Beispiele
///
/// ```
/// # use core::time::Duration;
/// # use firefly_core::{FireflyConfig, draw_dark_time};
/// # use rand::{SeedableRng, rngs::SmallRng};
/// let mut rng = SmallRng::seed_from_u64(7);
/// let dark = draw_dark_time(&mut rng, &FireflyConfig::default());
/// assert!(dark >= Duration::from_secs(5));
/// assert!(dark <= Duration::from_secs(7));
/// ```
pub fn draw_dark_time<R: RngCore + ?Sized>(rng: &mut R, config: &FireflyConfig) -> Duration {
    let min = u64::try_from(config.min_dark_time().as_micros()).unwrap_or(u64::MAX);
    let max = u64::try_from(config.max_dark_time().as_micros()).unwrap_or(u64::MAX);
    Duration::from_micros(rng.gen_range(min..=max))
}

/// Vergangene Zeit seit `since`, nie negativ
pub fn elapsed_since(now: Duration, since: Duration) -> Duration {
    now.saturating_sub(since)
}
