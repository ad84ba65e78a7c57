// Monotone Zeitquelle auf Basis von embassy-time

use core::time::Duration;

use embassy_time::Instant;
use firefly_core::Clock;

/// Clock-Implementierung über den Embassy Timer (TIMG0)
///
/// Zero-sized, jedes Glühwürmchen bekommt eine eigene Kopie.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Duration {
        Duration::from_micros(Instant::now().as_micros())
    }
}
