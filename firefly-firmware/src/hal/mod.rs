// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul verbindet die Traits aus firefly-core mit echter Hardware:
// Ausgänge (embedded-hal OutputPin) und Zeitquelle (embassy-time).

pub mod clock;
pub mod pin_output;

pub use clock::EmbassyClock;
pub use pin_output::PinOutput;
