// Shutdown Task - Wartet auf den BOOT-Taster und signalisiert das Abschalten
use defmt::info;
use esp_hal::gpio::{Input, InputConfig, Pull};

use crate::ShutdownSignal;

/// Shutdown Button Task
///
/// Wartet auf eine fallende Flanke am BOOT-Taster (GPIO9, Low-aktiv).
/// Danach schaltet der Swarm-Task alle Glühwürmchen dunkel.
///
/// # Parameter
/// - `gpio9`: GPIO9 Peripheral (BOOT-Taster)
/// - `shutdown`: Signal an den Swarm-Task
#[embassy_executor::task]
pub async fn shutdown_button_task(
    gpio9: esp_hal::peripherals::GPIO9<'static>,
    shutdown: &'static ShutdownSignal,
) {
    let mut button = Input::new(gpio9, InputConfig::default().with_pull(Pull::Up));

    button.wait_for_falling_edge().await;
    info!("Shutdown: button pressed");

    shutdown.signal(());
}
