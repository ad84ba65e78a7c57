// Swarm Task - Steuert die Glühwürmchen an den MCP23017
use core::cell::RefCell;

use defmt::{Debug2Format, error, info, warn};
use embassy_futures::yield_now;
use embedded_hal_bus::i2c::RefCellDevice;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use firefly_core::{Clock, Firefly, FireflyId, FireflyOutput, Swarm};
use port_expander::Mcp23x17;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::ShutdownSignal;
use crate::config::{
    EXPANDERS, FIREFLY_CONFIG, I2C_FREQUENCY_KHZ, STATUS_LOG_INTERVAL_PASSES, SWARM_CAPACITY,
};
use crate::hal::{EmbassyClock, PinOutput};

/// Swarm Logic - Testbare Polling-Schleife ohne Hardware-Abhängigkeit
///
/// Besucht in jedem Durchlauf alle Glühwürmchen und schaltet die fälligen um.
/// Zwischen zwei Durchläufen wird die CPU an andere Tasks abgegeben.
/// Sobald das Shutdown-Signal gesetzt ist, werden alle Glühwürmchen
/// dunkel geschaltet und die Schleife endet. Die Schleife selbst ist
/// `Swarm::run_until`, hier kommen nur Logging und `yield_now()` dazu.
///
/// # Trait-basierte Abstraktion
/// Die generischen Parameter erlauben:
/// - MCP23017 Pins (PinOutput) + EmbassyClock im Production-Code
/// - Mocks in Tests
pub async fn swarm_logic<O, C, R, const N: usize>(
    swarm: &mut Swarm<O, C, R, N>,
    shutdown: &ShutdownSignal,
) where
    O: FireflyOutput,
    C: Clock,
    R: RngCore,
{
    info!("Swarm: polling {} fireflies", swarm.len());

    let mut passes: u32 = 0;

    let result = swarm
        .run_until(
            || shutdown.signaled(),
            |swarm, report| {
                if report.failed > 0 {
                    warn!("Swarm: {}", report);
                }

                passes = passes.wrapping_add(1);
                if passes % STATUS_LOG_INTERVAL_PASSES == 0 {
                    info!("Swarm: {} of {} lit", swarm.lit_count(), swarm.len());
                }

                // Gibt CPU an andere Tasks zurück (Shutdown-Taster)
                yield_now()
            },
        )
        .await;

    match result {
        Ok(()) => info!("Swarm: all fireflies dark"),
        Err(e) => error!("Swarm: shutdown incomplete: {}", e),
    }
}

/// Swarm Task - Embassy Task für parallele Ausführung
///
/// Dieser Task übernimmt die Hardware-Initialisierung (I2C + alle MCP23017
/// aus `EXPANDERS`), erstellt pro aktivem Pin ein Glühwürmchen und ruft dann die testbare
/// `swarm_logic()` Funktion auf.
///
/// # Parameter
/// - `i2c0`: I2C0 Peripheral
/// - `sda`: GPIO6 für I2C SDA
/// - `scl`: GPIO7 für I2C SCL
/// - `seed`: Seed vom Hardware-RNG, daraus werden die Seeds der Glühwürmchen gezogen
/// - `shutdown`: Signal vom Shutdown-Taster
#[embassy_executor::task]
pub async fn swarm_task(
    i2c0: esp_hal::peripherals::I2C0<'static>,
    sda: esp_hal::peripherals::GPIO6<'static>,
    scl: esp_hal::peripherals::GPIO7<'static>,
    seed: u64,
    shutdown: &'static ShutdownSignal,
) {
    // I2C initialisieren
    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ));
    let i2c = match I2c::new(i2c0, i2c_config) {
        Ok(i2c) => i2c.with_sda(sda).with_scl(scl),
        Err(e) => {
            error!("I2C: Failed to configure: {}", Debug2Format(&e));
            return;
        }
    };

    // Alle MCP23017 teilen sich den I2C-Bus
    let bus = RefCell::new(i2c);
    let mut expanders = EXPANDERS.map(|expander| {
        Mcp23x17::new_mcp23017(
            RefCellDevice::new(&bus),
            expander.a0,
            expander.a1,
            expander.a2,
        )
    });

    // Jedes Glühwürmchen bekommt eine eigene Zufallsquelle
    let mut seeds = SmallRng::seed_from_u64(seed);
    let mut swarm: Swarm<_, EmbassyClock, SmallRng, SWARM_CAPACITY> = Swarm::new();

    for (config, expander) in EXPANDERS.iter().zip(expanders.iter_mut()) {
        let address = config.address();

        // Pins in fester Reihenfolge GPA0...GPB7
        let parts = expander.split();
        let pins = [
            parts.gpa0, parts.gpa1, parts.gpa2, parts.gpa3, parts.gpa4, parts.gpa5, parts.gpa6,
            parts.gpa7, parts.gpb0, parts.gpb1, parts.gpb2, parts.gpb3, parts.gpb4, parts.gpb5,
            parts.gpb6, parts.gpb7,
        ];

        for (index, pin) in pins.into_iter().enumerate() {
            if !config.is_active(index) {
                continue;
            }

            let id = FireflyId::new(address, index as u8);
            let pin = match pin.into_output() {
                Ok(pin) => pin,
                Err(e) => {
                    error!("Firefly {}: pin setup failed: {}", id, Debug2Format(&e));
                    continue;
                }
            };

            let rng = SmallRng::seed_from_u64(seeds.next_u64());
            match Firefly::new(PinOutput::new(pin), id, FIREFLY_CONFIG, EmbassyClock, rng) {
                Ok(firefly) => {
                    info!(
                        "Firefly {}: dark for {=u64}ms",
                        id,
                        firefly.dark_time().as_millis() as u64
                    );
                    if let Err(e) = swarm.add(firefly) {
                        error!("Firefly {}: not added: {}", id, e);
                    }
                }
                Err(e) => error!("Firefly {}: could not switch off: {}", id, e),
            }
        }
    }

    if swarm.is_empty() {
        error!("Swarm: no fireflies, check MCP23017 wiring");
        return;
    }

    // Business Logic aufrufen (testbar!)
    swarm_logic(&mut swarm, shutdown).await;
}
