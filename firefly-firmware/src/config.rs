// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use core::time::Duration;

use firefly_core::{ConfigError, FireflyConfig, LIGHT_TIME, MAX_DARK_TIME, MIN_DARK_TIME};

// ============================================================================
// I2C Konfiguration
// ============================================================================

/// GPIO-Pin für I2C SDA (Datenleitung zu den MCP23017)
pub const I2C_SDA_GPIO_PIN: u8 = 6;

/// GPIO-Pin für I2C SCL (Taktleitung zu den MCP23017)
pub const I2C_SCL_GPIO_PIN: u8 = 7;

/// I2C Taktfrequenz in kHz
/// MCP23017 unterstützt bis zu 1.7 MHz, 400 kHz (Fast Mode) reicht
pub const I2C_FREQUENCY_KHZ: u32 = 400;

// ============================================================================
// MCP23017 Konfiguration
// ============================================================================

/// Basis-Adresse des MCP23017 (A0..A2 auf Masse)
pub const EXPANDER_BASE_ADDRESS: u8 = 0x20;

/// Anzahl der Pins pro MCP23017 (GPA0...GPA7, GPB0...GPB7)
pub const EXPANDER_PIN_COUNT: usize = 16;

/// Ein MCP23017 am gemeinsamen I2C-Bus
#[derive(Clone, Copy)]
pub struct ExpanderConfig {
    /// Adress-Pins A0, A1, A2 (gültig: 0x20...0x27)
    pub a0: bool,
    pub a1: bool,
    pub a2: bool,
    /// Genutzte Pins als Bitmaske (Bit 0 = GPA0, Bit 15 = GPB7)
    /// Pins mit gelöschtem Bit bleiben unbenutzt
    pub active_pins: u16,
}

impl ExpanderConfig {
    /// I2C-Adresse aus den Adress-Pins
    pub const fn address(&self) -> u8 {
        EXPANDER_BASE_ADDRESS | (self.a0 as u8) | ((self.a1 as u8) << 1) | ((self.a2 as u8) << 2)
    }

    pub const fn is_active(&self, index: usize) -> bool {
        index < EXPANDER_PIN_COUNT && self.active_pins & (1 << index) != 0
    }

    pub const fn active_count(&self) -> usize {
        self.active_pins.count_ones() as usize
    }
}

/// Alle Expander, Glühwürmchen werden in dieser Reihenfolge angelegt
///
/// 0x27: alle 16 Pins, 0x26: GPA0 und GPA1 → 18 Glühwürmchen
pub const EXPANDERS: [ExpanderConfig; 2] = [
    ExpanderConfig {
        a0: true,
        a1: true,
        a2: true,
        active_pins: 0xFFFF,
    },
    ExpanderConfig {
        a0: false,
        a1: true,
        a2: true,
        active_pins: 0b11,
    },
];

const fn total_active_pins(expanders: &[ExpanderConfig]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < expanders.len() {
        total += expanders[i].active_count();
        i += 1;
    }
    total
}

const fn addresses_unique(expanders: &[ExpanderConfig]) -> bool {
    let mut i = 0;
    while i < expanders.len() {
        let mut j = i + 1;
        while j < expanders.len() {
            if expanders[i].address() == expanders[j].address() {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(addresses_unique(&EXPANDERS), "MCP23017 address used twice");

// ============================================================================
// Glühwürmchen Konfiguration
// ============================================================================

/// Maximale Anzahl Glühwürmchen (alle aktiven Pins aller Expander)
pub const SWARM_CAPACITY: usize = total_active_pins(&EXPANDERS);

/// Leuchtdauer eines Blitzes
pub const FLASH_LIGHT_TIME: Duration = LIGHT_TIME;

/// Grenzen der zufälligen Dunkelphase
pub const FLASH_MIN_DARK_TIME: Duration = MIN_DARK_TIME;
pub const FLASH_MAX_DARK_TIME: Duration = MAX_DARK_TIME;

/// Jeden Zustandswechsel loggen
pub const LOG_TOGGLES: bool = true;

/// Timing-Konfiguration für alle Glühwürmchen
///
/// Ungültige Werte brechen schon den Build ab.
pub const FIREFLY_CONFIG: FireflyConfig =
    match FireflyConfig::new(FLASH_LIGHT_TIME, FLASH_MIN_DARK_TIME, FLASH_MAX_DARK_TIME) {
        Ok(config) => config.with_log_toggles(LOG_TOGGLES),
        Err(ConfigError::ZeroLightTime) => panic!("FLASH_LIGHT_TIME must not be zero"),
        Err(ConfigError::InvertedDarkRange) => {
            panic!("FLASH_MIN_DARK_TIME must not exceed FLASH_MAX_DARK_TIME")
        }
    };

// ============================================================================
// Shutdown-Taster
// ============================================================================

/// GPIO-Pin des BOOT-Tasters (Low-aktiv, interner Pull-Up)
/// Ein Druck schaltet alle Glühwürmchen dunkel und beendet das Polling
pub const SHUTDOWN_BUTTON_GPIO_PIN: u8 = 9;

/// Wie oft der Swarm-Task eine Statuszeile loggt (in Polling-Durchläufen)
pub const STATUS_LOG_INTERVAL_PASSES: u32 = 100_000;
