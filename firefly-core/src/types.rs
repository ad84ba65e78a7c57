//! Core Types für die Glühwürmchen-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;
use core::time::Duration;

// ============================================================================
// Timing-Parameter
// ============================================================================
//
// Werte entsprechen männlichen Photinus pyralis.

/// Wie lange ein Glühwürmchen leuchtet
pub const LIGHT_TIME: Duration = Duration::from_millis(750);

/// Minimale Dunkelphase zwischen zwei Blitzen
pub const MIN_DARK_TIME: Duration = Duration::from_secs(5);

/// Maximale Dunkelphase zwischen zwei Blitzen
pub const MAX_DARK_TIME: Duration = Duration::from_secs(7);

/// Kennung eines Glühwürmchens für Diagnose-Ausgaben
///
/// Setzt sich aus Expander-Adresse und Pin-Index zusammen
/// und wird als `0x27-3` dargestellt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FireflyId {
    pub address: u8,
    pub pin: u8,
}

impl FireflyId {
    pub const fn new(address: u8, pin: u8) -> Self {
        Self { address, pin }
    }
}

impl fmt::Display for FireflyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}-{}", self.address, self.pin)
    }
}

/// Zustand eines Glühwürmchens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireflyState {
    Lit,
    Dark,
}

impl FireflyState {
    pub fn from_lit(lit: bool) -> Self {
        if lit { Self::Lit } else { Self::Dark }
    }
}

/// Fehler beim Erstellen einer `FireflyConfig`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Leuchtdauer ist null
    ZeroLightTime,
    /// `min_dark_time` ist größer als `max_dark_time`
    InvertedDarkRange,
}

/// Timing-Konfiguration, wird jedem Glühwürmchen beim Erstellen übergeben
///
/// Wird nach dem Start nicht mehr verändert. Die Felder sind nur über
/// `new()` setzbar, eine Konfiguration mit `min_dark_time > max_dark_time`
/// existiert damit nicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireflyConfig {
    light_time: Duration,
    min_dark_time: Duration,
    max_dark_time: Duration,
    log_toggles: bool,
}

impl FireflyConfig {
    /// Erstellt eine geprüfte Konfiguration
    ///
    /// `const`, damit die Firmware ihre Konfiguration zur Compile-Zeit baut.
    pub const fn new(
        light_time: Duration,
        min_dark_time: Duration,
        max_dark_time: Duration,
    ) -> Result<Self, ConfigError> {
        if light_time.is_zero() {
            return Err(ConfigError::ZeroLightTime);
        }
        // Duration::gt ist nicht const
        if min_dark_time.as_nanos() > max_dark_time.as_nanos() {
            return Err(ConfigError::InvertedDarkRange);
        }
        Ok(Self {
            light_time,
            min_dark_time,
            max_dark_time,
            log_toggles: false,
        })
    }

    /// Jeden Zustandswechsel loggen (nur mit `defmt` Feature)
    pub const fn with_log_toggles(mut self, log_toggles: bool) -> Self {
        self.log_toggles = log_toggles;
        self
    }

    pub const fn light_time(&self) -> Duration {
        self.light_time
    }

    pub const fn min_dark_time(&self) -> Duration {
        self.min_dark_time
    }

    pub const fn max_dark_time(&self) -> Duration {
        self.max_dark_time
    }

    pub const fn log_toggles(&self) -> bool {
        self.log_toggles
    }
}

impl Default for FireflyConfig {
    fn default() -> Self {
        Self {
            light_time: LIGHT_TIME,
            min_dark_time: MIN_DARK_TIME,
            max_dark_time: MAX_DARK_TIME,
            log_toggles: false,
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for FireflyId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u8:#x}-{=u8}", self.address, self.pin)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FireflyState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FireflyState::Lit => defmt::write!(fmt, "Lit"),
            FireflyState::Dark => defmt::write!(fmt, "Dark"),
        }
    }
}
