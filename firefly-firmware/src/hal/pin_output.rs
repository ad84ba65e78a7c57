// Adapter: embedded-hal OutputPin → FireflyOutput
//
// Funktioniert mit GPIO-Pins des ESP32 und mit Pins des MCP23017
// (port-expander), da beide `embedded_hal::digital::OutputPin` implementieren.

use embedded_hal::digital::{OutputPin, PinState};
use firefly_core::{FireflyOutput, OutputError};

/// Ausgang eines Glühwürmchens
///
/// Merkt sich den zuletzt erfolgreich geschriebenen Pegel, damit `get()`
/// keinen I2C-Zugriff braucht.
pub struct PinOutput<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> PinOutput<P> {
    /// Erstellt einen PinOutput
    ///
    /// Der Pin wird hier noch nicht beschrieben, das übernimmt
    /// `Firefly::new()` (setzt dunkel).
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    /// Gibt den Pin wieder frei
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> FireflyOutput for PinOutput<P> {
    fn set(&mut self, lit: bool) -> Result<(), OutputError> {
        self.pin
            .set_state(PinState::from(lit))
            .map_err(|_| OutputError::WriteFailed)?;
        self.lit = lit;
        Ok(())
    }

    fn get(&self) -> bool {
        self.lit
    }
}

// ============================================================================
// Tests
// ============================================================================
