//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use core::time::Duration;

/// Fehler-Typ für Ausgangs-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    WriteFailed,
}

/// Trait für einen schaltbaren Ausgang (ein Glühwürmchen = eine Leitung)
///
/// Abstrahiert GPIO-Pins oder Pins eines I/O-Expanders (MCP23017).
///
/// # Implementierungen
/// - **Production:** PinOutput (embedded-hal OutputPin, z.B. MCP23017 Pin)
/// - **Testing:** MockOutput (in-memory Mock)
pub trait FireflyOutput {
    /// Setzt den Ausgang (`true` = leuchtet)
    ///
    /// # Fehlerbehandlung
    /// Gibt `OutputError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn set(&mut self, lit: bool) -> Result<(), OutputError>;

    /// Liest den aktuell gesetzten Zustand
    fn get(&self) -> bool;
}

impl<T: FireflyOutput + ?Sized> FireflyOutput for &mut T {
    fn set(&mut self, lit: bool) -> Result<(), OutputError> {
        (**self).set(lit)
    }

    fn get(&self) -> bool {
        (**self).get()
    }
}

/// Monotone Zeitquelle
///
/// Liefert die Zeit seit einem beliebigen, festen Startpunkt.
/// Der Wert darf nie kleiner werden.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
