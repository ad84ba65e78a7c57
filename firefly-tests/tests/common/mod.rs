//! Gemeinsame Test-Helfer: Mock-Ausgang und steuerbare Uhr
#![allow(dead_code)]

use std::cell::Cell;
use std::time::Duration;

use firefly_core::{Clock, FireflyOutput, OutputError};

// ============================================================================
// Mock Output
// ============================================================================

#[derive(Default)]
pub struct MockOutput {
    pub lit: bool,
    /// Alle erfolgreich geschriebenen Werte in Reihenfolge
    pub history: Vec<bool>,
    pub fail_next_write: bool,
    /// Nach n erfolgreichen Schreibzugriffen schlägt jeder weitere fehl
    pub fail_after: Option<usize>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Startet leuchtend, um das Abschalten beim Erstellen zu prüfen
    pub fn lit() -> Self {
        Self {
            lit: true,
            ..Self::default()
        }
    }

    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::default()
        }
    }

    pub fn write_count(&self) -> usize {
        self.history.len()
    }
}

impl FireflyOutput for MockOutput {
    fn set(&mut self, lit: bool) -> Result<(), OutputError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(OutputError::WriteFailed);
        }
        if self.fail_after.is_some_and(|n| self.history.len() >= n) {
            return Err(OutputError::WriteFailed);
        }

        self.lit = lit;
        self.history.push(lit);
        Ok(())
    }

    fn get(&self) -> bool {
        self.lit
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

#[derive(Default)]
pub struct FakeClock {
    now: Cell<Duration>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_millis(&self, millis: u64) {
        self.now.set(Duration::from_millis(millis));
    }

    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
