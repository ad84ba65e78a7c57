//! Glühwürmchen-Zustandsmaschine
//!
//! Ein `Firefly` besitzt genau einen Ausgang und entscheidet bei jedem
//! Polling-Durchlauf, ob er umschalten muss:
//!
//! ```text
//!        time_dark >= dark_time
//!   DARK ───────────────────────▶ LIT
//!     ▲                            │
//!     └────────────────────────────┘
//!        time_lit >= light_time
//! ```
//!
//! Jeder Wechsel zieht eine neue Dunkelphase.

use core::time::Duration;

use rand::RngCore;

use crate::logic::{draw_dark_time, elapsed_since};
use crate::traits::{Clock, FireflyOutput, OutputError};
use crate::types::{FireflyConfig, FireflyId, FireflyState};

/// Ein simuliertes Glühwürmchen an einer Ausgangsleitung
///
/// # Generische Parameter
/// - `O`: Ausgang (Hardware-Pin oder Mock)
/// - `C`: monotone Zeitquelle
/// - `R`: eigene Zufallsquelle dieses Glühwürmchens
pub struct Firefly<O, C, R> {
    output: O,
    id: FireflyId,
    config: FireflyConfig,
    clock: C,
    rng: R,
    lit_since: Duration,
    dark_since: Duration,
    dark_time: Duration,
    flashes: u32,
}

impl<O: FireflyOutput, C: Clock, R: RngCore> Firefly<O, C, R> {
    /// Erstellt ein dunkles Glühwürmchen mit zufälliger Dunkelphase
    ///
    /// # Fehlerbehandlung
    /// Gibt `OutputError::WriteFailed` zurück wenn der Ausgang nicht
    /// auf dunkel gesetzt werden kann.
    pub fn new(
        output: O,
        id: FireflyId,
        config: FireflyConfig,
        clock: C,
        mut rng: R,
    ) -> Result<Self, OutputError> {
        let dark_time = draw_dark_time(&mut rng, &config);
        Self::with_dark_time(output, id, config, clock, rng, dark_time)
    }

    /// Erstellt ein dunkles Glühwürmchen mit fest vorgegebener erster Dunkelphase
    ///
    /// Der Wert gilt nur bis zum ersten `set_lit()`, danach wird wieder
    /// zufällig gezogen.
    pub fn with_dark_time(
        mut output: O,
        id: FireflyId,
        config: FireflyConfig,
        clock: C,
        rng: R,
        dark_time: Duration,
    ) -> Result<Self, OutputError> {
        let now = clock.now();
        output.set(false)?;

        Ok(Self {
            output,
            id,
            config,
            clock,
            rng,
            lit_since: now,
            dark_since: now,
            dark_time,
            flashes: 0,
        })
    }

    /// Leuchtet das Glühwürmchen gerade?
    pub fn is_lit(&self) -> bool {
        self.output.get()
    }

    pub fn state(&self) -> FireflyState {
        FireflyState::from_lit(self.is_lit())
    }

    /// Wie lange leuchtet es schon (null wenn dunkel)
    pub fn time_lit(&self) -> Duration {
        if self.is_lit() {
            elapsed_since(self.clock.now(), self.lit_since)
        } else {
            Duration::ZERO
        }
    }

    /// Wie lange ist es schon dunkel (null wenn es leuchtet)
    pub fn time_dark(&self) -> Duration {
        if self.is_lit() {
            Duration::ZERO
        } else {
            elapsed_since(self.clock.now(), self.dark_since)
        }
    }

    /// Ist die aktuelle Phase abgelaufen?
    pub fn is_ready_to_toggle(&self) -> bool {
        if self.is_lit() {
            self.time_lit() >= self.config.light_time()
        } else {
            self.time_dark() >= self.dark_time
        }
    }

    /// Schaltet das Glühwürmchen an oder aus
    ///
    /// Merkt sich den Startzeitpunkt der neuen Phase und zieht immer eine
    /// neue Dunkelphase, auch wenn vorher eine feste vorgegeben war.
    /// Schlägt das Schreiben fehl, bleibt der Zustand unverändert.
    pub fn set_lit(&mut self, lit: bool) -> Result<(), OutputError> {
        let now = self.clock.now();
        self.output.set(lit)?;

        if lit {
            self.lit_since = now;
            self.flashes = self.flashes.wrapping_add(1);
        } else {
            self.dark_since = now;
        }

        self.redraw_dark_time();
        Ok(())
    }

    /// Wechselt in den jeweils anderen Zustand, unabhängig vom Timing
    pub fn toggle(&mut self) -> Result<(), OutputError> {
        let lit = !self.is_lit();

        #[cfg(feature = "defmt")]
        if self.config.log_toggles() {
            defmt::debug!("Firefly: {}", &*self);
            defmt::debug!(
                "  Turning firefly {} {}",
                self.id,
                if lit { "on" } else { "off" }
            );
        }

        self.set_lit(lit)
    }

    /// Schaltet um, falls die aktuelle Phase abgelaufen ist
    ///
    /// Gibt `true` zurück wenn umgeschaltet wurde. Ohne Umschalten wird
    /// der Ausgang nicht beschrieben.
    pub fn toggle_if_ready(&mut self) -> Result<bool, OutputError> {
        if !self.is_ready_to_toggle() {
            return Ok(false);
        }
        self.toggle()?;
        Ok(true)
    }

    /// Legt die nächste Dunkelphase fest (für deterministische Tests)
    ///
    /// Gilt bis zum nächsten `set_lit()`.
    pub fn set_dark_time(&mut self, dark_time: Duration) {
        self.dark_time = dark_time;
    }

    /// Zieht eine neue zufällige Dunkelphase
    pub fn redraw_dark_time(&mut self) {
        self.dark_time = draw_dark_time(&mut self.rng, &self.config);
    }
}

impl<O, C, R> Firefly<O, C, R> {
    pub fn id(&self) -> FireflyId {
        self.id
    }

    pub fn config(&self) -> &FireflyConfig {
        &self.config
    }

    pub fn dark_time(&self) -> Duration {
        self.dark_time
    }

    pub fn lit_since(&self) -> Duration {
        self.lit_since
    }

    pub fn dark_since(&self) -> Duration {
        self.dark_since
    }

    /// Anzahl der Blitze seit dem Start
    pub fn flashes(&self) -> u32 {
        self.flashes
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Gibt den Ausgang wieder frei
    pub fn into_output(self) -> O {
        self.output
    }
}

// ============================================================================
// defmt::Format Implementation (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl<O: FireflyOutput, C, R> defmt::Format for Firefly<O, C, R> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "lit_since = {=u64}ms, dark_since = {=u64}ms, dark_time = {=u64}ms, id = {}, is_lit = {}",
            self.lit_since.as_millis() as u64,
            self.dark_since.as_millis() as u64,
            self.dark_time.as_millis() as u64,
            self.id,
            self.output.get()
        )
    }
}
