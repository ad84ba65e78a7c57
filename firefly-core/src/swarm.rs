//! Schwarm: Polling-Schleife über alle Glühwürmchen
//!
//! Ein Durchlauf besucht jedes Glühwürmchen genau einmal in fester
//! Reihenfolge. Die Glühwürmchen sind voneinander unabhängig, ein Fehler
//! an einem Ausgang hält die anderen nicht auf.

use core::future::Future;

use heapless::Vec;
use rand::RngCore;

use crate::firefly::Firefly;
use crate::traits::{Clock, FireflyOutput};

/// Fehler-Typ für Schwarm-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmError {
    /// Kapazität `N` erreicht
    Full,
    /// Beim Abschalten konnten `failed` Ausgänge nicht gesetzt werden
    DarkenFailed { failed: usize },
}

/// Ergebnis eines Polling-Durchlaufs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    pub toggled: usize,
    pub failed: usize,
}

/// Feste Menge von bis zu `N` Glühwürmchen
pub struct Swarm<O, C, R, const N: usize> {
    fireflies: Vec<Firefly<O, C, R>, N>,
}

impl<O, C, R, const N: usize> Default for Swarm<O, C, R, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, C, R, const N: usize> Swarm<O, C, R, N> {
    pub const fn new() -> Self {
        Self {
            fireflies: Vec::new(),
        }
    }

    /// Fügt ein Glühwürmchen hinten an
    pub fn add(&mut self, firefly: Firefly<O, C, R>) -> Result<(), SwarmError> {
        self.fireflies.push(firefly).map_err(|_| SwarmError::Full)
    }

    pub fn len(&self) -> usize {
        self.fireflies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireflies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Firefly<O, C, R>> {
        self.fireflies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Firefly<O, C, R>> {
        self.fireflies.iter()
    }
}

impl<O: FireflyOutput, C: Clock, R: RngCore, const N: usize> Swarm<O, C, R, N> {
    /// Ein Polling-Durchlauf: schaltet jedes fällige Glühwürmchen um
    pub fn poll(&mut self) -> PollReport {
        let mut report = PollReport::default();

        for firefly in self.fireflies.iter_mut() {
            match firefly.toggle_if_ready() {
                Ok(true) => report.toggled += 1,
                Ok(false) => {}
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Firefly {}: toggle failed", firefly.id());
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Schaltet alle Glühwürmchen dunkel (genau ein Schreibzugriff pro Ausgang)
    ///
    /// Macht bei Fehlern mit den restlichen weiter.
    pub fn darken_all(&mut self) -> Result<(), SwarmError> {
        let mut failed = 0;

        for firefly in self.fireflies.iter_mut() {
            if let Err(_e) = firefly.set_lit(false) {
                #[cfg(feature = "defmt")]
                defmt::error!("Firefly {}: could not darken", firefly.id());
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(SwarmError::DarkenFailed { failed });
        }
        Ok(())
    }

    /// Hauptschleife: pollt bis zum Abschalten, dann alles dunkel
    ///
    /// `shutdown_requested` wird vor jedem Durchlauf gefragt. Ist es schon
    /// beim ersten Aufruf gesetzt, wird gar nicht gepollt. Nach jedem
    /// Durchlauf wird `between_passes` mit dem Ergebnis abgewartet
    /// (z.B. `yield_now()` im Embassy-Task). Zum Schluss genau ein
    /// `darken_all()`.
    pub async fn run_until<S, P, F>(
        &mut self,
        mut shutdown_requested: S,
        mut between_passes: P,
    ) -> Result<(), SwarmError>
    where
        S: FnMut() -> bool,
        P: FnMut(&Self, PollReport) -> F,
        F: Future<Output = ()>,
    {
        while !shutdown_requested() {
            let report = self.poll();
            between_passes(self, report).await;
        }

        self.darken_all()
    }

    /// Anzahl der gerade leuchtenden Glühwürmchen
    pub fn lit_count(&self) -> usize {
        self.fireflies.iter().filter(|f| f.is_lit()).count()
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for SwarmError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SwarmError::Full => defmt::write!(fmt, "Full"),
            SwarmError::DarkenFailed { failed } => {
                defmt::write!(fmt, "DarkenFailed {{ failed: {=usize} }}", failed)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PollReport {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "PollReport {{ toggled: {=usize}, failed: {=usize} }}",
            self.toggled,
            self.failed
        )
    }
}
